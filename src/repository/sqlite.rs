use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteQueryResult;

use super::sql::{self, impl_sql_store, map_write_error};
use super::{RepoResult, Store};
use crate::bootstrap::Fixtures;
use crate::db::init_sqlite;

/// SQLite-backed store, used for local runs and as the test backend.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fresh private database, dropped with the last clone of the store.
    #[cfg(test)]
    pub async fn in_memory() -> anyhow::Result<Self> {
        let pool = init_sqlite("sqlite::memory:").await?;
        Ok(Self::new(pool))
    }
}

impl_sql_store!(
    SqliteStore,
    last_insert_id: SqliteQueryResult::last_insert_rowid,
    find_for_delete: sql::FIND_ACTIVITY,
);

#[async_trait]
impl Store for SqliteStore {
    async fn load_fixtures(&self, fixtures: &Fixtures) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        for role in &fixtures.roles {
            sqlx::query("INSERT OR IGNORE INTO roles (id, name) VALUES (?, ?)")
                .bind(role.id)
                .bind(&role.name)
                .execute(&mut *tx)
                .await?;
        }

        for activity_type in &fixtures.activity_types {
            sqlx::query("INSERT OR IGNORE INTO activity_types (id, name) VALUES (?, ?)")
                .bind(activity_type.id)
                .bind(&activity_type.name)
                .execute(&mut *tx)
                .await?;
        }

        for project in &fixtures.projects {
            sqlx::query(
                "INSERT OR IGNORE INTO projects (id, name, date_start, date_end) VALUES (?, ?, ?, ?)",
            )
            .bind(project.id)
            .bind(&project.name)
            .bind(project.date_start)
            .bind(project.date_end)
            .execute(&mut *tx)
            .await?;
        }

        for employee in &fixtures.employees {
            sqlx::query(
                "INSERT OR IGNORE INTO employees (id, name, sex, date_of_birth) VALUES (?, ?, ?, ?)",
            )
            .bind(employee.id)
            .bind(&employee.name)
            .bind(employee.sex.as_ref())
            .bind(employee.date_of_birth)
            .execute(&mut *tx)
            .await?;
        }

        for activity in &fixtures.activities {
            sqlx::query(sql::INSERT_ACTIVITY_WITH_ID)
                .bind(activity.id)
                .bind(activity.date)
                .bind(activity.hours_of_work)
                .bind(activity.employee_id)
                .bind(activity.project_id)
                .bind(activity.role_id)
                .bind(activity.activity_type_id)
                .execute(&mut *tx)
                .await
                .map_err(map_write_error)?;
        }

        tx.commit().await?;
        Ok(())
    }
}
