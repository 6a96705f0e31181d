use async_trait::async_trait;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlQueryResult;

use super::sql::{self, impl_sql_store, map_write_error};
use super::{RepoResult, Store};
use crate::bootstrap::Fixtures;

// Locks the row so a concurrent update cannot slip in before the delete.
const FIND_ACTIVITY_FOR_DELETE: &str = r#"
    SELECT id, `date`, hours_of_work, employee_id, project_id, role_id, activity_type_id
    FROM activities
    WHERE id = ?
    FOR UPDATE
"#;

fn last_insert_id(result: &MySqlQueryResult) -> i64 {
    result.last_insert_id() as i64
}

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl_sql_store!(
    MySqlStore,
    last_insert_id: last_insert_id,
    find_for_delete: FIND_ACTIVITY_FOR_DELETE,
);

#[async_trait]
impl Store for MySqlStore {
    async fn load_fixtures(&self, fixtures: &Fixtures) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        for role in &fixtures.roles {
            sqlx::query("INSERT IGNORE INTO roles (id, name) VALUES (?, ?)")
                .bind(role.id)
                .bind(&role.name)
                .execute(&mut *tx)
                .await?;
        }

        for activity_type in &fixtures.activity_types {
            sqlx::query("INSERT IGNORE INTO activity_types (id, name) VALUES (?, ?)")
                .bind(activity_type.id)
                .bind(&activity_type.name)
                .execute(&mut *tx)
                .await?;
        }

        for project in &fixtures.projects {
            sqlx::query(
                "INSERT IGNORE INTO projects (id, name, date_start, date_end) VALUES (?, ?, ?, ?)",
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
                "INSERT IGNORE INTO employees (id, name, sex, date_of_birth) VALUES (?, ?, ?, ?)",
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
