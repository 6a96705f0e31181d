//! Statements shared by the MySQL and SQLite stores.
//!
//! Both dialects accept backtick-quoted identifiers, so everything except
//! fixture loading and row locking runs the same text on either backend.

use tracing::error;

use crate::error::RepositoryError;

pub const SELECT_EMPLOYEE: &str =
    "SELECT id, name, sex, date_of_birth FROM employees WHERE id = ?";
pub const SELECT_ROLE: &str = "SELECT id, name FROM roles WHERE id = ?";
pub const SELECT_PROJECT: &str =
    "SELECT id, name, date_start, date_end FROM projects WHERE id = ?";
pub const SELECT_ACTIVITY_TYPE: &str = "SELECT id, name FROM activity_types WHERE id = ?";

pub const LIST_ACTIVITIES: &str = r#"
    SELECT id, `date`, hours_of_work, employee_id, project_id, role_id, activity_type_id
    FROM activities
    ORDER BY id
"#;

pub const FIND_ACTIVITY: &str = r#"
    SELECT id, `date`, hours_of_work, employee_id, project_id, role_id, activity_type_id
    FROM activities
    WHERE id = ?
"#;

pub const ACTIVITIES_BETWEEN: &str = r#"
    SELECT id, `date`, hours_of_work, employee_id, project_id, role_id, activity_type_id
    FROM activities
    WHERE employee_id = ? AND `date` BETWEEN ? AND ?
    ORDER BY id
"#;

pub const INSERT_ACTIVITY: &str = r#"
    INSERT INTO activities
    (`date`, hours_of_work, employee_id, project_id, role_id, activity_type_id)
    VALUES (?, ?, ?, ?, ?, ?)
"#;

pub const INSERT_ACTIVITY_WITH_ID: &str = r#"
    INSERT INTO activities
    (id, `date`, hours_of_work, employee_id, project_id, role_id, activity_type_id)
    VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

pub const UPDATE_ACTIVITY: &str = r#"
    UPDATE activities
    SET `date` = ?, hours_of_work = ?, employee_id = ?, project_id = ?,
        role_id = ?, activity_type_id = ?
    WHERE id = ?
"#;

pub const DELETE_ACTIVITY: &str = "DELETE FROM activities WHERE id = ?";
pub const COUNT_ACTIVITY: &str = "SELECT COUNT(*) FROM activities WHERE id = ?";
pub const COUNT_ACTIVITIES: &str = "SELECT COUNT(*) FROM activities";

/// Foreign-key violations become `InvalidReference`; anything else, duplicate
/// keys included, stays a database error.
pub fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return RepositoryError::InvalidReference(db_err.message().to_string());
        }
    }

    error!(error = %e, "Activity write failed");
    RepositoryError::Database(e)
}

/// Implements [`ReferenceLookup`](crate::repository::ReferenceLookup) and
/// [`ActivityRepository`](crate::repository::ActivityRepository) for a store
/// with a `pool` field.
///
/// `last_insert_id` reads the new id off the backend's query result and
/// `find_for_delete` is the select run inside the delete transaction.
macro_rules! impl_sql_store {
    ($store:ty, last_insert_id: $last_id:path, find_for_delete: $find_for_delete:expr $(,)?) => {
        #[async_trait::async_trait]
        impl $crate::repository::ReferenceLookup for $store {
            async fn employee(
                &self,
                id: i64,
            ) -> $crate::repository::RepoResult<Option<$crate::model::employee::Employee>> {
                let employee = sqlx::query_as::<_, $crate::model::employee::Employee>(
                    $crate::repository::sql::SELECT_EMPLOYEE,
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
                Ok(employee)
            }

            async fn role(
                &self,
                id: i64,
            ) -> $crate::repository::RepoResult<Option<$crate::model::role::Role>> {
                let role = sqlx::query_as::<_, $crate::model::role::Role>(
                    $crate::repository::sql::SELECT_ROLE,
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
                Ok(role)
            }

            async fn project(
                &self,
                id: i64,
            ) -> $crate::repository::RepoResult<Option<$crate::model::project::Project>> {
                let project = sqlx::query_as::<_, $crate::model::project::Project>(
                    $crate::repository::sql::SELECT_PROJECT,
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
                Ok(project)
            }

            async fn activity_type(
                &self,
                id: i64,
            ) -> $crate::repository::RepoResult<
                Option<$crate::model::activity_type::ActivityType>,
            > {
                let activity_type = sqlx::query_as::<_, $crate::model::activity_type::ActivityType>(
                    $crate::repository::sql::SELECT_ACTIVITY_TYPE,
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
                Ok(activity_type)
            }
        }

        #[async_trait::async_trait]
        impl $crate::repository::ActivityRepository for $store {
            async fn list_activities(
                &self,
            ) -> $crate::repository::RepoResult<Vec<$crate::model::activity::Activity>> {
                let activities = sqlx::query_as::<_, $crate::model::activity::Activity>(
                    $crate::repository::sql::LIST_ACTIVITIES,
                )
                .fetch_all(&self.pool)
                .await?;
                Ok(activities)
            }

            async fn find_activity(
                &self,
                id: i64,
            ) -> $crate::repository::RepoResult<Option<$crate::model::activity::Activity>> {
                let activity = sqlx::query_as::<_, $crate::model::activity::Activity>(
                    $crate::repository::sql::FIND_ACTIVITY,
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
                Ok(activity)
            }

            async fn activities_between(
                &self,
                employee_id: i64,
                from: chrono::NaiveDate,
                to: chrono::NaiveDate,
            ) -> $crate::repository::RepoResult<Vec<$crate::model::activity::Activity>> {
                tracing::debug!(employee_id, %from, %to, "Filtering activities");

                let activities = sqlx::query_as::<_, $crate::model::activity::Activity>(
                    $crate::repository::sql::ACTIVITIES_BETWEEN,
                )
                .bind(employee_id)
                .bind(from)
                .bind(to)
                .fetch_all(&self.pool)
                .await?;
                Ok(activities)
            }

            async fn insert_activity(
                &self,
                new: &$crate::model::activity::NewActivity,
            ) -> $crate::repository::RepoResult<$crate::model::activity::Activity> {
                let result = sqlx::query($crate::repository::sql::INSERT_ACTIVITY)
                    .bind(new.date)
                    .bind(new.hours_of_work)
                    .bind(new.employee_id)
                    .bind(new.project_id)
                    .bind(new.role_id)
                    .bind(new.activity_type_id)
                    .execute(&self.pool)
                    .await
                    .map_err($crate::repository::sql::map_write_error)?;

                Ok(new.clone().with_id($last_id(&result)))
            }

            async fn update_activity(
                &self,
                activity: &$crate::model::activity::Activity,
            ) -> $crate::repository::RepoResult<bool> {
                let result = sqlx::query($crate::repository::sql::UPDATE_ACTIVITY)
                    .bind(activity.date)
                    .bind(activity.hours_of_work)
                    .bind(activity.employee_id)
                    .bind(activity.project_id)
                    .bind(activity.role_id)
                    .bind(activity.activity_type_id)
                    .bind(activity.id)
                    .execute(&self.pool)
                    .await
                    .map_err($crate::repository::sql::map_write_error)?;

                Ok(result.rows_affected() > 0)
            }

            async fn delete_activity(
                &self,
                id: i64,
            ) -> $crate::repository::RepoResult<Option<$crate::model::activity::Activity>> {
                let mut tx = self.pool.begin().await?;

                let activity = sqlx::query_as::<_, $crate::model::activity::Activity>(
                    $find_for_delete,
                )
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

                if activity.is_some() {
                    sqlx::query($crate::repository::sql::DELETE_ACTIVITY)
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;
                }

                tx.commit().await?;
                Ok(activity)
            }

            async fn activity_exists(&self, id: i64) -> $crate::repository::RepoResult<bool> {
                let count =
                    sqlx::query_scalar::<_, i64>($crate::repository::sql::COUNT_ACTIVITY)
                        .bind(id)
                        .fetch_one(&self.pool)
                        .await?;
                Ok(count > 0)
            }

            async fn count_activities(&self) -> $crate::repository::RepoResult<u64> {
                let count =
                    sqlx::query_scalar::<_, i64>($crate::repository::sql::COUNT_ACTIVITIES)
                        .fetch_one(&self.pool)
                        .await?;
                Ok(count as u64)
            }
        }
    };
}

pub(crate) use impl_sql_store;
