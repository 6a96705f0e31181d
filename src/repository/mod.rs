//! Storage capabilities used by the handlers and the tracker core.
//!
//! The core only ever needs [`ReferenceLookup`] for joins and the read half of
//! [`ActivityRepository`] for filtering. Writes stay in the HTTP layer.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::bootstrap::Fixtures;
use crate::error::RepositoryError;
use crate::model::{
    activity::{Activity, NewActivity},
    activity_type::ActivityType,
    employee::Employee,
    project::Project,
    role::Role,
};

mod sql;

pub mod mysql;
pub mod sqlite;

pub use mysql::MySqlStore;
pub use sqlite::SqliteStore;

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Id lookups over the reference collections.
#[async_trait]
pub trait ReferenceLookup: Send + Sync {
    async fn employee(&self, id: i64) -> RepoResult<Option<Employee>>;
    async fn role(&self, id: i64) -> RepoResult<Option<Role>>;
    async fn project(&self, id: i64) -> RepoResult<Option<Project>>;
    async fn activity_type(&self, id: i64) -> RepoResult<Option<ActivityType>>;
}

/// The activity fact table.
///
/// Every listing returns rows in ascending id order.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn list_activities(&self) -> RepoResult<Vec<Activity>>;

    async fn find_activity(&self, id: i64) -> RepoResult<Option<Activity>>;

    /// Activities of one employee dated within `from..=to`.
    async fn activities_between(
        &self,
        employee_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepoResult<Vec<Activity>>;

    async fn insert_activity(&self, new: &NewActivity) -> RepoResult<Activity>;

    /// Overwrites every column of the row with `activity.id`.
    /// Returns `false` when no row matched.
    async fn update_activity(&self, activity: &Activity) -> RepoResult<bool>;

    /// Removes the row and hands back what was stored.
    async fn delete_activity(&self, id: i64) -> RepoResult<Option<Activity>>;

    async fn activity_exists(&self, id: i64) -> RepoResult<bool>;

    async fn count_activities(&self) -> RepoResult<u64>;
}

/// Everything the application needs from a backend.
#[async_trait]
pub trait Store: ActivityRepository + ReferenceLookup {
    /// Inserts fixture rows with their fixed ids. Reference rows that already
    /// exist are left untouched.
    async fn load_fixtures(&self, fixtures: &Fixtures) -> RepoResult<()>;
}
