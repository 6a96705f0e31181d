use chrono::NaiveDate;

use super::filter::activities_for_day;
use crate::error::RepositoryError;
use crate::model::activity::Activity;
use crate::repository::{ActivityRepository, ReferenceLookup};

const CLAUSE_SEPARATOR: &str = "\nand ";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Employee {0} not found")]
    EmployeeNotFound(i64),

    #[error("Role of activity {activity_id} not found")]
    RoleNotFound { activity_id: i64 },

    #[error("Project of activity {activity_id} not found")]
    ProjectNotFound { activity_id: i64 },

    #[error("Activity type of activity {activity_id} not found")]
    ActivityTypeNotFound { activity_id: i64 },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Describes what `employee_id` did on `date`:
///
/// ```text
/// 2020-08-03 Mykola worked as software engineer on the Ableton 10 hours regular work
/// and worked as team lead on the Logic Pro 2 hours overtime
/// ```
///
/// Every activity must resolve its role, project and activity type; the first
/// one that does not fails the whole report.
pub async fn build_report<S>(store: &S, employee_id: i64, date: NaiveDate) -> Result<String, ReportError>
where
    S: ActivityRepository + ReferenceLookup + ?Sized,
{
    let activities = activities_for_day(store, employee_id, date).await?;

    let employee = store
        .employee(employee_id)
        .await?
        .ok_or(ReportError::EmployeeNotFound(employee_id))?;

    let mut clauses = Vec::with_capacity(activities.len());
    for activity in &activities {
        clauses.push(describe(store, activity).await?);
    }

    let mut report = format!("{} {} ", date.format("%Y-%m-%d"), employee.name);
    report.push_str(&clauses.join(CLAUSE_SEPARATOR));
    Ok(report)
}

async fn describe<S>(store: &S, activity: &Activity) -> Result<String, ReportError>
where
    S: ReferenceLookup + ?Sized,
{
    let activity_id = activity.id;

    let role = match activity.role_id {
        Some(id) => store.role(id).await?,
        None => None,
    }
    .ok_or(ReportError::RoleNotFound { activity_id })?;

    let project = match activity.project_id {
        Some(id) => store.project(id).await?,
        None => None,
    }
    .ok_or(ReportError::ProjectNotFound { activity_id })?;

    let activity_type = match activity.activity_type_id {
        Some(id) => store.activity_type(id).await?,
        None => None,
    }
    .ok_or(ReportError::ActivityTypeNotFound { activity_id })?;

    Ok(format!(
        "worked as {} on the {} {} hours {}",
        role.name, project.name, activity.hours_of_work, activity_type.name
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::seed_if_empty;
    use crate::model::activity::NewActivity;
    use crate::repository::SqliteStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn store() -> SqliteStore {
        let store = SqliteStore::in_memory()
            .await
            .expect("Failed to create test database");
        seed_if_empty(&store, date(2026, 10, 16)).await.unwrap();
        store
    }

    #[actix_web::test]
    async fn empty_day_is_header_only() {
        let store = store().await;
        let report = build_report(&store, 1, date(2020, 8, 4)).await.unwrap();
        assert_eq!(report, "2020-08-04 Mykola ");
    }

    #[actix_web::test]
    async fn single_activity() {
        let store = store().await;
        let report = build_report(&store, 1, date(2020, 8, 3)).await.unwrap();
        assert_eq!(
            report,
            "2020-08-03 Mykola worked as software engineer on the Ableton 10 hours regular work"
        );
    }

    #[actix_web::test]
    async fn two_activities_are_joined_without_trailing_separator() {
        let store = store().await;
        store
            .insert_activity(&NewActivity {
                date: date(2020, 8, 3),
                hours_of_work: 2,
                employee_id: Some(1),
                project_id: Some(2),
                role_id: Some(3),
                activity_type_id: Some(2),
            })
            .await
            .unwrap();

        let report = build_report(&store, 1, date(2020, 8, 3)).await.unwrap();

        assert_eq!(
            report,
            "2020-08-03 Mykola worked as software engineer on the Ableton 10 hours regular work\
             \nand worked as team lead on the Logic Pro 2 hours overtime"
        );
        assert!(!report.ends_with(CLAUSE_SEPARATOR));
    }

    #[actix_web::test]
    async fn unknown_employee_fails() {
        let store = store().await;
        let err = build_report(&store, 9, date(2020, 8, 3)).await.unwrap_err();
        assert!(matches!(err, ReportError::EmployeeNotFound(9)));
    }

    #[actix_web::test]
    async fn unknown_employee_fails_even_without_activities() {
        let store = SqliteStore::in_memory()
            .await
            .expect("Failed to create test database");
        let err = build_report(&store, 1, date(2020, 8, 3)).await.unwrap_err();
        assert!(matches!(err, ReportError::EmployeeNotFound(1)));
    }

    #[actix_web::test]
    async fn unassigned_reference_fails_instead_of_skipping() {
        let store = store().await;
        let created = store
            .insert_activity(&NewActivity {
                date: date(2020, 8, 3),
                hours_of_work: 1,
                employee_id: Some(1),
                project_id: None,
                role_id: Some(1),
                activity_type_id: Some(1),
            })
            .await
            .unwrap();

        let err = build_report(&store, 1, date(2020, 8, 3)).await.unwrap_err();
        assert!(
            matches!(err, ReportError::ProjectNotFound { activity_id } if activity_id == created.id)
        );
    }

    #[actix_web::test]
    async fn missing_activity_type_fails() {
        let store = store().await;
        store
            .insert_activity(&NewActivity {
                date: date(2021, 3, 1),
                hours_of_work: 1,
                employee_id: Some(2),
                project_id: Some(1),
                role_id: Some(1),
                activity_type_id: None,
            })
            .await
            .unwrap();

        let err = build_report(&store, 2, date(2021, 3, 1)).await.unwrap_err();
        assert!(matches!(err, ReportError::ActivityTypeNotFound { .. }));
        assert_eq!(err.to_string(), "Activity type of activity 5 not found");
    }
}
