//! Demo data loaded once at startup.

use chrono::{Months, NaiveDate};
use tracing::info;

use crate::model::{
    activity::Activity,
    activity_type::ActivityType,
    employee::{Employee, Sex},
    project::Project,
    role::Role,
};
use crate::repository::{RepoResult, Store};

/// Rows inserted with fixed ids.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub roles: Vec<Role>,
    pub activity_types: Vec<ActivityType>,
    pub projects: Vec<Project>,
    pub employees: Vec<Employee>,
    pub activities: Vec<Activity>,
}

impl Fixtures {
    /// Demo rows. Project windows, birth dates and one activity are relative to `today`.
    pub fn demo(today: NaiveDate) -> Self {
        let born = today
            .checked_sub_months(Months::new(20 * 12))
            .unwrap_or(NaiveDate::MIN);
        let fixed = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(today);

        let role = |id, name: &str| Role {
            id,
            name: name.to_string(),
        };
        let activity_type = |id, name: &str| ActivityType {
            id,
            name: name.to_string(),
        };
        let activity = |id, date, hours_of_work, project_id, role_id, activity_type_id| Activity {
            id,
            date,
            hours_of_work,
            employee_id: Some(1),
            project_id: Some(project_id),
            role_id: Some(role_id),
            activity_type_id: Some(activity_type_id),
        };

        Self {
            roles: vec![
                role(1, "software engineer"),
                role(2, "software architect"),
                role(3, "team lead"),
            ],
            activity_types: vec![activity_type(1, "regular work"), activity_type(2, "overtime")],
            projects: vec![
                Project {
                    id: 1,
                    name: "Ableton".to_string(),
                    date_start: today,
                    date_end: today + chrono::Duration::days(14),
                },
                Project {
                    id: 2,
                    name: "Logic Pro".to_string(),
                    date_start: today,
                    date_end: today + chrono::Duration::days(10),
                },
            ],
            employees: vec![
                Employee {
                    id: 1,
                    name: "Mykola".to_string(),
                    sex: Sex::Male,
                    date_of_birth: born,
                },
                Employee {
                    id: 2,
                    name: "Sasha".to_string(),
                    sex: Sex::Female,
                    date_of_birth: born,
                },
            ],
            activities: vec![
                activity(1, fixed(2020, 8, 3), 10, 1, 1, 1),
                activity(2, today, 5, 2, 2, 2),
                activity(3, fixed(2020, 8, 9), 7, 2, 3, 1),
                activity(4, fixed(2020, 8, 10), 7, 2, 3, 1),
            ],
        }
    }
}

/// Loads the demo fixtures unless the store already holds activities.
/// Returns whether anything was inserted.
pub async fn seed_if_empty<S: Store + ?Sized>(store: &S, today: NaiveDate) -> RepoResult<bool> {
    let existing = store.count_activities().await?;
    if existing > 0 {
        info!(existing, "Store already populated, skipping fixtures");
        return Ok(false);
    }

    store.load_fixtures(&Fixtures::demo(today)).await?;
    info!("Loaded demo fixtures");
    Ok(true)
}
