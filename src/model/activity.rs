use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One logged unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "date": "2020-08-03",
        "hoursOfWork": 10,
        "employeeId": 1,
        "projectId": 1,
        "roleId": 1,
        "activityTypeId": 1
    })
)]
pub struct Activity {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "2020-08-03", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = 10)]
    pub hours_of_work: u32,

    #[schema(example = 1, nullable = true)]
    pub employee_id: Option<i64>,

    #[schema(example = 1, nullable = true)]
    pub project_id: Option<i64>,

    #[schema(example = 1, nullable = true)]
    pub role_id: Option<i64>,

    #[schema(example = 1, nullable = true)]
    pub activity_type_id: Option<i64>,
}

/// Activity fields as submitted on create, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    #[schema(example = "2020-08-03", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = 8)]
    pub hours_of_work: u32,
    #[schema(example = 1, nullable = true)]
    pub employee_id: Option<i64>,
    #[schema(example = 1, nullable = true)]
    pub project_id: Option<i64>,
    #[schema(example = 1, nullable = true)]
    pub role_id: Option<i64>,
    #[schema(example = 1, nullable = true)]
    pub activity_type_id: Option<i64>,
}

impl NewActivity {
    pub fn with_id(self, id: i64) -> Activity {
        Activity {
            id,
            date: self.date,
            hours_of_work: self.hours_of_work,
            employee_id: self.employee_id,
            project_id: self.project_id,
            role_id: self.role_id,
            activity_type_id: self.activity_type_id,
        }
    }
}
