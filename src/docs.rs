use crate::model::activity::{Activity, NewActivity};
use utoipa::OpenApi;

// prefix the handler annotations are written against
const DOCUMENTED_PREFIX: &str = "/api";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Activity Tracker API",
        version = "1.0.0",
        description = r#"
## Employee Activity Tracker

Records which employee worked on which project, in what role, for how many
hours and on which day, split into regular work and overtime.

### Key Features
- **Activity records**: create, update, list, view and delete
- **Day and week views**: an employee's activities for a date or an ISO week of the current year
- **Reports**: one plain-text sentence summarising an employee's day

### Response Format
- JSON with camelCase fields, dates as `YYYY-MM-DD`
- Errors as `{"message": "..."}`
- Reports as `text/plain`
"#,
    ),
    paths(
        crate::api::activity::list_activities,
        crate::api::activity::get_activity,
        crate::api::activity::activities_per_day,
        crate::api::activity::activities_per_week,
        crate::api::activity::activities_report,
        crate::api::activity::create_activity,
        crate::api::activity::update_activity,
        crate::api::activity::delete_activity
    ),
    components(
        schemas(
            Activity,
            NewActivity
        )
    ),
    tags(
        (name = "Activity", description = "Employee activity APIs"),
    )
)]
pub struct ApiDoc;

/// The OpenAPI document with every path moved under `api_prefix`.
pub fn api_doc(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let prefix = api_prefix.trim_end_matches('/');

    doc.paths.paths = std::mem::take(&mut doc.paths.paths)
        .into_iter()
        .map(|(path, item)| match path.strip_prefix(DOCUMENTED_PREFIX) {
            Some(rest) => (format!("{}{}", prefix, rest), item),
            None => (path, item),
        })
        .collect();

    doc
}
