use crate::{
    error::ApiError,
    model::activity::{Activity, NewActivity},
    repository::Store,
    tracker::{
        filter::{activities_for_day, activities_for_week},
        report::build_report,
    },
};
use actix_web::{HttpRequest, HttpResponse, http::header, web};
use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, error, info, warn};

/// List all activities
#[utoipa::path(
    get,
    path = "/api/activities",
    responses(
        (status = 200, description = "Every stored activity, oldest first", body = [Activity]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Activity"
)]
pub async fn list_activities(store: web::Data<dyn Store>) -> Result<HttpResponse, ApiError> {
    let activities = store.list_activities().await?;
    debug!(count = activities.len(), "Listed activities");
    Ok(HttpResponse::Ok().json(activities))
}

/// Get Activity by ID
#[utoipa::path(
    get,
    path = "/api/activities/activity/{id}",
    params(
        ("id" = i64, Path, description = "Activity ID")
    ),
    responses(
        (status = 200, description = "Activity found", body = Activity),
        (status = 404, description = "Activity not found", body = Object, example = json!({
            "message": "Activity not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Activity"
)]
pub async fn get_activity(
    store: web::Data<dyn Store>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let activity_id = path.into_inner();

    match store.find_activity(activity_id).await? {
        Some(activity) => Ok(HttpResponse::Ok().json(activity)),
        None => Err(ApiError::NotFound("Activity not found".into())),
    }
}

/// Activities of an employee on one day
#[utoipa::path(
    get,
    path = "/api/activities/day/{employee_id}/{date}",
    params(
        ("employee_id" = i64, Path, description = "Employee ID"),
        ("date" = String, Path, description = "Calendar date", example = "2020-08-03")
    ),
    responses(
        (status = 200, description = "Matching activities", body = [Activity]),
        (status = 400, description = "Malformed date")
    ),
    tag = "Activity"
)]
pub async fn activities_per_day(
    store: web::Data<dyn Store>,
    path: web::Path<(i64, NaiveDate)>,
) -> Result<HttpResponse, ApiError> {
    let (employee_id, date) = path.into_inner();

    let activities = activities_for_day(store.get_ref(), employee_id, date).await?;
    Ok(HttpResponse::Ok().json(activities))
}

/// Activities of an employee in one ISO week of the current year
#[utoipa::path(
    get,
    path = "/api/activities/week/{employee_id}/{week_number}",
    params(
        ("employee_id" = i64, Path, description = "Employee ID"),
        ("week_number" = i32, Path, description = "ISO week number, not range checked", example = 32)
    ),
    responses(
        (status = 200, description = "Activities from Monday to Sunday of that week", body = [Activity]),
        (status = 400, description = "Week falls outside the calendar")
    ),
    tag = "Activity"
)]
pub async fn activities_per_week(
    store: web::Data<dyn Store>,
    path: web::Path<(i64, i32)>,
) -> Result<HttpResponse, ApiError> {
    let (employee_id, week_number) = path.into_inner();
    let year = Local::now().year();

    match activities_for_week(store.get_ref(), employee_id, year, week_number).await? {
        Some(activities) => Ok(HttpResponse::Ok().json(activities)),
        None => Err(ApiError::BadRequest(format!(
            "Week {} of {} is outside the supported calendar",
            week_number, year
        ))),
    }
}

/// Plain-text report of an employee's day
#[utoipa::path(
    get,
    path = "/api/activities/report/{employee_id}/{date}",
    params(
        ("employee_id" = i64, Path, description = "Employee ID"),
        ("date" = String, Path, description = "Calendar date", example = "2020-08-03")
    ),
    responses(
        (status = 200, description = "Report sentence", body = String, content_type = "text/plain",
            example = json!("2020-08-03 Mykola worked as software engineer on the Ableton 10 hours regular work")),
        (status = 404, description = "Employee, role, project or activity type not found", body = Object, example = json!({
            "message": "Employee 9 not found"
        }))
    ),
    tag = "Activity"
)]
pub async fn activities_report(
    store: web::Data<dyn Store>,
    path: web::Path<(i64, NaiveDate)>,
) -> Result<HttpResponse, ApiError> {
    let (employee_id, date) = path.into_inner();

    let report = build_report(store.get_ref(), employee_id, date)
        .await
        .map_err(|e| {
            warn!(error = %e, employee_id, %date, "Failed to build activity report");
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::plaintext())
        .body(report))
}

/// Create Activity
#[utoipa::path(
    post,
    path = "/api/activities",
    request_body = NewActivity,
    responses(
        (status = 201, description = "Activity created", body = Activity),
        (status = 400, description = "Malformed body or unknown reference", body = Object, example = json!({
            "message": "Role 42 does not exist"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Activity"
)]
pub async fn create_activity(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    payload: web::Json<NewActivity>,
) -> Result<HttpResponse, ApiError> {
    let activity = store.insert_activity(&payload).await?;
    info!(activity_id = activity.id, "Activity created");

    let location = format!(
        "{}/activity/{}",
        req.path().trim_end_matches('/'),
        activity.id
    );

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(activity))
}

/// Update Activity
#[utoipa::path(
    put,
    path = "/api/activities/{id}",
    params(
        ("id" = i64, Path, description = "Activity ID")
    ),
    request_body = Activity,
    responses(
        (status = 204, description = "Activity updated"),
        (status = 400, description = "Path and body ids differ", body = Object, example = json!({
            "message": "Activity id in path and body differ"
        })),
        (status = 404, description = "Activity not found"),
        (status = 409, description = "Activity changed while updating"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Activity"
)]
pub async fn update_activity(
    store: web::Data<dyn Store>,
    path: web::Path<i64>,
    payload: web::Json<Activity>,
) -> Result<HttpResponse, ApiError> {
    let activity_id = path.into_inner();
    let activity = payload.into_inner();

    if activity.id != activity_id {
        return Err(ApiError::BadRequest(
            "Activity id in path and body differ".into(),
        ));
    }

    if store.update_activity(&activity).await? {
        info!(activity_id, "Activity updated");
        return Ok(HttpResponse::NoContent().finish());
    }

    // nothing matched: either the row is gone or it moved under us
    if store.activity_exists(activity_id).await? {
        error!(activity_id, "Activity update matched no row although it exists");
        return Err(ApiError::Conflict(
            "Activity was modified concurrently".into(),
        ));
    }

    Err(ApiError::NotFound("Activity not found".into()))
}

/// Delete Activity
#[utoipa::path(
    delete,
    path = "/api/activities/{id}",
    params(
        ("id" = i64, Path, description = "Activity ID")
    ),
    responses(
        (status = 200, description = "Deleted activity", body = Activity),
        (status = 404, description = "Activity not found", body = Object, example = json!({
            "message": "Activity not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Activity"
)]
pub async fn delete_activity(
    store: web::Data<dyn Store>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let activity_id = path.into_inner();

    match store.delete_activity(activity_id).await? {
        Some(activity) => {
            info!(activity_id, "Activity deleted");
            Ok(HttpResponse::Ok().json(activity))
        }
        None => Err(ApiError::NotFound("Activity not found".into())),
    }
}
