use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

use crate::tracker::report::ReportError;

/// Failures raised by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A foreign key names a row that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors returned to HTTP callers.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "{}", _0)]
    BadRequest(String),

    #[display(fmt = "{}", _0)]
    Conflict(String),

    #[display(fmt = "Something went wrong, Contact with system admin")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::InvalidReference(detail) => ApiError::BadRequest(detail),
            RepositoryError::Database(e) => {
                error!(error = %e, "Store operation failed");
                ApiError::Internal
            }
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        match e {
            ReportError::Repository(e) => e.into(),
            lookup => ApiError::NotFound(lookup.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn error_body_carries_message() {
        let resp = ApiError::NotFound("Activity not found".into()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "Activity not found");
    }

    #[test]
    fn invalid_reference_maps_to_bad_request() {
        let api: ApiError = RepositoryError::InvalidReference("no role 9".into()).into();
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn report_lookup_failure_maps_to_not_found() {
        let api: ApiError = ReportError::EmployeeNotFound(7).into();
        assert_eq!(api.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(api.to_string(), "Employee 7 not found");
    }

    #[test]
    fn database_failure_hides_detail() {
        let api: ApiError = RepositoryError::Database(sqlx::Error::RowNotFound).into();
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            api.to_string(),
            "Something went wrong, Contact with system admin"
        );
    }
}
