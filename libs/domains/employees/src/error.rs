use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::retry::Retryable;

#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("Invalid UUID format: {0}")]
    InvalidId(String),

    #[error("Employee not found: {0}")]
    NotFound(Uuid),

    #[error("Employee API not reachable at {url}. Is the mock employee server running?")]
    UpstreamUnavailable { url: String },

    #[error("Employee API rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Delete failed for employee: {0}")]
    DeleteRejected(String),

    #[error("Employee API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid employee payload: {0}")]
    Decode(String),
}

pub type EmployeeResult<T> = Result<T, EmployeeError>;

impl Retryable for EmployeeError {
    /// Only a rate-limited answer is worth another attempt
    fn is_retryable(&self) -> bool {
        matches!(self, EmployeeError::RateLimited(_))
    }
}

/// Convert EmployeeError to AppError for standardized error responses
impl From<EmployeeError> for AppError {
    fn from(err: EmployeeError) -> Self {
        let message = err.to_string();
        match err {
            EmployeeError::InvalidId(_) => AppError::InvalidUuid(message),
            EmployeeError::NotFound(_) => AppError::NotFound(message),
            EmployeeError::UpstreamUnavailable { .. } => AppError::UpstreamUnavailable(message),
            EmployeeError::RateLimited(_) => AppError::UpstreamRateLimited(message),
            EmployeeError::Upstream { .. } => AppError::UpstreamError(message),
            EmployeeError::DeleteRejected(_) | EmployeeError::Decode(_) => {
                AppError::InternalServerError(message)
            }
        }
    }
}

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_helpers::ErrorCode;

    #[test]
    fn test_only_rate_limited_is_retryable() {
        assert!(EmployeeError::RateLimited("slow down".into()).is_retryable());
        assert!(!EmployeeError::InvalidId("abc".into()).is_retryable());
        assert!(!EmployeeError::NotFound(Uuid::nil()).is_retryable());
        assert!(
            !EmployeeError::UpstreamUnavailable {
                url: "http://localhost:8112".into()
            }
            .is_retryable()
        );
        assert!(
            !EmployeeError::Upstream {
                status: 503,
                message: "busy".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_client_errors_map_to_distinct_statuses() {
        let invalid: AppError = EmployeeError::InvalidId("abc".into()).into();
        assert_eq!(
            invalid.status_and_code(),
            (StatusCode::BAD_REQUEST, ErrorCode::InvalidUuid)
        );

        let missing: AppError = EmployeeError::NotFound(Uuid::nil()).into();
        assert_eq!(
            missing.status_and_code(),
            (StatusCode::NOT_FOUND, ErrorCode::NotFound)
        );
    }

    #[test]
    fn test_delete_rejected_names_employee() {
        let err = EmployeeError::DeleteRejected("Tiger Nixon".into());
        assert_eq!(err.to_string(), "Delete failed for employee: Tiger Nixon");

        let app_error: AppError = err.into();
        assert_eq!(
            app_error.status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
        );
    }

    #[test]
    fn test_unavailable_message_mentions_url() {
        let err = EmployeeError::UpstreamUnavailable {
            url: "http://localhost:8112/api/v1/employee".into(),
        };
        assert!(
            err.to_string()
                .starts_with("Employee API not reachable at http://localhost:8112/api/v1/employee")
        );
    }
}
