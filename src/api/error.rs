//! Problem-details error responses.
//!
//! | Kind | Status |
//! |------|--------|
//! | Validation | 400 |
//! | NotFound | 404 |
//! | Conflict | 409 |
//! | everything else | 500 |

use crate::error::{AppError, ValidationErrors};
use crate::AppState;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

/// Error body returned for every failed request
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    pub status: u16,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
    /// Correlation id, also written to the log
    pub trace_id: String,
}

/// An `AppError` bound to the response policy of the running service
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    expose_internal: bool,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl AppState {
    /// Attach the error-detail policy to a service error
    pub fn reject(&self, error: AppError) -> ApiError {
        ApiError {
            error,
            expose_internal: self.expose_internal_errors,
        }
    }
}

fn validation_body(errors: &ValidationErrors) -> Option<serde_json::Value> {
    serde_json::to_value(errors).ok()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let trace_id = Uuid::new_v4().to_string();
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let (title, detail, errors) = match &self.error {
            AppError::Validation(errors) => (
                "One or more validation errors occurred.",
                None,
                validation_body(errors),
            ),
            AppError::NotFound(msg) => ("Resource not found.", Some(msg.clone()), None),
            AppError::Conflict(msg) => {
                warn!(trace_id = %trace_id, conflict = %msg, "Request failed with conflict");
                ("Database update failed.", Some(msg.clone()), None)
            }
            other => {
                error!(trace_id = %trace_id, error = %other, "Unexpected error");
                let detail = if self.expose_internal {
                    other.to_string()
                } else {
                    "Please try again later.".to_string()
                };
                ("An unexpected error occurred.", Some(detail), None)
            }
        };

        let body = ProblemDetails {
            status: status.as_u16(),
            title: title.to_string(),
            detail,
            errors,
            trace_id,
        };

        (status, Json(body)).into_response()
    }
}
