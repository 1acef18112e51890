//! HTTP transport shell over the services.
//!
//! Routes:
//! - `GET /` health
//! - `/menu`, `/menu/{id}` catalog search and management
//! - `/orders`, `/orders/{id}` order submission and reads
//! - `/reports/daily?date=YYYY-MM-DD`

pub mod error;
mod menu;
mod orders;
mod reports;

pub use error::{ApiError, ApiResult, ProblemDetails};

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .merge(menu::router())
        .merge(orders::router())
        .merge(reports::router())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "name": "Restaurant API",
        "status": "running",
    }))
}

/// Unreadable JSON bodies are reported like any other validation failure
fn body_error(rejection: JsonRejection) -> AppError {
    AppError::validation("body", rejection.body_text())
}

/// Non-numeric ids in the path, e.g. `/orders/abc`
fn path_error(rejection: PathRejection) -> AppError {
    AppError::validation("id", rejection.body_text())
}
