use super::ApiResult;
use crate::models::DailyReport;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new().route("/reports/daily", get(daily))
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub date: Option<String>,
}

/// GET /reports/daily?date=YYYY-MM-DD
async fn daily(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<DailyReport>> {
    let report = state
        .reports
        .daily_report(query.date.as_deref())
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(report))
}
