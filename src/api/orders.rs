use super::{body_error, path_error, ApiResult};
use crate::models::{CreateOrderRequest, OrderDetails, OrderSummary};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list).post(create))
        .route("/orders/{id}", get(get_by_id))
}

/// POST /orders
async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload.map_err(|e| state.reject(body_error(e)))?;
    let created = state
        .orders
        .create_order(&request)
        .await
        .map_err(|e| state.reject(e))?;

    let location = format!("/orders/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// GET /orders
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<OrderSummary>>> {
    let orders = state
        .orders
        .list_orders()
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(orders))
}

/// GET /orders/{id}
async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<OrderDetails>> {
    let Path(id) = id.map_err(|e| state.reject(path_error(e)))?;
    let order = state
        .orders
        .get_order(id)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(order))
}
