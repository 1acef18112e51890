use super::{body_error, path_error, ApiResult};
use crate::error::{AppError, ValidationErrors};
use crate::models::{MenuItem, MenuItemInput};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu", get(list).post(create))
        .route("/menu/{id}", get(get_by_id).put(update).delete(delete))
}

/// GET /menu query string
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

fn parse_price(field: &str, raw: Option<&str>, errors: &mut ValidationErrors) -> Option<Decimal> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match Decimal::from_str(raw) {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, format!("{} must be a decimal number.", field));
            None
        }
    }
}

/// GET /menu?q=&category=&minPrice=&maxPrice=
async fn list(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> ApiResult<Json<Vec<MenuItem>>> {
    let mut errors = ValidationErrors::new();
    let min_price = parse_price("minPrice", query.min_price.as_deref(), &mut errors);
    let max_price = parse_price("maxPrice", query.max_price.as_deref(), &mut errors);
    if !errors.is_empty() {
        return Err(state.reject(AppError::Validation(errors)));
    }

    let items = state
        .catalog
        .search(
            query.q.as_deref(),
            query.category.as_deref(),
            min_price,
            max_price,
        )
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(items))
}

/// GET /menu/{id}
async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<MenuItem>> {
    let Path(id) = id.map_err(|e| state.reject(path_error(e)))?;
    let item = state
        .catalog
        .get_menu_item(id)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(item))
}

/// POST /menu
async fn create(
    State(state): State<AppState>,
    payload: Result<Json<MenuItemInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload.map_err(|e| state.reject(body_error(e)))?;
    let item = state
        .catalog
        .create_menu_item(&input)
        .await
        .map_err(|e| state.reject(e))?;

    let location = format!("/menu/{}", item.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}

/// PUT /menu/{id}
async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<MenuItemInput>, JsonRejection>,
) -> ApiResult<Json<MenuItem>> {
    let Path(id) = id.map_err(|e| state.reject(path_error(e)))?;
    let Json(input) = payload.map_err(|e| state.reject(body_error(e)))?;
    let item = state
        .catalog
        .update_menu_item(id, &input)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(item))
}

/// DELETE /menu/{id}
async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id.map_err(|e| state.reject(path_error(e)))?;
    state
        .catalog
        .delete_menu_item(id)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(StatusCode::NO_CONTENT)
}
