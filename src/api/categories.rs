//! Category endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{error::AppResult, models::category::Category, validation::Payload, AppState};

use super::CurrentUser;

pub async fn list_categories(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.categories.list().await?;
    Ok(Json(categories))
}

pub async fn get_category(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let category = state.services.categories.get(id).await?;
    Ok(Json(category))
}

pub async fn create_category(
    State(state): State<AppState>,
    _current: CurrentUser,
    Json(payload): Json<Payload>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let created = state.services.categories.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_category(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<Payload>,
) -> AppResult<Json<Category>> {
    let updated = state.services.categories.update(id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_category(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
