//! Item endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{error::AppResult, models::item::Item, validation::Payload, AppState};

use super::CurrentUser;

pub async fn list_items(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> AppResult<Json<Vec<Item>>> {
    let items = state.services.items.list().await?;
    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Item>> {
    let item = state.services.items.get(id).await?;
    Ok(Json(item))
}

pub async fn create_item(
    State(state): State<AppState>,
    _current: CurrentUser,
    Json(payload): Json<Payload>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let created = state.services.items.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_item(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<Payload>,
) -> AppResult<Json<Item>> {
    let updated = state.services.items.update(id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_item(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.items.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
