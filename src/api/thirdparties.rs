//! Thirdparty endpoints
//!
//! Creation is open (self-registration); everything else needs a token.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{error::AppResult, models::thirdparty::Thirdparty, validation::Payload, AppState};

use super::CurrentUser;

pub async fn list_thirdparties(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> AppResult<Json<Vec<Thirdparty>>> {
    let thirdparties = state.services.thirdparties.list().await?;
    Ok(Json(thirdparties))
}

pub async fn get_thirdparty(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Thirdparty>> {
    let thirdparty = state.services.thirdparties.get(id).await?;
    Ok(Json(thirdparty))
}

pub async fn create_thirdparty(
    State(state): State<AppState>,
    Json(payload): Json<Payload>,
) -> AppResult<(StatusCode, Json<Thirdparty>)> {
    let created = state.services.thirdparties.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_thirdparty(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<Payload>,
) -> AppResult<Json<Thirdparty>> {
    let updated = state.services.thirdparties.update(id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_thirdparty(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.thirdparties.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
