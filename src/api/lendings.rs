//! Lending endpoints
//!
//! `GET /lendings` lists open lendings only; `/lendings/all` includes the
//! returned ones.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{error::AppResult, models::lending::Lending, validation::Payload, AppState};

use super::CurrentUser;

pub async fn list_open_lendings(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> AppResult<Json<Vec<Lending>>> {
    let lendings = state.services.lendings.list_open().await?;
    Ok(Json(lendings))
}

pub async fn list_all_lendings(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> AppResult<Json<Vec<Lending>>> {
    let lendings = state.services.lendings.list_all().await?;
    Ok(Json(lendings))
}

pub async fn get_lending(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Lending>> {
    let lending = state.services.lendings.get(id).await?;
    Ok(Json(lending))
}

pub async fn create_lending(
    State(state): State<AppState>,
    _current: CurrentUser,
    Json(payload): Json<Payload>,
) -> AppResult<(StatusCode, Json<Lending>)> {
    let created = state.services.lendings.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_lending(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<Payload>,
) -> AppResult<Json<Lending>> {
    let updated = state.services.lendings.update(id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_lending(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.lendings.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
