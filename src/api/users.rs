//! User management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{error::AppResult, models::user::User, validation::Payload, AppState};

use super::CurrentUser;

pub async fn list_users(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.list().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = state.services.users.get(id).await?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<Payload>,
) -> AppResult<(StatusCode, Json<User>)> {
    current.require_admin()?;
    let created = state.services.users.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<Payload>,
) -> AppResult<Json<User>> {
    current.require_admin()?;
    let updated = state.services.users.update(id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    current.require_admin()?;
    state.services.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
