//! Reservation endpoints
//!
//! The two listing endpoints are public so the schedule can be displayed
//! without logging in; everything else needs a token.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{error::AppResult, models::reservation::Reservation, validation::Payload, AppState};

use super::CurrentUser;

pub async fn list_open_reservations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.services.reservations.list_open().await?;
    Ok(Json(reservations))
}

pub async fn list_all_reservations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.services.reservations.list_all().await?;
    Ok(Json(reservations))
}

pub async fn get_reservation(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.reservations.get(id).await?;
    Ok(Json(reservation))
}

pub async fn create_reservation(
    State(state): State<AppState>,
    _current: CurrentUser,
    Json(payload): Json<Payload>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let created = state.services.reservations.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_reservation(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<Payload>,
) -> AppResult<Json<Reservation>> {
    let updated = state.services.reservations.update(id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_reservation(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.reservations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
