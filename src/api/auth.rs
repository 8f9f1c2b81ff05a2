//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    services::auth::LoginResponse,
    validation::Payload,
    AppState,
};

use super::CurrentUser;

/// Validate credentials and hand out the user's token.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Payload>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.services.auth.login(&payload).await?;
    Ok(Json(response))
}

/// Revoke the current token on every device.
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<StatusCode> {
    state.services.auth.logout(&user).await?;
    Ok(StatusCode::NO_CONTENT)
}
