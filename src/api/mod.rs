//! API handlers for the Stockroom REST endpoints
//!
//! Thin plumbing: handlers deserialize the raw payload, call the matching
//! service operation and let `AppError`'s response mapping pick the status
//! code.

pub mod auth;
pub mod categories;
pub mod health;
pub mod items;
pub mod lendings;
pub mod reservations;
pub mod thirdparties;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{
    error::{AppError, AppResult},
    models::user::User,
    AppState,
};

/// Per-request authenticated user, resolved from the Authorization header.
///
/// Explicit context value threaded into each handler; there is no global
/// "current user" anywhere.
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// Only admins may manage user accounts.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.0.admin {
            Ok(())
        } else {
            Err(AppError::Authorization("admin required".to_string()))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("token required".to_string()))?;

        // Accept both `Bearer <token>` and a bare token.
        let token = auth_header
            .split_whitespace()
            .last()
            .ok_or_else(|| AppError::Authentication("token required".to_string()))?;

        let user = state.services.auth.authenticate(token).await?;
        Ok(CurrentUser(user))
    }
}
