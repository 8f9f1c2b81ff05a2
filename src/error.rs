//! Error types for the Stockroom server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Classification of rule violations and lookup failures.
///
/// Every failure carries exactly one kind; the first failing check wins and
/// no multi-error aggregation is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyPayload,
    UnknownField,
    TypeMismatch,
    MissingRequired,
    InvalidFormat,
    InvalidValue,
    DuplicateUnique,
    ReferenceNotFound,
    ReferenceUnavailable,
    OverlapConflict,
    NotFound,
    StoreError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyPayload => "EmptyPayload",
            ErrorKind::UnknownField => "UnknownField",
            ErrorKind::TypeMismatch => "TypeMismatch",
            ErrorKind::MissingRequired => "MissingRequired",
            ErrorKind::InvalidFormat => "InvalidFormat",
            ErrorKind::InvalidValue => "InvalidValue",
            ErrorKind::DuplicateUnique => "DuplicateUnique",
            ErrorKind::ReferenceNotFound => "ReferenceNotFound",
            ErrorKind::ReferenceUnavailable => "ReferenceUnavailable",
            ErrorKind::OverlapConflict => "OverlapConflict",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::StoreError => "StoreError",
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{1}")]
    Validation(ErrorKind, String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized", msg.clone())
            }
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, "Forbidden", msg.clone()),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorKind::NotFound.as_str(),
                msg.clone(),
            ),
            AppError::Validation(kind, msg) => {
                (StatusCode::BAD_REQUEST, kind.as_str(), msg.clone())
            }
            // A uniqueness race lost at commit time lands here and is
            // reported opaquely; no partial state survives the failed
            // transaction.
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorKind::StoreError.as_str(),
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { code, message });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
