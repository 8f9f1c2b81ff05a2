//! Stockroom Server
//!
//! A Rust implementation of the Stockroom inventory server, providing a
//! REST JSON API for managing lendable items, their borrowers, and the
//! lendings and reservations that tie them together.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
