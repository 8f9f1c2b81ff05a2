//! Thirdparty model
//!
//! External people (non-users) who can borrow items or hold reservations.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Thirdparty {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Insert payload after validation
#[derive(Debug)]
pub struct NewThirdparty {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}
