//! Category model

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Insert payload after validation
#[derive(Debug)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}
