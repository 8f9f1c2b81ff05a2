//! Item model
//!
//! Items optionally carry a registry code (unique when present) and a
//! category reference that is detached to null when the category goes away.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub registry: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub available: bool,
    pub category_id: Option<i64>,
}

/// Insert payload after validation
#[derive(Debug)]
pub struct NewItem {
    pub registry: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub available: bool,
    pub category_id: Option<i64>,
}
