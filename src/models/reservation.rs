//! Reservation model

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use super::minute_format;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Reservation {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "minute_format")]
    pub date_start: NaiveDateTime,
    #[serde(with = "minute_format")]
    pub date_end: NaiveDateTime,
    pub user_id: Option<i64>,
    pub thirdparty_id: Option<i64>,
}

/// Insert payload after validation
#[derive(Debug)]
pub struct NewReservation {
    pub name: String,
    pub description: Option<String>,
    pub date_start: NaiveDateTime,
    pub date_end: NaiveDateTime,
    pub user_id: Option<i64>,
    pub thirdparty_id: Option<i64>,
}
