//! Lending model and side-effect contract

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use super::{minute_format, minute_format_opt};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Lending {
    pub id: i64,
    #[serde(with = "minute_format")]
    pub date_start: NaiveDateTime,
    #[serde(with = "minute_format")]
    pub date_end: NaiveDateTime,
    #[serde(with = "minute_format_opt")]
    pub date_return: Option<NaiveDateTime>,
    pub item_id: Option<i64>,
    pub user_id: Option<i64>,
    pub thirdparty_id: Option<i64>,
}

/// Insert payload after validation
#[derive(Debug)]
pub struct NewLending {
    pub date_start: NaiveDateTime,
    pub date_end: NaiveDateTime,
    pub date_return: Option<NaiveDateTime>,
    pub item_id: Option<i64>,
    pub user_id: Option<i64>,
    pub thirdparty_id: Option<i64>,
}

/// Secondary mutation decided during validation and applied by the
/// repository in the same transaction as the primary write. Rule checking
/// itself never mutates anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    MarkItemUnavailable(i64),
}
