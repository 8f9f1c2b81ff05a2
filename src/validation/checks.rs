//! Field-specific payload checkers.
//!
//! Each checker looks at one named field and only fires when the field is
//! present with a string value; structural typing is the engine's job.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, AppResult, ErrorKind};

use super::Payload;

/// Wire format for every datetime field.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+( \w+)*$").expect("valid regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").expect("valid regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+?[1-9][0-9]*)?([ -]*[0-9 ]*)+$").expect("valid regex"));

static DATETIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}$").expect("valid regex"));

fn invalid(key: &str) -> AppError {
    AppError::Validation(ErrorKind::InvalidFormat, format!("invalid field: {}", key))
}

/// Word-character tokens separated by single spaces, no leading or trailing
/// space.
pub fn check_name(payload: &Payload, key: &str) -> AppResult<()> {
    if let Some(value) = payload.get(key).and_then(|v| v.as_str()) {
        if !NAME_RE.is_match(value) {
            return Err(invalid(key));
        }
    }
    Ok(())
}

pub fn check_email(payload: &Payload, key: &str) -> AppResult<()> {
    if let Some(value) = payload.get(key).and_then(|v| v.as_str()) {
        if !EMAIL_RE.is_match(value) {
            return Err(invalid(key));
        }
    }
    Ok(())
}

/// Optional leading `+` and country code, then digits, spaces and hyphens.
pub fn check_phone(payload: &Payload, key: &str) -> AppResult<()> {
    if let Some(value) = payload.get(key).and_then(|v| v.as_str()) {
        if !PHONE_RE.is_match(value) {
            return Err(invalid(key));
        }
    }
    Ok(())
}

/// Validate and parse a `YYYY-MM-DDTHH:MM` field.
///
/// Returns the parsed timestamp for downstream comparisons instead of
/// writing it back into the payload; the payload itself is never mutated
/// during checking. `Ok(None)` means the field is absent (or null).
pub fn check_datetime(payload: &Payload, key: &str) -> AppResult<Option<NaiveDateTime>> {
    let Some(value) = payload.get(key).and_then(|v| v.as_str()) else {
        return Ok(None);
    };
    if !DATETIME_RE.is_match(value) {
        return Err(AppError::Validation(
            ErrorKind::InvalidFormat,
            format!("field {} must have the format yyyy-mm-ddThh:mm", key),
        ));
    }
    match NaiveDateTime::parse_from_str(value, DATETIME_FORMAT) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(AppError::Validation(
            ErrorKind::InvalidValue,
            format!("invalid field: {}", key),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(key: &str, value: serde_json::Value) -> Payload {
        let mut map = Payload::new();
        map.insert(key.to_string(), value);
        map
    }

    fn kind_of(err: AppError) -> ErrorKind {
        match err {
            AppError::Validation(kind, _) => kind,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn name_accepts_space_separated_tokens() {
        assert!(check_name(&payload("name", json!("Power Drill")), "name").is_ok());
        assert!(check_name(&payload("name", json!("drill_2")), "name").is_ok());
    }

    #[test]
    fn name_rejects_double_and_edge_spaces() {
        for bad in ["", " drill", "drill ", "power  drill", "drill!"] {
            let err = check_name(&payload("name", json!(bad)), "name").unwrap_err();
            assert_eq!(kind_of(err), ErrorKind::InvalidFormat, "value {:?}", bad);
        }
    }

    #[test]
    fn name_skips_absent_field() {
        assert!(check_name(&Payload::new(), "name").is_ok());
    }

    #[test]
    fn email_shapes() {
        assert!(check_email(&payload("email", json!("ana.silva+x@mail-sv.co")), "email").is_ok());
        for bad in ["ana", "ana@", "@host.com", "ana@host", "ana silva@host.com"] {
            assert!(
                check_email(&payload("email", json!(bad)), "email").is_err(),
                "value {:?}",
                bad
            );
        }
    }

    #[test]
    fn phone_shapes() {
        for good in ["+351 912 345 678", "912345678", "91-234-5678"] {
            assert!(
                check_phone(&payload("phone", json!(good)), "phone").is_ok(),
                "value {:?}",
                good
            );
        }
        assert!(check_phone(&payload("phone", json!("phone: 912")), "phone").is_err());
    }

    #[test]
    fn datetime_parses_and_returns_value() {
        let parsed = check_datetime(&payload("date_start", json!("2024-01-01T10:30")), "date_start")
            .unwrap()
            .unwrap();
        assert_eq!(parsed.format(DATETIME_FORMAT).to_string(), "2024-01-01T10:30");
    }

    #[test]
    fn datetime_rejects_wrong_shape() {
        let err =
            check_datetime(&payload("date_start", json!("2024-01-01 10:30")), "date_start")
                .unwrap_err();
        assert_eq!(kind_of(err), ErrorKind::InvalidFormat);
    }

    #[test]
    fn datetime_rejects_impossible_calendar_date() {
        let err = check_datetime(&payload("date_start", json!("2024-02-30T10:00")), "date_start")
            .unwrap_err();
        assert_eq!(kind_of(err), ErrorKind::InvalidValue);
    }

    #[test]
    fn datetime_absent_is_none() {
        assert!(check_datetime(&Payload::new(), "date_start").unwrap().is_none());
    }
}
