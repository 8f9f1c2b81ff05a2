//! Structural payload validation.
//!
//! The engine is stateless: it checks a raw request payload against a
//! declarative [`schema::Schema`] without touching the database. Semantic
//! rules (uniqueness, existence, overlap) live in the services layer.

pub mod checks;
pub mod payload;
pub mod schema;

use serde_json::Value;

use crate::error::{AppError, AppResult, ErrorKind};

use schema::{FieldType, Schema};

/// Raw key-value request body for a create/update operation.
pub type Payload = serde_json::Map<String, Value>;

/// Check a payload against an entity schema.
///
/// Fixed order, first failure aborts: empty payload, unknown field, type
/// mismatch, then (creation only) missing required field. The payload is
/// not modified.
pub fn validate_structure(payload: &Payload, schema: &Schema, is_create: bool) -> AppResult<()> {
    if payload.is_empty() {
        return Err(AppError::Validation(
            ErrorKind::EmptyPayload,
            "empty request".to_string(),
        ));
    }

    for key in payload.keys() {
        if schema.accepted_types(key).is_none() {
            return Err(AppError::Validation(
                ErrorKind::UnknownField,
                format!("invalid field: {}", key),
            ));
        }
    }

    for (key, value) in payload {
        let accepted = schema
            .accepted_types(key)
            .ok_or_else(|| AppError::Internal(format!("schema lost field {}", key)))?;
        if !accepted.iter().any(|t| t.matches(value)) {
            let names: Vec<&str> = accepted.iter().map(FieldType::as_str).collect();
            return Err(AppError::Validation(
                ErrorKind::TypeMismatch,
                format!("{} must be of type(s): {}", key, names.join(", ")),
            ));
        }
    }

    if is_create {
        for key in schema.required {
            if !payload.contains_key(*key) {
                return Err(AppError::Validation(
                    ErrorKind::MissingRequired,
                    format!("required field: {}", key),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        serde_json::from_value(value).unwrap()
    }

    fn kind(result: AppResult<()>) -> ErrorKind {
        match result.unwrap_err() {
            AppError::Validation(kind, _) => kind,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert_eq!(
            kind(validate_structure(&Payload::new(), &schema::CATEGORY, false)),
            ErrorKind::EmptyPayload
        );
    }

    #[test]
    fn unknown_field_wins_over_missing_required() {
        // Unknown keys are reported before the required scan runs.
        let p = payload(json!({"color": "red"}));
        assert_eq!(
            kind(validate_structure(&p, &schema::ITEM, true)),
            ErrorKind::UnknownField
        );
    }

    #[test]
    fn type_mismatch_names_the_accepted_types() {
        let p = payload(json!({"name": "Tools", "description": 7}));
        match validate_structure(&p, &schema::CATEGORY, false).unwrap_err() {
            AppError::Validation(ErrorKind::TypeMismatch, msg) => {
                assert_eq!(msg, "description must be of type(s): string, null");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn null_is_a_first_class_accepted_type() {
        let p = payload(json!({"name": "Tools", "description": null}));
        assert!(validate_structure(&p, &schema::CATEGORY, false).is_ok());

        // name is string-only, so null there is a type mismatch
        let p = payload(json!({"name": null}));
        assert_eq!(
            kind(validate_structure(&p, &schema::CATEGORY, false)),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn required_enforced_only_on_create() {
        let p = payload(json!({"description": "spares"}));
        assert_eq!(
            kind(validate_structure(&p, &schema::CATEGORY, true)),
            ErrorKind::MissingRequired
        );
        assert!(validate_structure(&p, &schema::CATEGORY, false).is_ok());
    }

    #[test]
    fn lending_reference_keys_required_but_nullable() {
        let p = payload(json!({
            "date_start": "2024-01-01T10:00",
            "date_end": "2024-01-02T10:00",
            "item_id": null,
            "user_id": null,
            "thirdparty_id": null
        }));
        assert!(validate_structure(&p, &schema::LENDING, true).is_ok());

        let p = payload(json!({
            "date_start": "2024-01-01T10:00",
            "date_end": "2024-01-02T10:00"
        }));
        assert_eq!(
            kind(validate_structure(&p, &schema::LENDING, true)),
            ErrorKind::MissingRequired
        );
    }
}
