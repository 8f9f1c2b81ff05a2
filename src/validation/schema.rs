//! Per-entity payload schemas.
//!
//! Purely declarative: each entity contributes one [`Schema`] const naming
//! its accepted fields with their type alternatives, the fields a creation
//! payload must carry, and the fields that are globally unique. The engine
//! in [`super`] consults these; adding an entity means adding a const here,
//! not touching the engine.

use serde_json::Value;

/// Semantic type accepted for a payload field. Nullability is expressed by
/// listing [`FieldType::Null`] as an explicit alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    Null,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Null => "null",
        }
    }

    /// Whether a JSON value inhabits this type. Booleans are not integers
    /// and floats are not integers.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Null => value.is_null(),
        }
    }
}

/// Declarative schema for one entity type.
pub struct Schema {
    pub entity: &'static str,
    /// field name -> accepted type alternatives
    pub fields: &'static [(&'static str, &'static [FieldType])],
    /// fields that must be present in a creation payload
    pub required: &'static [&'static str],
    /// fields whose values must be globally unique among persisted records
    pub unique: &'static [&'static str],
}

impl Schema {
    pub fn accepted_types(&self, field: &str) -> Option<&'static [FieldType]> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, types)| *types)
    }
}

use FieldType::{Boolean, Integer, Null, String as Str};

// `confirm` and `token` are accepted keys on user payloads but are never
// copied into the entity; `confirm` only feeds the password-equality rule.
pub const USER: Schema = Schema {
    entity: "user",
    fields: &[
        ("first_name", &[Str]),
        ("last_name", &[Str]),
        ("email", &[Str]),
        ("password", &[Str]),
        ("confirm", &[Str]),
        ("admin", &[Boolean]),
        ("token", &[Str, Null]),
    ],
    required: &["first_name", "last_name", "email", "password", "confirm"],
    unique: &["email", "token"],
};

pub const THIRDPARTY: Schema = Schema {
    entity: "thirdparty",
    fields: &[
        ("first_name", &[Str]),
        ("last_name", &[Str]),
        ("email", &[Str]),
        ("phone", &[Str, Null]),
    ],
    required: &["first_name", "last_name", "email"],
    unique: &["email"],
};

pub const CATEGORY: Schema = Schema {
    entity: "category",
    fields: &[("name", &[Str]), ("description", &[Str, Null])],
    required: &["name"],
    unique: &["name"],
};

pub const ITEM: Schema = Schema {
    entity: "item",
    fields: &[
        ("registry", &[Str, Null]),
        ("name", &[Str]),
        ("description", &[Str, Null]),
        ("available", &[Boolean]),
        ("category_id", &[Integer, Null]),
    ],
    required: &["name"],
    unique: &["registry"],
};

// The reference keys must be present in a creation payload even though
// their values may be null.
pub const LENDING: Schema = Schema {
    entity: "lending",
    fields: &[
        ("date_start", &[Str]),
        ("date_end", &[Str]),
        ("date_return", &[Str, Null]),
        ("item_id", &[Integer, Null]),
        ("user_id", &[Integer, Null]),
        ("thirdparty_id", &[Integer, Null]),
    ],
    required: &["date_start", "date_end", "item_id", "user_id", "thirdparty_id"],
    unique: &[],
};

pub const RESERVATION: Schema = Schema {
    entity: "reservation",
    fields: &[
        ("name", &[Str]),
        ("description", &[Str, Null]),
        ("date_start", &[Str]),
        ("date_end", &[Str]),
        ("user_id", &[Integer, Null]),
        ("thirdparty_id", &[Integer, Null]),
    ],
    required: &["name", "date_start", "date_end"],
    unique: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_does_not_match_bool_or_float() {
        assert!(FieldType::Integer.matches(&json!(3)));
        assert!(!FieldType::Integer.matches(&json!(true)));
        assert!(!FieldType::Integer.matches(&json!(3.5)));
    }

    #[test]
    fn accepted_types_lookup() {
        let types = ITEM.accepted_types("category_id").unwrap();
        assert_eq!(types, &[Integer, Null]);
        assert!(ITEM.accepted_types("barcode").is_none());
    }
}
