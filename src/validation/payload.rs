//! Typed accessors over the raw key-value payload.
//!
//! Entity services copy payload fields into their models one named field at
//! a time through these helpers; nothing is ever assigned from an untrusted
//! key. For nullable columns the outer `Option` distinguishes "key absent"
//! (keep the stored value on update) from an explicit JSON null (clear it).

use super::Payload;

pub fn str_field<'a>(payload: &'a Payload, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(|v| v.as_str())
}

pub fn opt_str_field(payload: &Payload, key: &str) -> Option<Option<String>> {
    payload.get(key).map(|v| v.as_str().map(str::to_string))
}

pub fn int_field(payload: &Payload, key: &str) -> Option<i64> {
    payload.get(key).and_then(|v| v.as_i64())
}

pub fn opt_int_field(payload: &Payload, key: &str) -> Option<Option<i64>> {
    payload.get(key).map(|v| v.as_i64())
}

pub fn bool_field(payload: &Payload, key: &str) -> Option<bool> {
    payload.get(key).and_then(|v| v.as_bool())
}
