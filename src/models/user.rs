//! User model
//!
//! Every user has a first name, last name, email and password hash, and may
//! be an admin. The login token and its expiry live on the user row.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// User model from database. The password hash and token never leave the
/// server: both are skipped during serialization.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub admin: bool,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    #[serde(skip_serializing)]
    pub token_expiry: Option<NaiveDateTime>,
}

/// Insert payload after validation and password hashing
#[derive(Debug)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_redacts_credentials() {
        let user = User {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            email: "ana@example.com".to_string(),
            password: "$argon2id$hash".to_string(),
            admin: false,
            token: Some("secret-token".to_string()),
            token_expiry: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["email"], "ana@example.com");
        assert!(json.get("password").is_none());
        assert!(json.get("token").is_none());
        assert!(json.get("token_expiry").is_none());
    }
}
