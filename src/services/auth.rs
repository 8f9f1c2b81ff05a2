//! Token authentication service
//!
//! Opaque URL-safe tokens stored on the user row. Login reuses the stored
//! token while it is still comfortably inside its lifetime and rotates it
//! otherwise; logout revokes it outright.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use rand::RngCore;
use serde::Serialize;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult, ErrorKind},
    models::user::User,
    repository::Repository,
    validation::{payload::str_field, Payload},
};

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against its stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Successful login body
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Validate credentials and return the user's token, rotating it when
    /// the stored one is missing or about to expire.
    pub async fn login(&self, payload: &Payload) -> AppResult<LoginResponse> {
        let (Some(email), Some(password)) =
            (str_field(payload, "email"), str_field(payload, "password"))
        else {
            return Err(AppError::Validation(
                ErrorKind::MissingRequired,
                "missing fields".to_string(),
            ));
        };

        let user = self
            .repository
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("invalid email address".to_string()))?;

        if !verify_password(&user.password, password)? {
            return Err(AppError::Authentication("incorrect password".to_string()));
        }

        let now = Utc::now().naive_utc();
        let token = match user.token {
            Some(token) if token_reusable(user.token_expiry, now) => token,
            _ => {
                let token = generate_token();
                let expiry = now + Duration::seconds(self.config.token_ttl_secs);
                self.repository.users.set_token(user.id, &token, expiry).await?;
                token
            }
        };

        Ok(LoginResponse {
            message: "use this token as the Authorization header".to_string(),
            token,
        })
    }

    /// Resolve a presented token to its user.
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        self.repository
            .users
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::Authentication("invalid token".to_string()))
    }

    /// Revoke the user's current token on every device.
    pub async fn logout(&self, user: &User) -> AppResult<()> {
        let expiry = Utc::now().naive_utc() - Duration::seconds(1);
        self.repository.users.clear_token(user.id, expiry).await
    }
}

/// A stored token may be handed out again only while its expiry is at
/// least one minute away; anything closer is rotated so the caller never
/// receives a token about to die under it.
fn token_reusable(expiry: Option<chrono::NaiveDateTime>, now: chrono::NaiveDateTime) -> bool {
    match expiry {
        Some(expiry) => expiry - Duration::seconds(60) > now,
        None => false,
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password(&hash, "s3cret").unwrap());
        assert!(!verify_password(&hash, "wrong").unwrap());
    }

    #[test]
    fn expired_or_expiring_tokens_are_not_reused() {
        let now = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        assert!(token_reusable(Some(now + Duration::seconds(3600)), now));
        // inside the one-minute rotation margin
        assert!(!token_reusable(Some(now + Duration::seconds(30)), now));
        assert!(!token_reusable(Some(now - Duration::seconds(1)), now));
        assert!(!token_reusable(None, now));
    }

    #[test]
    fn tokens_are_url_safe_and_distinct() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
