//! User management service

use crate::{
    error::{AppError, AppResult, ErrorKind},
    models::user::{NewUser, User},
    repository::Repository,
    validation::{
        checks::{check_email, check_name},
        payload::{bool_field, str_field},
        schema, validate_structure, Payload,
    },
};

use super::auth::hash_password;

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    pub async fn get(&self, id: i64) -> AppResult<User> {
        self.repository.users.get(id).await
    }

    /// Create a new user
    pub async fn create(&self, payload: Payload) -> AppResult<User> {
        validate_structure(&payload, &schema::USER, true)?;
        check_name(&payload, "first_name")?;
        check_name(&payload, "last_name")?;
        check_email(&payload, "email")?;

        if let (Some(password), Some(confirm)) =
            (str_field(&payload, "password"), str_field(&payload, "confirm"))
        {
            if password != confirm {
                return Err(AppError::Validation(
                    ErrorKind::InvalidValue,
                    "password and confirm must match".to_string(),
                ));
            }
        }

        if let Some(email) = str_field(&payload, "email") {
            if self.repository.users.email_exists(email, None).await? {
                return Err(AppError::Validation(
                    ErrorKind::DuplicateUnique,
                    "email already in use".to_string(),
                ));
            }
        }

        let password = str_field(&payload, "password")
            .ok_or_else(|| {
                AppError::Validation(ErrorKind::MissingRequired, "required field: password".to_string())
            })?
            .to_string();

        let user = NewUser {
            first_name: owned(&payload, "first_name")?,
            last_name: owned(&payload, "last_name")?,
            email: owned(&payload, "email")?,
            password: hash_password(&password)?,
            admin: bool_field(&payload, "admin").unwrap_or(false),
        };

        self.repository.users.create(&user).await
    }

    /// Update an existing user. Absent fields keep their stored value; the
    /// password is not updatable through this operation. The admin flag
    /// follows the payload in both directions (only admins reach this
    /// operation).
    pub async fn update(&self, id: i64, payload: Payload) -> AppResult<User> {
        let mut user = self.repository.users.get(id).await?;

        validate_structure(&payload, &schema::USER, false)?;
        check_name(&payload, "first_name")?;
        check_name(&payload, "last_name")?;
        check_email(&payload, "email")?;

        if let Some(email) = str_field(&payload, "email") {
            if email != user.email && self.repository.users.email_exists(email, Some(id)).await? {
                return Err(AppError::Validation(
                    ErrorKind::DuplicateUnique,
                    "email already in use".to_string(),
                ));
            }
        }

        if let Some(value) = str_field(&payload, "first_name") {
            user.first_name = value.to_string();
        }
        if let Some(value) = str_field(&payload, "last_name") {
            user.last_name = value.to_string();
        }
        if let Some(value) = str_field(&payload, "email") {
            user.email = value.to_string();
        }
        if let Some(value) = bool_field(&payload, "admin") {
            user.admin = value;
        }

        self.repository.users.update(&user).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.users.get(id).await?;
        self.repository.users.delete(id).await
    }
}

fn owned(payload: &Payload, key: &str) -> AppResult<String> {
    str_field(payload, key).map(str::to_string).ok_or_else(|| {
        AppError::Validation(ErrorKind::MissingRequired, format!("required field: {}", key))
    })
}
