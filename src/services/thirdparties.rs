//! Thirdparty management service

use crate::{
    error::{AppError, AppResult, ErrorKind},
    models::thirdparty::{NewThirdparty, Thirdparty},
    repository::Repository,
    validation::{
        checks::{check_email, check_name, check_phone},
        payload::{opt_str_field, str_field},
        schema, validate_structure, Payload,
    },
};

#[derive(Clone)]
pub struct ThirdpartiesService {
    repository: Repository,
}

impl ThirdpartiesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Thirdparty>> {
        self.repository.thirdparties.list().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Thirdparty> {
        self.repository.thirdparties.get(id).await
    }

    pub async fn create(&self, payload: Payload) -> AppResult<Thirdparty> {
        validate_structure(&payload, &schema::THIRDPARTY, true)?;
        check_name(&payload, "first_name")?;
        check_name(&payload, "last_name")?;
        check_email(&payload, "email")?;
        check_phone(&payload, "phone")?;

        if let Some(email) = str_field(&payload, "email") {
            if self.repository.thirdparties.email_exists(email, None).await? {
                return Err(AppError::Validation(
                    ErrorKind::DuplicateUnique,
                    "email already in use".to_string(),
                ));
            }
        }

        let thirdparty = NewThirdparty {
            first_name: owned(&payload, "first_name")?,
            last_name: owned(&payload, "last_name")?,
            email: owned(&payload, "email")?,
            phone: opt_str_field(&payload, "phone").flatten(),
        };

        self.repository.thirdparties.create(&thirdparty).await
    }

    pub async fn update(&self, id: i64, payload: Payload) -> AppResult<Thirdparty> {
        let mut thirdparty = self.repository.thirdparties.get(id).await?;

        validate_structure(&payload, &schema::THIRDPARTY, false)?;
        check_name(&payload, "first_name")?;
        check_name(&payload, "last_name")?;
        check_email(&payload, "email")?;
        check_phone(&payload, "phone")?;

        // Uniqueness only matters when the email is actually changing.
        if let Some(email) = str_field(&payload, "email") {
            if email != thirdparty.email
                && self.repository.thirdparties.email_exists(email, Some(id)).await?
            {
                return Err(AppError::Validation(
                    ErrorKind::DuplicateUnique,
                    "email already in use".to_string(),
                ));
            }
        }

        if let Some(value) = str_field(&payload, "first_name") {
            thirdparty.first_name = value.to_string();
        }
        if let Some(value) = str_field(&payload, "last_name") {
            thirdparty.last_name = value.to_string();
        }
        if let Some(value) = str_field(&payload, "email") {
            thirdparty.email = value.to_string();
        }
        if let Some(value) = opt_str_field(&payload, "phone") {
            thirdparty.phone = value;
        }

        self.repository.thirdparties.update(&thirdparty).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.thirdparties.get(id).await?;
        self.repository.thirdparties.delete(id).await
    }
}

fn owned(payload: &Payload, key: &str) -> AppResult<String> {
    str_field(payload, key).map(str::to_string).ok_or_else(|| {
        AppError::Validation(ErrorKind::MissingRequired, format!("required field: {}", key))
    })
}
