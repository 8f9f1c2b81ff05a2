//! Category management service

use crate::{
    error::{AppError, AppResult, ErrorKind},
    models::category::{Category, NewCategory},
    repository::Repository,
    validation::{
        payload::{opt_str_field, str_field},
        schema, validate_structure, Payload,
    },
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Category> {
        self.repository.categories.get(id).await
    }

    pub async fn create(&self, payload: Payload) -> AppResult<Category> {
        validate_structure(&payload, &schema::CATEGORY, true)?;

        if let Some(name) = str_field(&payload, "name") {
            if self.repository.categories.name_exists(name, None).await? {
                return Err(AppError::Validation(
                    ErrorKind::DuplicateUnique,
                    "name already in use".to_string(),
                ));
            }
        }

        let category = NewCategory {
            name: str_field(&payload, "name")
                .map(str::to_string)
                .ok_or_else(|| {
                    AppError::Validation(
                        ErrorKind::MissingRequired,
                        "required field: name".to_string(),
                    )
                })?,
            description: opt_str_field(&payload, "description").flatten(),
        };

        self.repository.categories.create(&category).await
    }

    pub async fn update(&self, id: i64, payload: Payload) -> AppResult<Category> {
        let mut category = self.repository.categories.get(id).await?;

        validate_structure(&payload, &schema::CATEGORY, false)?;

        // Uniqueness only matters when the name is actually changing.
        if let Some(name) = str_field(&payload, "name") {
            if name != category.name
                && self.repository.categories.name_exists(name, Some(id)).await?
            {
                return Err(AppError::Validation(
                    ErrorKind::DuplicateUnique,
                    "name already in use".to_string(),
                ));
            }
        }

        if let Some(value) = str_field(&payload, "name") {
            category.name = value.to_string();
        }
        if let Some(value) = opt_str_field(&payload, "description") {
            category.description = value;
        }

        self.repository.categories.update(&category).await
    }

    /// Delete a category; items referencing it are detached, not removed.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.categories.get(id).await?;
        self.repository.categories.delete(id).await
    }
}
