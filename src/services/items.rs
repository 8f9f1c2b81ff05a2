//! Item management service

use crate::{
    error::{AppError, AppResult, ErrorKind},
    models::item::{Item, NewItem},
    repository::Repository,
    validation::{
        payload::{bool_field, opt_int_field, opt_str_field, str_field},
        schema, validate_structure, Payload,
    },
};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Item>> {
        self.repository.items.list().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Item> {
        self.repository.items.get(id).await
    }

    /// Create a new item. Item names are free-form text; no format rule
    /// applies to them.
    pub async fn create(&self, payload: Payload) -> AppResult<Item> {
        validate_structure(&payload, &schema::ITEM, true)?;

        if let Some(Some(registry)) = opt_str_field(&payload, "registry") {
            if self.repository.items.registry_exists(&registry, None).await? {
                return Err(AppError::Validation(
                    ErrorKind::DuplicateUnique,
                    "registry already in use".to_string(),
                ));
            }
        }

        self.check_category(&payload).await?;

        let item = NewItem {
            registry: opt_str_field(&payload, "registry").flatten(),
            name: str_field(&payload, "name")
                .map(str::to_string)
                .ok_or_else(|| {
                    AppError::Validation(
                        ErrorKind::MissingRequired,
                        "required field: name".to_string(),
                    )
                })?,
            description: opt_str_field(&payload, "description").flatten(),
            available: bool_field(&payload, "available").unwrap_or(true),
            category_id: opt_int_field(&payload, "category_id").flatten(),
        };

        self.repository.items.create(&item).await
    }

    pub async fn update(&self, id: i64, payload: Payload) -> AppResult<Item> {
        let mut item = self.repository.items.get(id).await?;

        validate_structure(&payload, &schema::ITEM, false)?;

        // Uniqueness only matters when a non-null registry is actually
        // changing.
        if let Some(Some(registry)) = opt_str_field(&payload, "registry") {
            if item.registry.as_deref() != Some(registry.as_str())
                && self.repository.items.registry_exists(&registry, Some(id)).await?
            {
                return Err(AppError::Validation(
                    ErrorKind::DuplicateUnique,
                    "registry already in use".to_string(),
                ));
            }
        }

        self.check_category(&payload).await?;

        if let Some(value) = opt_str_field(&payload, "registry") {
            item.registry = value;
        }
        if let Some(value) = str_field(&payload, "name") {
            item.name = value.to_string();
        }
        if let Some(value) = opt_str_field(&payload, "description") {
            item.description = value;
        }
        if let Some(value) = bool_field(&payload, "available") {
            item.available = value;
        }
        if let Some(value) = opt_int_field(&payload, "category_id") {
            item.category_id = value;
        }

        self.repository.items.update(&item).await
    }

    /// Delete an item; lendings referencing it are detached, not removed.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.items.get(id).await?;
        self.repository.items.delete(id).await
    }

    /// A non-null category_id must point at an existing category.
    async fn check_category(&self, payload: &Payload) -> AppResult<()> {
        if let Some(Some(category_id)) = opt_int_field(payload, "category_id") {
            if self.repository.categories.find(category_id).await?.is_none() {
                return Err(AppError::Validation(
                    ErrorKind::ReferenceNotFound,
                    "category does not exist".to_string(),
                ));
            }
        }
        Ok(())
    }
}
