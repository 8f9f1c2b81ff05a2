//! Items repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::item::{Item, NewItem},
};

const COLUMNS: &str = "id, registry, name, description, available, category_id";

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, Item>(&format!("SELECT {} FROM items ORDER BY id", COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find(&self, id: i64) -> AppResult<Option<Item>> {
        let row = sqlx::query_as::<_, Item>(&format!("SELECT {} FROM items WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn get(&self, id: i64) -> AppResult<Item> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("item not found".to_string()))
    }

    /// Check if a registry code is already taken, optionally excluding one
    /// item.
    pub async fn registry_exists(&self, registry: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM items WHERE registry = $1 AND id != $2)")
                .bind(registry)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM items WHERE registry = $1)")
                .bind(registry)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    pub async fn create(&self, item: &NewItem) -> AppResult<Item> {
        let created = sqlx::query_as::<_, Item>(&format!(
            r#"
            INSERT INTO items (registry, name, description, available, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&item.registry)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(item.category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn update(&self, item: &Item) -> AppResult<Item> {
        let updated = sqlx::query_as::<_, Item>(&format!(
            r#"
            UPDATE items
            SET registry = $1, name = $2, description = $3, available = $4, category_id = $5
            WHERE id = $6
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&item.registry)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(item.category_id)
        .bind(item.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Delete an item, soft-detaching lendings that reference it.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE lendings SET item_id = NULL WHERE item_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
