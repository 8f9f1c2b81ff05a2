//! Categories repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, NewCategory},
};

const COLUMNS: &str = "id, name, description";

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let rows =
            sqlx::query_as::<_, Category>(&format!("SELECT {} FROM categories ORDER BY id", COLUMNS))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    pub async fn find(&self, id: i64) -> AppResult<Option<Category>> {
        let row =
            sqlx::query_as::<_, Category>(&format!("SELECT {} FROM categories WHERE id = $1", COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    pub async fn get(&self, id: i64) -> AppResult<Category> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("category not found".to_string()))
    }

    pub async fn name_exists(&self, name: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1 AND id != $2)",
            )
            .bind(name)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    pub async fn create(&self, category: &NewCategory) -> AppResult<Category> {
        let created = sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING {}",
            COLUMNS
        ))
        .bind(&category.name)
        .bind(&category.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn update(&self, category: &Category) -> AppResult<Category> {
        let updated = sqlx::query_as::<_, Category>(&format!(
            "UPDATE categories SET name = $1, description = $2 WHERE id = $3 RETURNING {}",
            COLUMNS
        ))
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Delete a category, soft-detaching items that reference it.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE items SET category_id = NULL WHERE category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
