//! Thirdparties repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::thirdparty::{NewThirdparty, Thirdparty},
};

const COLUMNS: &str = "id, first_name, last_name, email, phone";

#[derive(Clone)]
pub struct ThirdpartiesRepository {
    pool: Pool<Postgres>,
}

impl ThirdpartiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Thirdparty>> {
        let rows = sqlx::query_as::<_, Thirdparty>(&format!(
            "SELECT {} FROM thirdparties ORDER BY id",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find(&self, id: i64) -> AppResult<Option<Thirdparty>> {
        let row = sqlx::query_as::<_, Thirdparty>(&format!(
            "SELECT {} FROM thirdparties WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get(&self, id: i64) -> AppResult<Thirdparty> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("thirdparty not found".to_string()))
    }

    pub async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM thirdparties WHERE email = $1 AND id != $2)",
            )
            .bind(email)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM thirdparties WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    pub async fn create(&self, thirdparty: &NewThirdparty) -> AppResult<Thirdparty> {
        let created = sqlx::query_as::<_, Thirdparty>(&format!(
            r#"
            INSERT INTO thirdparties (first_name, last_name, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&thirdparty.first_name)
        .bind(&thirdparty.last_name)
        .bind(&thirdparty.email)
        .bind(&thirdparty.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn update(&self, thirdparty: &Thirdparty) -> AppResult<Thirdparty> {
        let updated = sqlx::query_as::<_, Thirdparty>(&format!(
            r#"
            UPDATE thirdparties
            SET first_name = $1, last_name = $2, email = $3, phone = $4
            WHERE id = $5
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&thirdparty.first_name)
        .bind(&thirdparty.last_name)
        .bind(&thirdparty.email)
        .bind(&thirdparty.phone)
        .bind(thirdparty.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Delete a thirdparty, soft-detaching lendings and reservations that
    /// reference it.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE lendings SET thirdparty_id = NULL WHERE thirdparty_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE reservations SET thirdparty_id = NULL WHERE thirdparty_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM thirdparties WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
