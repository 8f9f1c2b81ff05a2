//! Users repository for database operations

use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{NewUser, User},
};

const COLUMNS: &str = "id, first_name, last_name, email, password, admin, token, token_expiry";

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users ORDER BY id", COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn find(&self, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Get user by id, or fail with a not-found error.
    pub async fn get(&self, id: i64) -> AppResult<User> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = $1", COLUMNS))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE token = $1", COLUMNS))
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    /// Check if an email is already taken, optionally excluding one user.
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id != $2)")
                .bind(email)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    pub async fn create(&self, user: &NewUser) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (first_name, last_name, email, password, admin)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.admin)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Persist the mutable profile fields of an already-validated user.
    pub async fn update(&self, user: &User) -> AppResult<User> {
        let updated = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = $1, last_name = $2, email = $3, admin = $4
            WHERE id = $5
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.admin)
        .bind(user.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn set_token(
        &self,
        id: i64,
        token: &str,
        expiry: NaiveDateTime,
    ) -> AppResult<()> {
        sqlx::query("UPDATE users SET token = $1, token_expiry = $2 WHERE id = $3")
            .bind(token)
            .bind(expiry)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn clear_token(&self, id: i64, expiry: NaiveDateTime) -> AppResult<()> {
        sqlx::query("UPDATE users SET token = NULL, token_expiry = $1 WHERE id = $2")
            .bind(expiry)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete a user, soft-detaching lendings and reservations that
    /// reference it.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE lendings SET user_id = NULL WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE reservations SET user_id = NULL WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
