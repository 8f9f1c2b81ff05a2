//! Lendings repository for database operations
//!
//! Writes take the side-effect list decided by the rules layer and apply it
//! inside the same transaction as the lending row, so an item can never end
//! up bound to a lending while still flagged available.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::lending::{Lending, NewLending, SideEffect},
};

const COLUMNS: &str = "id, date_start, date_end, date_return, item_id, user_id, thirdparty_id";

#[derive(Clone)]
pub struct LendingsRepository {
    pool: Pool<Postgres>,
}

impl LendingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List lendings without a return date.
    pub async fn list_open(&self) -> AppResult<Vec<Lending>> {
        let rows = sqlx::query_as::<_, Lending>(&format!(
            "SELECT {} FROM lendings WHERE date_return IS NULL ORDER BY id",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_all(&self) -> AppResult<Vec<Lending>> {
        let rows =
            sqlx::query_as::<_, Lending>(&format!("SELECT {} FROM lendings ORDER BY id", COLUMNS))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    pub async fn find(&self, id: i64) -> AppResult<Option<Lending>> {
        let row =
            sqlx::query_as::<_, Lending>(&format!("SELECT {} FROM lendings WHERE id = $1", COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    pub async fn get(&self, id: i64) -> AppResult<Lending> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("lending not found".to_string()))
    }

    pub async fn create(&self, lending: &NewLending, effects: &[SideEffect]) -> AppResult<Lending> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Lending>(&format!(
            r#"
            INSERT INTO lendings (date_start, date_end, date_return, item_id, user_id, thirdparty_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(lending.date_start)
        .bind(lending.date_end)
        .bind(lending.date_return)
        .bind(lending.item_id)
        .bind(lending.user_id)
        .bind(lending.thirdparty_id)
        .fetch_one(&mut *tx)
        .await?;

        apply_effects(&mut tx, effects).await?;

        tx.commit().await?;
        Ok(created)
    }

    pub async fn update(&self, lending: &Lending, effects: &[SideEffect]) -> AppResult<Lending> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Lending>(&format!(
            r#"
            UPDATE lendings
            SET date_start = $1, date_end = $2, date_return = $3,
                item_id = $4, user_id = $5, thirdparty_id = $6
            WHERE id = $7
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(lending.date_start)
        .bind(lending.date_end)
        .bind(lending.date_return)
        .bind(lending.item_id)
        .bind(lending.user_id)
        .bind(lending.thirdparty_id)
        .bind(lending.id)
        .fetch_one(&mut *tx)
        .await?;

        apply_effects(&mut tx, effects).await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a lending. The bound item, if any, keeps available = false.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM lendings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

async fn apply_effects(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    effects: &[SideEffect],
) -> AppResult<()> {
    for effect in effects {
        match effect {
            SideEffect::MarkItemUnavailable(item_id) => {
                sqlx::query("UPDATE items SET available = FALSE WHERE id = $1")
                    .bind(item_id)
                    .execute(&mut **tx)
                    .await?;
            }
        }
    }
    Ok(())
}
