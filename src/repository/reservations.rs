//! Reservations repository for database operations

use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::reservation::{NewReservation, Reservation},
};

const COLUMNS: &str = "id, name, description, date_start, date_end, user_id, thirdparty_id";

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List reservations ending at or after the given instant.
    pub async fn list_open(&self, now: NaiveDateTime) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {} FROM reservations WHERE date_end >= $1 ORDER BY id",
            COLUMNS
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_all(&self) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {} FROM reservations ORDER BY id",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find(&self, id: i64) -> AppResult<Option<Reservation>> {
        let row = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {} FROM reservations WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get(&self, id: i64) -> AppResult<Reservation> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("reservation not found".to_string()))
    }

    pub async fn create(&self, reservation: &NewReservation) -> AppResult<Reservation> {
        let created = sqlx::query_as::<_, Reservation>(&format!(
            r#"
            INSERT INTO reservations (name, description, date_start, date_end, user_id, thirdparty_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&reservation.name)
        .bind(&reservation.description)
        .bind(reservation.date_start)
        .bind(reservation.date_end)
        .bind(reservation.user_id)
        .bind(reservation.thirdparty_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn update(&self, reservation: &Reservation) -> AppResult<Reservation> {
        let updated = sqlx::query_as::<_, Reservation>(&format!(
            r#"
            UPDATE reservations
            SET name = $1, description = $2, date_start = $3, date_end = $4,
                user_id = $5, thirdparty_id = $6
            WHERE id = $7
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&reservation.name)
        .bind(&reservation.description)
        .bind(reservation.date_start)
        .bind(reservation.date_end)
        .bind(reservation.user_id)
        .bind(reservation.thirdparty_id)
        .bind(reservation.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
