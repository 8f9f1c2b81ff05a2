//! Lending management service
//!
//! Rule order on top of structural validation: datetime parsing, date
//! ordering, then reference checks (user, thirdparty, item). Binding an
//! available item produces a side effect that the repository applies
//! atomically with the lending write; nothing flips the flag back when a
//! lending ends.

use chrono::NaiveDateTime;

use crate::{
    error::{AppError, AppResult, ErrorKind},
    models::lending::{Lending, NewLending, SideEffect},
    repository::Repository,
    validation::{
        checks::check_datetime,
        payload::opt_int_field,
        schema, validate_structure, Payload,
    },
};

#[derive(Clone)]
pub struct LendingsService {
    repository: Repository,
}

impl LendingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List lendings not yet returned.
    pub async fn list_open(&self) -> AppResult<Vec<Lending>> {
        self.repository.lendings.list_open().await
    }

    pub async fn list_all(&self) -> AppResult<Vec<Lending>> {
        self.repository.lendings.list_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Lending> {
        self.repository.lendings.get(id).await
    }

    pub async fn create(&self, payload: Payload) -> AppResult<Lending> {
        validate_structure(&payload, &schema::LENDING, true)?;

        let date_start = required_datetime(&payload, "date_start")?;
        let date_end = required_datetime(&payload, "date_end")?;
        let date_return = check_datetime(&payload, "date_return")?;
        check_ordering(date_start, date_end, date_return)?;

        let user_id = opt_int_field(&payload, "user_id").flatten();
        self.check_user(user_id).await?;
        let thirdparty_id = opt_int_field(&payload, "thirdparty_id").flatten();
        self.check_thirdparty(thirdparty_id).await?;

        let mut effects = Vec::new();
        let item_id = opt_int_field(&payload, "item_id").flatten();
        if let Some(item_id) = item_id {
            self.check_item(item_id).await?;
            effects.push(SideEffect::MarkItemUnavailable(item_id));
        }

        let lending = NewLending {
            date_start,
            date_end,
            date_return,
            item_id,
            user_id,
            thirdparty_id,
        };

        self.repository.lendings.create(&lending, &effects).await
    }

    /// Update a lending. Date invariants are enforced on the merged record
    /// (payload value when present, stored value otherwise); the item is
    /// re-checked and re-bound only when item_id actually changes.
    pub async fn update(&self, id: i64, payload: Payload) -> AppResult<Lending> {
        let mut lending = self.repository.lendings.get(id).await?;

        validate_structure(&payload, &schema::LENDING, false)?;

        let date_start = check_datetime(&payload, "date_start")?.unwrap_or(lending.date_start);
        let date_end = check_datetime(&payload, "date_end")?.unwrap_or(lending.date_end);
        let date_return = if payload.contains_key("date_return") {
            check_datetime(&payload, "date_return")?
        } else {
            lending.date_return
        };
        check_ordering(date_start, date_end, date_return)?;

        let user_id = match opt_int_field(&payload, "user_id") {
            Some(value) => {
                self.check_user(value).await?;
                value
            }
            None => lending.user_id,
        };
        let thirdparty_id = match opt_int_field(&payload, "thirdparty_id") {
            Some(value) => {
                self.check_thirdparty(value).await?;
                value
            }
            None => lending.thirdparty_id,
        };

        let mut effects = Vec::new();
        let item_id = match opt_int_field(&payload, "item_id") {
            Some(value) => {
                if let Some(item_id) = value {
                    if Some(item_id) != lending.item_id {
                        self.check_item(item_id).await?;
                        effects.push(SideEffect::MarkItemUnavailable(item_id));
                    }
                }
                value
            }
            None => lending.item_id,
        };

        lending.date_start = date_start;
        lending.date_end = date_end;
        lending.date_return = date_return;
        lending.item_id = item_id;
        lending.user_id = user_id;
        lending.thirdparty_id = thirdparty_id;

        self.repository.lendings.update(&lending, &effects).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.lendings.get(id).await?;
        self.repository.lendings.delete(id).await
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

    /// The item must exist and still be available to lend.
    async fn check_item(&self, item_id: i64) -> AppResult<()> {
        let item = self.repository.items.find(item_id).await?.ok_or_else(|| {
            AppError::Validation(ErrorKind::ReferenceNotFound, "item does not exist".to_string())
        })?;
        if !item.available {
            return Err(AppError::Validation(
                ErrorKind::ReferenceUnavailable,
                "item is not available".to_string(),
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

fn check_ordering(
    date_start: NaiveDateTime,
    date_end: NaiveDateTime,
    date_return: Option<NaiveDateTime>,
) -> AppResult<()> {
    if date_end <= date_start {
        return Err(AppError::Validation(
            ErrorKind::InvalidValue,
            "date_start must be before date_end".to_string(),
        ));
    }
    if let Some(date_return) = date_return {
        if date_return <= date_start {
            return Err(AppError::Validation(
                ErrorKind::InvalidValue,
                "date_start must be before date_return".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn end_must_follow_start() {
        assert!(check_ordering(at(1, 10), at(2, 10), None).is_ok());
        assert!(check_ordering(at(2, 10), at(1, 10), None).is_err());
        // equal timestamps are rejected too
        assert!(check_ordering(at(1, 10), at(1, 10), None).is_err());
    }

    #[test]
    fn return_must_follow_start() {
        assert!(check_ordering(at(1, 10), at(3, 10), Some(at(2, 10))).is_ok());
        assert!(check_ordering(at(2, 10), at(3, 10), Some(at(1, 10))).is_err());
        assert!(check_ordering(at(2, 10), at(3, 10), Some(at(2, 10))).is_err());
    }
}
