//! Repository layer for database operations
//!
//! The rules layer consumes only lookups (by id, by field, all) from here;
//! writes happen after validation has passed, and any constraint violation
//! raised by Postgres at that point surfaces as an opaque store error.

pub mod categories;
pub mod items;
pub mod lendings;
pub mod reservations;
pub mod thirdparties;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub thirdparties: thirdparties::ThirdpartiesRepository,
    pub categories: categories::CategoriesRepository,
    pub items: items::ItemsRepository,
    pub lendings: lendings::LendingsRepository,
    pub reservations: reservations::ReservationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            thirdparties: thirdparties::ThirdpartiesRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            items: items::ItemsRepository::new(pool.clone()),
            lendings: lendings::LendingsRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            pool,
        }
    }
}
