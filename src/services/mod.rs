//! Business logic services
//!
//! One service per entity. Each create/update takes the raw request payload,
//! runs structural validation, then the entity's semantic rules (which may
//! query the repository), and only then commits. The first failing rule
//! aborts before any mutation.

pub mod auth;
pub mod categories;
pub mod items;
pub mod lendings;
pub mod reservations;
pub mod thirdparties;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub users: users::UsersService,
    pub thirdparties: thirdparties::ThirdpartiesService,
    pub categories: categories::CategoriesService,
    pub items: items::ItemsService,
    pub lendings: lendings::LendingsService,
    pub reservations: reservations::ReservationsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            users: users::UsersService::new(repository.clone()),
            thirdparties: thirdparties::ThirdpartiesService::new(repository.clone()),
            categories: categories::CategoriesService::new(repository.clone()),
            items: items::ItemsService::new(repository.clone()),
            lendings: lendings::LendingsService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(repository),
        }
    }
}
