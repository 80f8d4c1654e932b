//! Business logic services

pub mod auth;
pub mod resource;

use crate::{
    config::AuthConfig,
    models::{Author, Genre},
    repository::Repository,
};

pub use resource::ResourceService;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub genres: ResourceService<Genre>,
    pub authors: ResourceService<Author>,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(auth_config),
            genres: ResourceService::new(repository.genres.clone()),
            authors: ResourceService::new(repository.authors.clone()),
            repository,
        }
    }

    /// Readiness probe against the persistence store
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
