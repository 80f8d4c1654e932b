//! Repository layer for persistence operations

pub mod authors;
pub mod genres;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, Genre, Resource},
};

/// Persistence contract for one resource type.
///
/// Not-found is reported through the return value, never as an error.
/// `find_page` orders by id ascending.
#[async_trait]
pub trait ResourceStore<R: Resource>: Send + Sync {
    /// Persist a new record, returning it with its assigned id
    async fn insert(&self, input: &R::Input) -> AppResult<R>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<R>>;

    async fn find_page(&self, offset: i64, limit: i64) -> AppResult<Vec<R>>;

    /// Overwrite every mutable field. Returns `false` if `id` is absent.
    async fn update(&self, id: i64, input: &R::Input) -> AppResult<bool>;

    /// Returns `false` if `id` is absent
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Main repository struct holding one store per resource
#[derive(Clone)]
pub struct Repository {
    pool: Option<Pool<Postgres>>,
    pub genres: Arc<dyn ResourceStore<Genre>>,
    pub authors: Arc<dyn ResourceStore<Author>>,
}

impl Repository {
    /// Create a PostgreSQL-backed repository with the given pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            genres: Arc::new(genres::GenresRepository::new(pool.clone())),
            authors: Arc::new(authors::AuthorsRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Create a repository keeping everything in process memory
    pub fn in_memory() -> Self {
        Self::from_stores(
            Arc::new(memory::MemoryStore::<Genre>::new()),
            Arc::new(memory::MemoryStore::<Author>::new()),
        )
    }

    pub fn from_stores(
        genres: Arc<dyn ResourceStore<Genre>>,
        authors: Arc<dyn ResourceStore<Author>>,
    ) -> Self {
        Self {
            pool: None,
            genres,
            authors,
        }
    }

    /// Check the backing database answers
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}
