//! Genres repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::ResourceStore;
use crate::{
    error::AppResult,
    models::{Genre, GenreInput},
};

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Postgres>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore<Genre> for GenresRepository {
    async fn insert(&self, input: &GenreInput) -> AppResult<Genre> {
        let row = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&input.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>(
            "SELECT id, name FROM genres ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update(&self, id: i64, input: &GenreInput) -> AppResult<bool> {
        let result = sqlx::query("UPDATE genres SET name = $1 WHERE id = $2")
            .bind(&input.name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
