//! Authors repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::ResourceStore;
use crate::{
    error::AppResult,
    models::{Author, AuthorInput},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore<Author> for AuthorsRepository {
    async fn insert(&self, input: &AuthorInput) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, last_name)
            VALUES ($1, $2)
            RETURNING id, first_name, last_name
            "#,
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, last_name FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, last_name FROM authors
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update(&self, id: i64, input: &AuthorInput) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE authors SET first_name = $1, last_name = $2 WHERE id = $3",
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
