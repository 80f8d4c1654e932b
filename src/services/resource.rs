//! Generic CRUD service shared by every exposed resource

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Page, PageRequest, Resource},
    repository::ResourceStore,
};

pub struct ResourceService<R: Resource> {
    store: Arc<dyn ResourceStore<R>>,
}

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(store: Arc<dyn ResourceStore<R>>) -> Self {
        Self { store }
    }

    fn not_found(id: i64) -> AppError {
        AppError::NotFound(format!("{} {} not found", R::NAME, id))
    }

    pub async fn create(&self, input: &R::Input) -> AppResult<R> {
        input.validate()?;
        let created = self.store.insert(input).await?;
        tracing::info!("{} created: id={}", R::NAME, created.id());
        Ok(created)
    }

    /// Slice of the id-ordered collection; an empty page is not an error here
    pub async fn get_page(&self, request: PageRequest) -> AppResult<Page<R>> {
        let Some(offset) = request.offset() else {
            tracing::debug!("{} page {} lies past any offset", R::NAME, request.page);
            return Ok(Page::empty(request));
        };
        let items = self.store.find_page(offset, request.limit).await?;
        tracing::debug!(
            "{} page {} (limit {}) returned {} rows",
            R::NAME,
            request.page,
            request.limit,
            items.len()
        );
        Ok(Page {
            items,
            page: request.page,
            limit: request.limit,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<R> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Full replace of every mutable field
    pub async fn update(&self, id: i64, input: &R::Input) -> AppResult<()> {
        input.validate()?;
        if !self.store.update(id, input).await? {
            return Err(Self::not_found(id));
        }
        tracing::info!("{} updated: id={}", R::NAME, id);
        Ok(())
    }

    /// Deleting an absent id is an error, so a repeated delete fails
    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(Self::not_found(id));
        }
        tracing::info!("{} deleted: id={}", R::NAME, id);
        Ok(())
    }
}
