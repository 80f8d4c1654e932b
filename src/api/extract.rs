//! Validating request extractors

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    error::AppError,
    models::{PageQuery, PageRequest},
    AppState,
};

/// Positive resource id taken from the `:id` path segment
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ResourceId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state).await?;
        if id <= 0 {
            return Err(AppError::invalid_field("id", "Value must be higher than 0"));
        }
        Ok(ResourceId(id))
    }
}

/// Required `page` and `limit` query parameters
#[derive(Debug, Clone, Copy)]
pub struct PageParams(pub PageRequest);

#[async_trait]
impl FromRequestParts<AppState> for PageParams {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageQuery>::from_request_parts(parts, state).await?;
        let request = PageRequest::from_query(&query, state.config.pagination.max_limit)?;
        Ok(PageParams(request))
    }
}

/// JSON body that passed its `Validate` rules
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
