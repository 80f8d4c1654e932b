//! Data models for the library server

pub mod author;
pub mod genre;
pub mod user;

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};

pub use author::{Author, AuthorInput};
pub use genre::{Genre, GenreInput};
pub use user::{Role, UserClaims};

/// An identified record exposed through the uniform CRUD contract.
///
/// `id` is assigned by the store and never taken from the client. `Input` is
/// the DTO accepted on create and on full-replace update.
pub trait Resource: Clone + Debug + Serialize + Send + Sync + 'static {
    type Input: Debug + DeserializeOwned + Validate + Send + Sync + 'static;

    /// Singular display name ("Genre")
    const NAME: &'static str;

    fn id(&self) -> i64;

    /// Build the stored representation of `input` under `id`
    fn from_input(id: i64, input: &Self::Input) -> Self;
}

/// Rejects empty and whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("Value must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Raw `page` / `limit` query parameters
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page number
    #[validate(
        required(message = "Page number is required"),
        range(min = 0, message = "Page number must not be negative")
    )]
    pub page: Option<i64>,
    /// Page size
    #[validate(
        required(message = "Page size is required"),
        range(min = 1, message = "Page size must be higher than 0")
    )]
    pub limit: Option<i64>,
}

/// A validated slice request over an id-ordered collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Validate raw query parameters, clamping `limit` to `max_limit`
    pub fn from_query(query: &PageQuery, max_limit: i64) -> AppResult<Self> {
        query.validate()?;
        match (query.page, query.limit) {
            (Some(page), Some(limit)) => Ok(Self {
                page,
                limit: limit.min(max_limit.max(1)),
            }),
            // unreachable once `required` passed
            _ => Err(AppError::BadRequest("Missing page parameters".to_string())),
        }
    }

    /// Row offset of the first entry, `None` if it does not fit in an i64
    pub fn offset(&self) -> Option<i64> {
        self.page.checked_mul(self.limit)
    }
}

/// One slice of a resource collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<R> {
    pub items: Vec<R>,
    pub page: i64,
    pub limit: i64,
}

impl<R> Page<R> {
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            page: request.page,
            limit: request.limit,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<R> {
        self.items
    }
}
