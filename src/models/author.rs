//! Author model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::Resource;

/// Author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Create / replace author request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AuthorInput {
    #[validate(
        custom(function = "super::not_blank"),
        length(max = 255, message = "First name must be at most 255 characters")
    )]
    pub first_name: String,
    #[validate(
        custom(function = "super::not_blank"),
        length(max = 255, message = "Last name must be at most 255 characters")
    )]
    pub last_name: String,
}

impl Resource for Author {
    type Input = AuthorInput;

    const NAME: &'static str = "Author";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_input(id: i64, input: &AuthorInput) -> Self {
        Self {
            id,
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
        }
    }
}
