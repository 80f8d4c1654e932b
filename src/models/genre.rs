//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::Resource;

/// Genre record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Create / replace genre request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GenreInput {
    #[validate(
        custom(function = "super::not_blank"),
        length(max = 255, message = "Name must be at most 255 characters")
    )]
    pub name: String,
}

impl Resource for Genre {
    type Input = GenreInput;

    const NAME: &'static str = "Genre";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_input(id: i64, input: &GenreInput) -> Self {
        Self {
            id,
            name: input.name.clone(),
        }
    }
}
