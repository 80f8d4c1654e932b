//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, genres, health};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library API",
        version = "0.1.0",
        description = "Library catalog REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        // Genres
        genres::create_genre,
        genres::list_genres,
        genres::get_genre,
        genres::update_genre,
        genres::delete_genre,
        // Authors
        authors::create_author,
        authors::list_authors,
        authors::get_author,
        authors::update_author,
        authors::delete_author,
    ),
    components(
        schemas(
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::Genre,
            crate::models::GenreInput,
            crate::models::Author,
            crate::models::AuthorInput,
            crate::models::Role,
            health::HealthResponse,
            crate::error::ErrorResponse,
            crate::error::FieldError,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "genres", description = "Genre management"),
        (name = "authors", description = "Author management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
