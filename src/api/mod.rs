//! API handlers for the library REST endpoints

pub mod auth;
pub mod authors;
pub mod extract;
pub mod genres;
pub mod health;
pub mod openapi;

use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
    Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, AppResult},
    models::{Page, Role, UserClaims},
    AppState,
};

/// Role set an operation requires; holding any one of them grants access
pub trait AccessPolicy: Send + Sync + 'static {
    const ROLES: &'static [Role];
}

/// Mutations: create, update, delete
pub struct AdminOnly;

impl AccessPolicy for AdminOnly {
    const ROLES: &'static [Role] = &[Role::Admin];
}

/// Reads: list and get
pub struct ReadAccess;

impl AccessPolicy for ReadAccess {
    const ROLES: &'static [Role] = &[Role::User, Role::Admin];
}

/// Caller authenticated by bearer JWT and holding a role of `P`.
///
/// Must be the first handler argument: extractors run in order, so the role
/// check happens before any path, query or body validation.
pub struct Authorized<P: AccessPolicy> {
    pub claims: UserClaims,
    _policy: PhantomData<P>,
}

#[async_trait]
impl<P: AccessPolicy> FromRequestParts<AppState> for Authorized<P> {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::Authentication("Missing or invalid authorization header".to_string())
                })?;

        let claims = UserClaims::from_token(bearer.token(), &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        if let Err(e) = claims.require_any_role(P::ROLES) {
            tracing::warn!("{} denied: {}", claims.sub, e);
            return Err(e);
        }

        Ok(Authorized {
            claims,
            _policy: PhantomData,
        })
    }
}

/// Unwrap a listed page, mapping an empty slice to 404
fn require_items<R>(page: Page<R>, collection: &str) -> AppResult<Vec<R>> {
    if page.is_empty() {
        return Err(AppError::NotFound(format!(
            "No {} on page {} (limit {})",
            collection, page.page, page.limit
        )));
    }
    Ok(page.into_items())
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        // Genres
        .route(
            "/genres",
            get(genres::list_genres).post(genres::create_genre),
        )
        .route(
            "/genres/:id",
            get(genres::get_genre)
                .put(genres::update_genre)
                .delete(genres::delete_genre),
        )
        // Authors
        .route(
            "/authors",
            get(authors::list_authors).post(authors::create_author),
        )
        .route(
            "/authors/:id",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        .with_state(state);

    api.merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
