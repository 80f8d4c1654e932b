//! Genre API endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{Genre, GenreInput, PageQuery},
    AppState,
};

use super::{
    extract::{PageParams, ResourceId, ValidatedJson},
    require_items, AdminOnly, Authorized, ReadAccess,
};

/// Create a genre
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    security(("bearer_auth" = [])),
    request_body = GenreInput,
    responses(
        (status = 200, description = "Genre created", body = Genre),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse)
    )
)]
pub async fn create_genre(
    Authorized { claims, .. }: Authorized<AdminOnly>,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<GenreInput>,
) -> AppResult<Json<Genre>> {
    tracing::debug!("{} creates genre {:?}", claims.sub, input.name);
    let genre = state.services.genres.create(&input).await?;
    Ok(Json(genre))
}

/// List one page of genres ordered by id
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Genres on the requested page", body = Vec<Genre>),
        (status = 400, description = "Missing or invalid page parameters", body = ErrorResponse),
        (status = 403, description = "User or administrator role required", body = ErrorResponse),
        (status = 404, description = "Requested page is empty", body = ErrorResponse)
    )
)]
pub async fn list_genres(
    _auth: Authorized<ReadAccess>,
    State(state): State<AppState>,
    PageParams(request): PageParams,
) -> AppResult<Json<Vec<Genre>>> {
    let page = state.services.genres.get_page(request).await?;
    Ok(Json(require_items(page, "genres")?))
}

/// Get a genre by ID
#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Genre ID, higher than 0")),
    responses(
        (status = 200, description = "Genre details", body = Genre),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 403, description = "User or administrator role required", body = ErrorResponse),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    )
)]
pub async fn get_genre(
    _auth: Authorized<ReadAccess>,
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<Genre>> {
    let genre = state.services.genres.get_by_id(id).await?;
    Ok(Json(genre))
}

/// Replace a genre
#[utoipa::path(
    put,
    path = "/genres/{id}",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Genre ID, higher than 0")),
    request_body = GenreInput,
    responses(
        (status = 200, description = "Genre updated"),
        (status = 400, description = "Invalid id or body", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    )
)]
pub async fn update_genre(
    Authorized { claims, .. }: Authorized<AdminOnly>,
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidatedJson(input): ValidatedJson<GenreInput>,
) -> AppResult<StatusCode> {
    tracing::debug!("{} updates genre {}", claims.sub, id);
    state.services.genres.update(id, &input).await?;
    Ok(StatusCode::OK)
}

/// Delete a genre
#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "genres",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Genre ID, higher than 0")),
    responses(
        (status = 200, description = "Genre deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "Genre not found", body = ErrorResponse)
    )
)]
pub async fn delete_genre(
    Authorized { claims, .. }: Authorized<AdminOnly>,
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<StatusCode> {
    tracing::debug!("{} deletes genre {}", claims.sub, id);
    state.services.genres.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}
