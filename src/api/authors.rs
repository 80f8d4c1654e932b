//! Author API endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{Author, AuthorInput, PageQuery},
    AppState,
};

use super::{
    extract::{PageParams, ResourceId, ValidatedJson},
    require_items, AdminOnly, Authorized, ReadAccess,
};

/// Create a author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = AuthorInput,
    responses(
        (status = 200, description = "Author created", body = Author),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse)
    )
)]
pub async fn create_author(
    Authorized { claims, .. }: Authorized<AdminOnly>,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<AuthorInput>,
) -> AppResult<Json<Author>> {
    tracing::debug!("{} creates author {} {}", claims.sub, input.first_name, input.last_name);
    let author = state.services.authors.create(&input).await?;
    Ok(Json(author))
}

/// List one page of authors ordered by id
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Authors on the requested page", body = Vec<Author>),
        (status = 400, description = "Missing or invalid page parameters", body = ErrorResponse),
        (status = 403, description = "User or administrator role required", body = ErrorResponse),
        (status = 404, description = "Requested page is empty", body = ErrorResponse)
    )
)]
pub async fn list_authors(
    _auth: Authorized<ReadAccess>,
    State(state): State<AppState>,
    PageParams(request): PageParams,
) -> AppResult<Json<Vec<Author>>> {
    let page = state.services.authors.get_page(request).await?;
    Ok(Json(require_items(page, "authors")?))
}

/// Get a author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Author ID, higher than 0")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 403, description = "User or administrator role required", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn get_author(
    _auth: Authorized<ReadAccess>,
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Json(author))
}

/// Replace a author
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Author ID, higher than 0")),
    request_body = AuthorInput,
    responses(
        (status = 200, description = "Author updated"),
        (status = 400, description = "Invalid id or body", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn update_author(
    Authorized { claims, .. }: Authorized<AdminOnly>,
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidatedJson(input): ValidatedJson<AuthorInput>,
) -> AppResult<StatusCode> {
    tracing::debug!("{} updates author {}", claims.sub, id);
    state.services.authors.update(id, &input).await?;
    Ok(StatusCode::OK)
}

/// Delete a author
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Author ID, higher than 0")),
    responses(
        (status = 200, description = "Author deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn delete_author(
    Authorized { claims, .. }: Authorized<AdminOnly>,
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<StatusCode> {
    tracing::debug!("{} deletes author {}", claims.sub, id);
    state.services.authors.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}
