//! Author management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::validate_payload;
use crate::{
    error::AppResult,
    models::{
        author::{CreateAuthor, UpdateAuthor},
        filter::FilterQuery,
        pagination::PageQuery,
        Author, Paginated,
    },
    AppState,
};

/// List authors with pagination and optional single-field filtering
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(PageQuery, FilterQuery),
    responses(
        (status = 200, description = "Paginated author listing"),
        (status = 400, description = "Invalid pagination or filter parameters")
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<FilterQuery>,
) -> AppResult<Json<Paginated<Author>>> {
    Ok(Json(state.services.authors.list(page, filter).await?))
}

/// Get an author by id
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "The author", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    Ok(Json(state.services.authors.get_by_id(id).await?))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 404, description = "Referenced gender not found"),
        (status = 409, description = "Author already exists")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Json(payload): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    validate_payload(&payload)?;
    let author = state.services.authors.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

/// Update an author
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 404, description = "Author or referenced gender not found"),
        (status = 409, description = "Author already exists")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    validate_payload(&payload)?;
    Ok(Json(state.services.authors.update(id, &payload).await?))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
