//! Editorial management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::validate_payload;
use crate::{
    error::AppResult,
    models::{
        editorial::{CreateEditorial, UpdateEditorial},
        filter::FilterQuery,
        pagination::PageQuery,
        Editorial, Paginated,
    },
    AppState,
};

/// List editorials with pagination and optional single-field filtering
#[utoipa::path(
    get,
    path = "/editorials",
    tag = "editorials",
    params(PageQuery, FilterQuery),
    responses(
        (status = 200, description = "Paginated editorial listing"),
        (status = 400, description = "Invalid pagination or filter parameters")
    )
)]
pub async fn list_editorials(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<FilterQuery>,
) -> AppResult<Json<Paginated<Editorial>>> {
    Ok(Json(state.services.editorials.list(page, filter).await?))
}

/// Get an editorial by id
#[utoipa::path(
    get,
    path = "/editorials/{id}",
    tag = "editorials",
    params(("id" = i32, Path, description = "Editorial ID")),
    responses(
        (status = 200, description = "The editorial", body = Editorial),
        (status = 404, description = "Editorial not found")
    )
)]
pub async fn get_editorial(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Editorial>> {
    Ok(Json(state.services.editorials.get_by_id(id).await?))
}

/// Create an editorial
#[utoipa::path(
    post,
    path = "/editorials",
    tag = "editorials",
    request_body = CreateEditorial,
    responses(
        (status = 201, description = "Editorial created", body = Editorial),
        (status = 409, description = "Name or email already in use")
    )
)]
pub async fn create_editorial(
    State(state): State<AppState>,
    Json(payload): Json<CreateEditorial>,
) -> AppResult<(StatusCode, Json<Editorial>)> {
    validate_payload(&payload)?;
    let editorial = state.services.editorials.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(editorial)))
}

/// Update an editorial
#[utoipa::path(
    put,
    path = "/editorials/{id}",
    tag = "editorials",
    params(("id" = i32, Path, description = "Editorial ID")),
    request_body = UpdateEditorial,
    responses(
        (status = 200, description = "Editorial updated", body = Editorial),
        (status = 404, description = "Editorial not found"),
        (status = 409, description = "Name or email already in use")
    )
)]
pub async fn update_editorial(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateEditorial>,
) -> AppResult<Json<Editorial>> {
    validate_payload(&payload)?;
    Ok(Json(state.services.editorials.update(id, &payload).await?))
}

/// Delete an editorial
#[utoipa::path(
    delete,
    path = "/editorials/{id}",
    tag = "editorials",
    params(("id" = i32, Path, description = "Editorial ID")),
    responses(
        (status = 204, description = "Editorial deleted"),
        (status = 404, description = "Editorial not found")
    )
)]
pub async fn delete_editorial(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.editorials.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
