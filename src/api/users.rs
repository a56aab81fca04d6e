//! User management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::validate_payload;
use crate::{
    error::AppResult,
    models::{
        filter::FilterQuery,
        pagination::PageQuery,
        user::{CreateUser, UpdateUser},
        ActivePlan, Paginated, Reservation, User,
    },
    AppState,
};

/// List users with pagination and optional single-field filtering
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(PageQuery, FilterQuery),
    responses(
        (status = 200, description = "Paginated user listing"),
        (status = 400, description = "Invalid pagination or filter parameters")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<FilterQuery>,
) -> AppResult<Json<Paginated<User>>> {
    Ok(Json(state.services.users.list(page, filter).await?))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<User>> {
    Ok(Json(state.services.users.get_by_id(id).await?))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    validate_payload(&payload)?;
    let user = state.services.users.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    validate_payload(&payload)?;
    Ok(Json(state.services.users.update(id, &payload).await?))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List a user's reservations
#[utoipa::path(
    get,
    path = "/users/{id}/reservations",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's reservations", body = Vec<Reservation>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_reservations(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Reservation>>> {
    Ok(Json(state.services.reservations.for_user(id).await?))
}

/// List a user's plan subscriptions
#[utoipa::path(
    get,
    path = "/users/{id}/active-plans",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's subscriptions", body = Vec<ActivePlan>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_active_plans(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<ActivePlan>>> {
    Ok(Json(state.services.active_plans.for_user(id).await?))
}
