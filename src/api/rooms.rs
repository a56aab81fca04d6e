//! Room management endpoints

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
        room::{CreateRoom, UpdateRoom},
        Paginated, Reservation, Room,
    },
    AppState,
};

/// List rooms with pagination and optional single-field filtering
#[utoipa::path(
    get,
    path = "/rooms",
    tag = "rooms",
    params(PageQuery, FilterQuery),
    responses(
        (status = 200, description = "Paginated room listing"),
        (status = 400, description = "Invalid pagination or filter parameters")
    )
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<FilterQuery>,
) -> AppResult<Json<Paginated<Room>>> {
    Ok(Json(state.services.rooms.list(page, filter).await?))
}

/// Get a room by id
#[utoipa::path(
    get,
    path = "/rooms/{id}",
    tag = "rooms",
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "The room", body = Room),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Room>> {
    Ok(Json(state.services.rooms.get_by_id(id).await?))
}

/// Create a room
#[utoipa::path(
    post,
    path = "/rooms",
    tag = "rooms",
    request_body = CreateRoom,
    responses(
        (status = 201, description = "Room created", body = Room),
        (status = 404, description = "Referenced location or status not found"),
        (status = 409, description = "Room already exists")
    )
)]
pub async fn create_room(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoom>,
) -> AppResult<(StatusCode, Json<Room>)> {
    validate_payload(&payload)?;
    let room = state.services.rooms.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// Update a room
#[utoipa::path(
    put,
    path = "/rooms/{id}",
    tag = "rooms",
    params(("id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoom,
    responses(
        (status = 200, description = "Room updated", body = Room),
        (status = 404, description = "Room or referenced lookup not found"),
        (status = 409, description = "Room already exists")
    )
)]
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRoom>,
) -> AppResult<Json<Room>> {
    validate_payload(&payload)?;
    Ok(Json(state.services.rooms.update(id, &payload).await?))
}

/// Delete a room
#[utoipa::path(
    delete,
    path = "/rooms/{id}",
    tag = "rooms",
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.rooms.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List a room's reservations
#[utoipa::path(
    get,
    path = "/rooms/{id}/reservations",
    tag = "rooms",
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "The room's reservations", body = Vec<Reservation>),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room_reservations(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Reservation>>> {
    Ok(Json(state.services.reservations.for_room(id).await?))
}
