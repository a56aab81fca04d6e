//! Room reservation endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::validate_payload;
use crate::{
    error::AppResult,
    models::{
        filter::FilterQuery, pagination::PageQuery, reservation::ReservationPayload, Paginated,
        Reservation,
    },
    AppState,
};

/// List reservations with pagination and optional single-field filtering
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    params(PageQuery, FilterQuery),
    responses(
        (status = 200, description = "Paginated reservation listing"),
        (status = 400, description = "Invalid pagination or filter parameters")
    )
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<FilterQuery>,
) -> AppResult<Json<Paginated<Reservation>>> {
    Ok(Json(state.services.reservations.list(page, filter).await?))
}

/// Get a reservation by id
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "The reservation", body = Reservation),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    Ok(Json(state.services.reservations.get_by_id(id).await?))
}

/// Book a room
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    request_body = ReservationPayload,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 400, description = "Window or headcount violates the booking rules"),
        (status = 404, description = "User, room or equipment not found"),
        (status = 409, description = "Room already reserved on the window")
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(payload): Json<ReservationPayload>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    validate_payload(&payload)?;
    let reservation = state.services.reservations.create(payload).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Replace a reservation's booking details
#[utoipa::path(
    put,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = ReservationPayload,
    responses(
        (status = 200, description = "Reservation updated", body = Reservation),
        (status = 400, description = "Window or headcount violates the booking rules"),
        (status = 404, description = "Reservation, user, room or equipment not found"),
        (status = 409, description = "Room already reserved on the window")
    )
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ReservationPayload>,
) -> AppResult<Json<Reservation>> {
    validate_payload(&payload)?;
    Ok(Json(state.services.reservations.update(id, payload).await?))
}

/// Cancel a reservation
#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 204, description = "Reservation deleted"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reservations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
