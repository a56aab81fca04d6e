//! Endpoints for the label lookup tables
//! (genders, plan statuses, loan statuses, room statuses, room locations)

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
        lookup::LookupPayload,
        pagination::PageQuery,
        LookupEntry, Paginated,
    },
    AppState,
};

// ---- Genders ----

/// List genders
#[utoipa::path(
    get,
    path = "/genders",
    tag = "lookups",
    params(PageQuery, FilterQuery),
    responses((status = 200, description = "Paginated gender listing"))
)]
pub async fn list_genders(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<FilterQuery>,
) -> AppResult<Json<Paginated<LookupEntry>>> {
    Ok(Json(state.services.genders.list(page, filter).await?))
}

/// Get a gender by id
#[utoipa::path(
    get,
    path = "/genders/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Gender ID")),
    responses(
        (status = 200, description = "The gender", body = LookupEntry),
        (status = 404, description = "Gender not found")
    )
)]
pub async fn get_gender(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LookupEntry>> {
    Ok(Json(state.services.genders.get_by_id(id).await?))
}

/// Create a gender
#[utoipa::path(
    post,
    path = "/genders",
    tag = "lookups",
    request_body = LookupPayload,
    responses(
        (status = 201, description = "Gender created", body = LookupEntry),
        (status = 409, description = "Gender already exists")
    )
)]
pub async fn create_gender(
    State(state): State<AppState>,
    Json(payload): Json<LookupPayload>,
) -> AppResult<(StatusCode, Json<LookupEntry>)> {
    validate_payload(&payload)?;
    let entry = state.services.genders.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Rename a gender
#[utoipa::path(
    put,
    path = "/genders/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Gender ID")),
    request_body = LookupPayload,
    responses(
        (status = 200, description = "Gender updated", body = LookupEntry),
        (status = 404, description = "Gender not found"),
        (status = 409, description = "Gender already exists")
    )
)]
pub async fn update_gender(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LookupPayload>,
) -> AppResult<Json<LookupEntry>> {
    validate_payload(&payload)?;
    Ok(Json(state.services.genders.update(id, &payload).await?))
}

/// Delete a gender
#[utoipa::path(
    delete,
    path = "/genders/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Gender ID")),
    responses(
        (status = 204, description = "Gender deleted"),
        (status = 404, description = "Gender not found")
    )
)]
pub async fn delete_gender(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.genders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Plan statuses ----

/// List plan statuses
#[utoipa::path(
    get,
    path = "/plan-statuses",
    tag = "lookups",
    params(PageQuery, FilterQuery),
    responses((status = 200, description = "Paginated plan status listing"))
)]
pub async fn list_plan_statuses(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<FilterQuery>,
) -> AppResult<Json<Paginated<LookupEntry>>> {
    Ok(Json(state.services.plan_statuses.list(page, filter).await?))
}

/// Get a plan status by id
#[utoipa::path(
    get,
    path = "/plan-statuses/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Plan status ID")),
    responses(
        (status = 200, description = "The plan status", body = LookupEntry),
        (status = 404, description = "Plan status not found")
    )
)]
pub async fn get_plan_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LookupEntry>> {
    Ok(Json(state.services.plan_statuses.get_by_id(id).await?))
}

/// Create a plan status
#[utoipa::path(
    post,
    path = "/plan-statuses",
    tag = "lookups",
    request_body = LookupPayload,
    responses(
        (status = 201, description = "Plan status created", body = LookupEntry),
        (status = 409, description = "Plan status already exists")
    )
)]
pub async fn create_plan_status(
    State(state): State<AppState>,
    Json(payload): Json<LookupPayload>,
) -> AppResult<(StatusCode, Json<LookupEntry>)> {
    validate_payload(&payload)?;
    let entry = state.services.plan_statuses.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Rename a plan status
#[utoipa::path(
    put,
    path = "/plan-statuses/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Plan status ID")),
    request_body = LookupPayload,
    responses(
        (status = 200, description = "Plan status updated", body = LookupEntry),
        (status = 404, description = "Plan status not found"),
        (status = 409, description = "Plan status already exists")
    )
)]
pub async fn update_plan_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LookupPayload>,
) -> AppResult<Json<LookupEntry>> {
    validate_payload(&payload)?;
    Ok(Json(state.services.plan_statuses.update(id, &payload).await?))
}

/// Delete a plan status
#[utoipa::path(
    delete,
    path = "/plan-statuses/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Plan status ID")),
    responses(
        (status = 204, description = "Plan status deleted"),
        (status = 404, description = "Plan status not found")
    )
)]
pub async fn delete_plan_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.plan_statuses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Loan statuses ----

/// List loan statuses
#[utoipa::path(
    get,
    path = "/loan-statuses",
    tag = "lookups",
    params(PageQuery, FilterQuery),
    responses((status = 200, description = "Paginated loan status listing"))
)]
pub async fn list_loan_statuses(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<FilterQuery>,
) -> AppResult<Json<Paginated<LookupEntry>>> {
    Ok(Json(state.services.loan_statuses.list(page, filter).await?))
}

/// Get a loan status by id
#[utoipa::path(
    get,
    path = "/loan-statuses/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Loan status ID")),
    responses(
        (status = 200, description = "The loan status", body = LookupEntry),
        (status = 404, description = "Loan status not found")
    )
)]
pub async fn get_loan_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LookupEntry>> {
    Ok(Json(state.services.loan_statuses.get_by_id(id).await?))
}

/// Create a loan status
#[utoipa::path(
    post,
    path = "/loan-statuses",
    tag = "lookups",
    request_body = LookupPayload,
    responses(
        (status = 201, description = "Loan status created", body = LookupEntry),
        (status = 409, description = "Loan status already exists")
    )
)]
pub async fn create_loan_status(
    State(state): State<AppState>,
    Json(payload): Json<LookupPayload>,
) -> AppResult<(StatusCode, Json<LookupEntry>)> {
    validate_payload(&payload)?;
    let entry = state.services.loan_statuses.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Rename a loan status
#[utoipa::path(
    put,
    path = "/loan-statuses/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Loan status ID")),
    request_body = LookupPayload,
    responses(
        (status = 200, description = "Loan status updated", body = LookupEntry),
        (status = 404, description = "Loan status not found"),
        (status = 409, description = "Loan status already exists")
    )
)]
pub async fn update_loan_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LookupPayload>,
) -> AppResult<Json<LookupEntry>> {
    validate_payload(&payload)?;
    Ok(Json(state.services.loan_statuses.update(id, &payload).await?))
}

/// Delete a loan status
#[utoipa::path(
    delete,
    path = "/loan-statuses/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Loan status ID")),
    responses(
        (status = 204, description = "Loan status deleted"),
        (status = 404, description = "Loan status not found")
    )
)]
pub async fn delete_loan_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.loan_statuses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Room statuses ----

/// List room statuses
#[utoipa::path(
    get,
    path = "/room-statuses",
    tag = "lookups",
    params(PageQuery, FilterQuery),
    responses((status = 200, description = "Paginated room status listing"))
)]
pub async fn list_room_statuses(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<FilterQuery>,
) -> AppResult<Json<Paginated<LookupEntry>>> {
    Ok(Json(state.services.room_statuses.list(page, filter).await?))
}

/// Get a room status by id
#[utoipa::path(
    get,
    path = "/room-statuses/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Room status ID")),
    responses(
        (status = 200, description = "The room status", body = LookupEntry),
        (status = 404, description = "Room status not found")
    )
)]
pub async fn get_room_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LookupEntry>> {
    Ok(Json(state.services.room_statuses.get_by_id(id).await?))
}

/// Create a room status
#[utoipa::path(
    post,
    path = "/room-statuses",
    tag = "lookups",
    request_body = LookupPayload,
    responses(
        (status = 201, description = "Room status created", body = LookupEntry),
        (status = 409, description = "Room status already exists")
    )
)]
pub async fn create_room_status(
    State(state): State<AppState>,
    Json(payload): Json<LookupPayload>,
) -> AppResult<(StatusCode, Json<LookupEntry>)> {
    validate_payload(&payload)?;
    let entry = state.services.room_statuses.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Rename a room status
#[utoipa::path(
    put,
    path = "/room-statuses/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Room status ID")),
    request_body = LookupPayload,
    responses(
        (status = 200, description = "Room status updated", body = LookupEntry),
        (status = 404, description = "Room status not found"),
        (status = 409, description = "Room status already exists")
    )
)]
pub async fn update_room_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LookupPayload>,
) -> AppResult<Json<LookupEntry>> {
    validate_payload(&payload)?;
    Ok(Json(state.services.room_statuses.update(id, &payload).await?))
}

/// Delete a room status
#[utoipa::path(
    delete,
    path = "/room-statuses/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Room status ID")),
    responses(
        (status = 204, description = "Room status deleted"),
        (status = 404, description = "Room status not found")
    )
)]
pub async fn delete_room_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.room_statuses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Room locations ----

/// List room locations
#[utoipa::path(
    get,
    path = "/room-locations",
    tag = "lookups",
    params(PageQuery, FilterQuery),
    responses((status = 200, description = "Paginated room location listing"))
)]
pub async fn list_room_locations(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<FilterQuery>,
) -> AppResult<Json<Paginated<LookupEntry>>> {
    Ok(Json(state.services.room_locations.list(page, filter).await?))
}

/// Get a room location by id
#[utoipa::path(
    get,
    path = "/room-locations/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Room location ID")),
    responses(
        (status = 200, description = "The room location", body = LookupEntry),
        (status = 404, description = "Room location not found")
    )
)]
pub async fn get_room_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LookupEntry>> {
    Ok(Json(state.services.room_locations.get_by_id(id).await?))
}

/// Create a room location
#[utoipa::path(
    post,
    path = "/room-locations",
    tag = "lookups",
    request_body = LookupPayload,
    responses(
        (status = 201, description = "Room location created", body = LookupEntry),
        (status = 409, description = "Room location already exists")
    )
)]
pub async fn create_room_location(
    State(state): State<AppState>,
    Json(payload): Json<LookupPayload>,
) -> AppResult<(StatusCode, Json<LookupEntry>)> {
    validate_payload(&payload)?;
    let entry = state.services.room_locations.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Rename a room location
#[utoipa::path(
    put,
    path = "/room-locations/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Room location ID")),
    request_body = LookupPayload,
    responses(
        (status = 200, description = "Room location updated", body = LookupEntry),
        (status = 404, description = "Room location not found"),
        (status = 409, description = "Room location already exists")
    )
)]
pub async fn update_room_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LookupPayload>,
) -> AppResult<Json<LookupEntry>> {
    validate_payload(&payload)?;
    Ok(Json(state.services.room_locations.update(id, &payload).await?))
}

/// Delete a room location
#[utoipa::path(
    delete,
    path = "/room-locations/{id}",
    tag = "lookups",
    params(("id" = i32, Path, description = "Room location ID")),
    responses(
        (status = 204, description = "Room location deleted"),
        (status = 404, description = "Room location not found")
    )
)]
pub async fn delete_room_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.room_locations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
