//! Equipment management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::validate_payload;
use crate::{
    error::AppResult,
    models::{
        equipment::{CreateEquipment, UpdateEquipment},
        filter::FilterQuery,
        pagination::PageQuery,
        Equipment, Paginated,
    },
    AppState,
};

/// List equipment with pagination and optional single-field filtering
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(PageQuery, FilterQuery),
    responses(
        (status = 200, description = "Paginated equipment listing"),
        (status = 400, description = "Invalid pagination or filter parameters")
    )
)]
pub async fn list_equipment(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<FilterQuery>,
) -> AppResult<Json<Paginated<Equipment>>> {
    Ok(Json(state.services.equipment.list(page, filter).await?))
}

/// Get equipment by id
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "The equipment", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    Ok(Json(state.services.equipment.get_by_id(id).await?))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 409, description = "Equipment already exists")
    )
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    Json(payload): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    validate_payload(&payload)?;
    let equipment = state.services.equipment.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Equipment already exists")
    )
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    validate_payload(&payload)?;
    Ok(Json(state.services.equipment.update(id, &payload).await?))
}

/// Delete equipment
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
