//! Plan management endpoints

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
        plan::{CreatePlan, UpdatePlan},
        Paginated, Plan,
    },
    AppState,
};

/// List plans with pagination and optional single-field filtering
#[utoipa::path(
    get,
    path = "/plans",
    tag = "plans",
    params(PageQuery, FilterQuery),
    responses(
        (status = 200, description = "Paginated plan listing"),
        (status = 400, description = "Invalid pagination or filter parameters")
    )
)]
pub async fn list_plans(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<FilterQuery>,
) -> AppResult<Json<Paginated<Plan>>> {
    Ok(Json(state.services.plans.list(page, filter).await?))
}

/// Get a plan by id
#[utoipa::path(
    get,
    path = "/plans/{id}",
    tag = "plans",
    params(("id" = i32, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "The plan", body = Plan),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn get_plan(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Plan>> {
    Ok(Json(state.services.plans.get_by_id(id).await?))
}

/// Create a plan
#[utoipa::path(
    post,
    path = "/plans",
    tag = "plans",
    request_body = CreatePlan,
    responses(
        (status = 201, description = "Plan created", body = Plan),
        (status = 409, description = "Plan already exists")
    )
)]
pub async fn create_plan(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlan>,
) -> AppResult<(StatusCode, Json<Plan>)> {
    validate_payload(&payload)?;
    let plan = state.services.plans.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// Update a plan
#[utoipa::path(
    put,
    path = "/plans/{id}",
    tag = "plans",
    params(("id" = i32, Path, description = "Plan ID")),
    request_body = UpdatePlan,
    responses(
        (status = 200, description = "Plan updated", body = Plan),
        (status = 404, description = "Plan not found"),
        (status = 409, description = "Plan already exists")
    )
)]
pub async fn update_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePlan>,
) -> AppResult<Json<Plan>> {
    validate_payload(&payload)?;
    Ok(Json(state.services.plans.update(id, &payload).await?))
}

/// Delete a plan
#[utoipa::path(
    delete,
    path = "/plans/{id}",
    tag = "plans",
    params(("id" = i32, Path, description = "Plan ID")),
    responses(
        (status = 204, description = "Plan deleted"),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn delete_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.plans.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
