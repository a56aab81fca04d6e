//! Active plan (subscription) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        active_plan::CreateActivePlan, filter::FilterQuery, pagination::PageQuery, ActivePlan,
        Paginated,
    },
    AppState,
};

/// List subscriptions with pagination and optional single-field filtering
#[utoipa::path(
    get,
    path = "/active-plans",
    tag = "active-plans",
    params(PageQuery, FilterQuery),
    responses(
        (status = 200, description = "Paginated subscription listing"),
        (status = 400, description = "Invalid pagination or filter parameters")
    )
)]
pub async fn list_active_plans(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(filter): Query<FilterQuery>,
) -> AppResult<Json<Paginated<ActivePlan>>> {
    Ok(Json(state.services.active_plans.list(page, filter).await?))
}

/// Get a subscription by id
#[utoipa::path(
    get,
    path = "/active-plans/{id}",
    tag = "active-plans",
    params(("id" = i32, Path, description = "Active plan ID")),
    responses(
        (status = 200, description = "The subscription", body = ActivePlan),
        (status = 404, description = "Active plan not found")
    )
)]
pub async fn get_active_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActivePlan>> {
    Ok(Json(state.services.active_plans.get_by_id(id).await?))
}

/// Subscribe a user to a plan
#[utoipa::path(
    post,
    path = "/active-plans",
    tag = "active-plans",
    request_body = CreateActivePlan,
    responses(
        (status = 201, description = "Subscription created", body = ActivePlan),
        (status = 404, description = "User, plan or status not found"),
        (status = 409, description = "User already has an active plan")
    )
)]
pub async fn create_active_plan(
    State(state): State<AppState>,
    Json(payload): Json<CreateActivePlan>,
) -> AppResult<(StatusCode, Json<ActivePlan>)> {
    let plan = state.services.active_plans.create(payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// Extend a subscription by the configured number of days
#[utoipa::path(
    post,
    path = "/active-plans/{id}/renew",
    tag = "active-plans",
    params(("id" = i32, Path, description = "Active plan ID")),
    responses(
        (status = 200, description = "Subscription renewed", body = ActivePlan),
        (status = 404, description = "Active plan not found"),
        (status = 409, description = "Subscription already finished or cancelled")
    )
)]
pub async fn renew_active_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActivePlan>> {
    Ok(Json(state.services.active_plans.renew(id).await?))
}

/// Finish a subscription
#[utoipa::path(
    post,
    path = "/active-plans/{id}/finish",
    tag = "active-plans",
    params(("id" = i32, Path, description = "Active plan ID")),
    responses(
        (status = 200, description = "Subscription finished", body = ActivePlan),
        (status = 404, description = "Active plan not found"),
        (status = 409, description = "Subscription already finished or cancelled")
    )
)]
pub async fn finish_active_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActivePlan>> {
    Ok(Json(state.services.active_plans.finish(id).await?))
}

/// Cancel a subscription
#[utoipa::path(
    post,
    path = "/active-plans/{id}/cancel",
    tag = "active-plans",
    params(("id" = i32, Path, description = "Active plan ID")),
    responses(
        (status = 200, description = "Subscription cancelled", body = ActivePlan),
        (status = 404, description = "Active plan not found"),
        (status = 409, description = "Subscription already finished or cancelled")
    )
)]
pub async fn cancel_active_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActivePlan>> {
    Ok(Json(state.services.active_plans.cancel(id).await?))
}

/// Delete a subscription record
#[utoipa::path(
    delete,
    path = "/active-plans/{id}",
    tag = "active-plans",
    params(("id" = i32, Path, description = "Active plan ID")),
    responses(
        (status = 204, description = "Active plan deleted"),
        (status = 404, description = "Active plan not found")
    )
)]
pub async fn delete_active_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.active_plans.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
