//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    active_plans, authors, editorials, equipment, health, lookups, plans, reservations, rooms,
    users,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Atrium API",
        version = "0.9.0",
        description = "Library & Room Reservation Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        users::get_user_reservations,
        users::get_user_active_plans,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Editorials
        editorials::list_editorials,
        editorials::get_editorial,
        editorials::create_editorial,
        editorials::update_editorial,
        editorials::delete_editorial,
        // Plans
        plans::list_plans,
        plans::get_plan,
        plans::create_plan,
        plans::update_plan,
        plans::delete_plan,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Rooms
        rooms::list_rooms,
        rooms::get_room,
        rooms::create_room,
        rooms::update_room,
        rooms::delete_room,
        rooms::get_room_reservations,
        // Reservations
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::create_reservation,
        reservations::update_reservation,
        reservations::delete_reservation,
        // Active plans
        active_plans::list_active_plans,
        active_plans::get_active_plan,
        active_plans::create_active_plan,
        active_plans::renew_active_plan,
        active_plans::finish_active_plan,
        active_plans::cancel_active_plan,
        active_plans::delete_active_plan,
        // Lookups
        lookups::list_genders,
        lookups::get_gender,
        lookups::create_gender,
        lookups::update_gender,
        lookups::delete_gender,
        lookups::list_plan_statuses,
        lookups::get_plan_status,
        lookups::create_plan_status,
        lookups::update_plan_status,
        lookups::delete_plan_status,
        lookups::list_loan_statuses,
        lookups::get_loan_status,
        lookups::create_loan_status,
        lookups::update_loan_status,
        lookups::delete_loan_status,
        lookups::list_room_statuses,
        lookups::get_room_status,
        lookups::create_room_status,
        lookups::update_room_status,
        lookups::delete_room_status,
        lookups::list_room_locations,
        lookups::get_room_location,
        lookups::create_room_location,
        lookups::update_room_location,
        lookups::delete_room_location,
    ),
    components(
        schemas(
            crate::models::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            crate::models::Editorial,
            crate::models::editorial::CreateEditorial,
            crate::models::editorial::UpdateEditorial,
            crate::models::Plan,
            crate::models::plan::CreatePlan,
            crate::models::plan::UpdatePlan,
            crate::models::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::Room,
            crate::models::room::CreateRoom,
            crate::models::room::UpdateRoom,
            crate::models::Reservation,
            crate::models::reservation::ReservationPayload,
            crate::models::ActivePlan,
            crate::models::active_plan::CreateActivePlan,
            crate::models::LookupEntry,
            crate::models::lookup::LookupPayload,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management"),
        (name = "authors", description = "Author management"),
        (name = "editorials", description = "Editorial management"),
        (name = "plans", description = "Subscription plan management"),
        (name = "equipment", description = "Equipment management"),
        (name = "rooms", description = "Room management"),
        (name = "reservations", description = "Room reservations"),
        (name = "active-plans", description = "Plan subscriptions"),
        (name = "lookups", description = "Label lookup tables")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
