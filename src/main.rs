//! Atrium Server - Library & Room Reservation Management System
//!
//! A REST API server for library and room reservation management.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atrium_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("atrium_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Atrium Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, &config);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", put(api::users::update_user))
        .route("/users/:id", delete(api::users::delete_user))
        .route("/users/:id/reservations", get(api::users::get_user_reservations))
        .route("/users/:id/active-plans", get(api::users::get_user_active_plans))
        // Authors
        .route("/authors", get(api::authors::list_authors))
        .route("/authors", post(api::authors::create_author))
        .route("/authors/:id", get(api::authors::get_author))
        .route("/authors/:id", put(api::authors::update_author))
        .route("/authors/:id", delete(api::authors::delete_author))
        // Editorials
        .route("/editorials", get(api::editorials::list_editorials))
        .route("/editorials", post(api::editorials::create_editorial))
        .route("/editorials/:id", get(api::editorials::get_editorial))
        .route("/editorials/:id", put(api::editorials::update_editorial))
        .route("/editorials/:id", delete(api::editorials::delete_editorial))
        // Plans
        .route("/plans", get(api::plans::list_plans))
        .route("/plans", post(api::plans::create_plan))
        .route("/plans/:id", get(api::plans::get_plan))
        .route("/plans/:id", put(api::plans::update_plan))
        .route("/plans/:id", delete(api::plans::delete_plan))
        // Equipment
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        .route("/equipment/:id", delete(api::equipment::delete_equipment))
        // Rooms
        .route("/rooms", get(api::rooms::list_rooms))
        .route("/rooms", post(api::rooms::create_room))
        .route("/rooms/:id", get(api::rooms::get_room))
        .route("/rooms/:id", put(api::rooms::update_room))
        .route("/rooms/:id", delete(api::rooms::delete_room))
        .route("/rooms/:id/reservations", get(api::rooms::get_room_reservations))
        // Reservations
        .route("/reservations", get(api::reservations::list_reservations))
        .route("/reservations", post(api::reservations::create_reservation))
        .route("/reservations/:id", get(api::reservations::get_reservation))
        .route("/reservations/:id", put(api::reservations::update_reservation))
        .route("/reservations/:id", delete(api::reservations::delete_reservation))
        // Active plans
        .route("/active-plans", get(api::active_plans::list_active_plans))
        .route("/active-plans", post(api::active_plans::create_active_plan))
        .route("/active-plans/:id", get(api::active_plans::get_active_plan))
        .route("/active-plans/:id", delete(api::active_plans::delete_active_plan))
        .route("/active-plans/:id/renew", post(api::active_plans::renew_active_plan))
        .route("/active-plans/:id/finish", post(api::active_plans::finish_active_plan))
        .route("/active-plans/:id/cancel", post(api::active_plans::cancel_active_plan))
        // Lookups
        .route("/genders", get(api::lookups::list_genders))
        .route("/genders", post(api::lookups::create_gender))
        .route("/genders/:id", get(api::lookups::get_gender))
        .route("/genders/:id", put(api::lookups::update_gender))
        .route("/genders/:id", delete(api::lookups::delete_gender))
        .route("/plan-statuses", get(api::lookups::list_plan_statuses))
        .route("/plan-statuses", post(api::lookups::create_plan_status))
        .route("/plan-statuses/:id", get(api::lookups::get_plan_status))
        .route("/plan-statuses/:id", put(api::lookups::update_plan_status))
        .route("/plan-statuses/:id", delete(api::lookups::delete_plan_status))
        .route("/loan-statuses", get(api::lookups::list_loan_statuses))
        .route("/loan-statuses", post(api::lookups::create_loan_status))
        .route("/loan-statuses/:id", get(api::lookups::get_loan_status))
        .route("/loan-statuses/:id", put(api::lookups::update_loan_status))
        .route("/loan-statuses/:id", delete(api::lookups::delete_loan_status))
        .route("/room-statuses", get(api::lookups::list_room_statuses))
        .route("/room-statuses", post(api::lookups::create_room_status))
        .route("/room-statuses/:id", get(api::lookups::get_room_status))
        .route("/room-statuses/:id", put(api::lookups::update_room_status))
        .route("/room-statuses/:id", delete(api::lookups::delete_room_status))
        .route("/room-locations", get(api::lookups::list_room_locations))
        .route("/room-locations", post(api::lookups::create_room_location))
        .route("/room-locations/:id", get(api::lookups::get_room_location))
        .route("/room-locations/:id", put(api::lookups::update_room_location))
        .route("/room-locations/:id", delete(api::lookups::delete_room_location))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
