//! Error types for Atrium server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable error codes returned in response bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    DbFailure = 2,
    NoSuchObject = 3,
    Duplicate = 4,
    MissingParameters = 5,
    BadFilter = 6,
    BadValue = 7,
    DateInPast = 8,
    FinishBeforeStart = 9,
    ReservationTooLong = 10,
    OutsideWorkingHours = 11,
    RoomPeopleUnauthorized = 12,
    PlanAlreadyFinished = 13,
    PlanAlreadyCancelled = 14,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Missing parameters: {0}")]
    MissingParameters(String),

    #[error("Invalid query filter: {0}")]
    InvalidQueryFilter(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Start date is in the past")]
    DateInPast,

    #[error("Start date must precede finish date")]
    FinishBeforeStart,

    #[error("Reservation exceeds the maximum authorized duration")]
    ReservationTooLong,

    #[error("Reservation falls outside working hours")]
    OutsideWorkingHours,

    #[error("People count is outside the room's allowed range")]
    RoomPeopleUnauthorized,

    #[error("Active plan is already finished")]
    PlanAlreadyFinished,

    #[error("Active plan is already cancelled")]
    PlanAlreadyCancelled,
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchObject, msg.clone())
            }
            AppError::AlreadyExists(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::MissingParameters(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::MissingParameters, msg.clone())
            }
            AppError::InvalidQueryFilter(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadFilter, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) if is_unique_violation(e) => (
                StatusCode::CONFLICT,
                ErrorCode::Duplicate,
                "Record already exists".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::DateInPast => {
                (StatusCode::BAD_REQUEST, ErrorCode::DateInPast, self.to_string())
            }
            AppError::FinishBeforeStart => {
                (StatusCode::BAD_REQUEST, ErrorCode::FinishBeforeStart, self.to_string())
            }
            AppError::ReservationTooLong => {
                (StatusCode::BAD_REQUEST, ErrorCode::ReservationTooLong, self.to_string())
            }
            AppError::OutsideWorkingHours => {
                (StatusCode::BAD_REQUEST, ErrorCode::OutsideWorkingHours, self.to_string())
            }
            AppError::RoomPeopleUnauthorized => (
                StatusCode::BAD_REQUEST,
                ErrorCode::RoomPeopleUnauthorized,
                self.to_string(),
            ),
            AppError::PlanAlreadyFinished => {
                (StatusCode::CONFLICT, ErrorCode::PlanAlreadyFinished, self.to_string())
            }
            AppError::PlanAlreadyCancelled => {
                (StatusCode::CONFLICT, ErrorCode::PlanAlreadyCancelled, self.to_string())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
