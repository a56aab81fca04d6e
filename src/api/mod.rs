//! API handlers for Atrium REST endpoints

pub mod active_plans;
pub mod authors;
pub mod editorials;
pub mod equipment;
pub mod health;
pub mod lookups;
pub mod openapi;
pub mod plans;
pub mod reservations;
pub mod rooms;
pub mod users;

use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run `validator` checks on a request payload
pub(crate) fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}
