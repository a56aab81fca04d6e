//! Equipment model and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::filter::FilterField;

/// Equipment record (bookable alongside a room reservation)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    /// Number of units
    pub quantity: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub notes: Option<String>,
}

/// Update equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub notes: Option<String>,
}

pub const FILTER_FIELDS: &[FilterField] = &[
    FilterField::text("name", "name"),
    FilterField::integer("quantity", "quantity"),
];
