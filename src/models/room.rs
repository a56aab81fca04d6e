//! Room model and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::filter::FilterField;

/// Room record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Room {
    pub id: i32,
    pub name: String,
    pub location_id: i32,
    pub status_id: i32,
    /// Location label, resolved at read time
    #[sqlx(default)]
    pub location: Option<String>,
    /// Status label, resolved at read time
    #[sqlx(default)]
    pub status: Option<String>,
    pub min_people: i32,
    pub max_people: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create room request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoom {
    #[validate(length(min = 1))]
    pub name: String,
    pub location_id: i32,
    pub status_id: i32,
    #[validate(range(min = 1))]
    pub min_people: i32,
    #[validate(range(min = 1))]
    pub max_people: i32,
    pub notes: Option<String>,
}

/// Update room request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoom {
    pub name: Option<String>,
    pub location_id: Option<i32>,
    pub status_id: Option<i32>,
    #[validate(range(min = 1))]
    pub min_people: Option<i32>,
    #[validate(range(min = 1))]
    pub max_people: Option<i32>,
    pub notes: Option<String>,
}

pub const FILTER_FIELDS: &[FilterField] = &[
    FilterField::text("name", "r.name"),
    FilterField::id("location", "r.location_id"),
    FilterField::id("status", "r.status_id"),
    FilterField::integer("min_people", "r.min_people"),
    FilterField::integer("max_people", "r.max_people"),
];
