//! Shared model for the label lookup tables
//! (genders, plan statuses, loan statuses, room statuses, room locations)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::filter::FilterField;

/// A single lookup record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LookupEntry {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/replace payload for a lookup record
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LookupPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

pub const FILTER_FIELDS: &[FilterField] = &[FilterField::text("name", "name")];
