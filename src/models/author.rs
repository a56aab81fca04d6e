//! Author model and request payloads

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::filter::FilterField;

/// Author record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub gender_id: i32,
    /// Gender label, resolved at read time
    #[sqlx(default)]
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1))]
    pub firstname: String,
    #[validate(length(min = 1))]
    pub lastname: String,
    pub gender_id: i32,
    pub birthdate: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Update author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub gender_id: Option<i32>,
    pub birthdate: Option<NaiveDate>,
    pub notes: Option<String>,
}

pub const FILTER_FIELDS: &[FilterField] = &[
    FilterField::text("firstname", "a.firstname"),
    FilterField::text("lastname", "a.lastname"),
    FilterField::id("gender", "a.gender_id"),
    FilterField::date("birthdate", "a.birthdate"),
];
