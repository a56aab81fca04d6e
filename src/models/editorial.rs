//! Editorial (publisher) model and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::filter::FilterField;

/// Editorial record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Editorial {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create editorial request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEditorial {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub address: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
}

/// Update editorial request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEditorial {
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
}

pub const FILTER_FIELDS: &[FilterField] = &[
    FilterField::text("name", "name"),
    FilterField::text("email", "email"),
    FilterField::text("address", "address"),
];
