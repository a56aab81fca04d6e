//! Subscription plan model and request payloads

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::filter::FilterField;

/// Plan definition (distinct from a user's subscription to it)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Plan {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create plan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePlan {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub price: Decimal,
}

/// Update plan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePlan {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub price: Option<Decimal>,
}

pub const FILTER_FIELDS: &[FilterField] = &[
    FilterField::text("name", "name"),
    FilterField::text("description", "description"),
];
