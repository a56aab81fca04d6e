//! Active plan (subscription instance) model and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::filter::FilterField;

/// Well-known plan status labels, matched case-insensitively
pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_FINISHED: &str = "FINISHED";
pub const STATUS_CANCELED: &str = "CANCELED";

/// A user's subscription to a plan
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActivePlan {
    pub id: i32,
    pub user_id: i32,
    pub plan_id: i32,
    pub status_id: i32,
    /// Status label, resolved at read time
    #[sqlx(default)]
    pub status: Option<String>,
    /// Plan name, resolved at read time
    #[sqlx(default)]
    pub plan_name: Option<String>,
    pub ending_date: Option<DateTime<Utc>>,
    pub finished_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ActivePlan {
    fn status_is(&self, label: &str) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(label))
    }

    pub fn is_cancelled(&self) -> bool {
        self.status_is(STATUS_CANCELED)
    }

    /// Terminal by explicit date or by status label
    pub fn is_finished(&self) -> bool {
        self.finished_date.is_some() || self.status_is(STATUS_FINISHED)
    }
}

/// Create active plan request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateActivePlan {
    pub user_id: i32,
    pub plan_id: i32,
    /// Defaults to the ACTIVE status when omitted
    pub status_id: Option<i32>,
    /// Defaults to now + the configured subscription length
    pub ending_date: Option<DateTime<Utc>>,
}

/// Resolved insert payload, defaults already applied
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivePlan {
    pub user_id: i32,
    pub plan_id: i32,
    pub status_id: i32,
    pub ending_date: DateTime<Utc>,
}

pub const FILTER_FIELDS: &[FilterField] = &[
    FilterField::id("user", "ap.user_id"),
    FilterField::id("plan", "ap.plan_id"),
    FilterField::id("status", "ap.status_id"),
    FilterField::date("ending_date", "ap.ending_date"),
];
