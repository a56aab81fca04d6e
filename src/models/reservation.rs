//! Reservation model and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::filter::FilterField;

/// Room reservation record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
    pub start_date: DateTime<Utc>,
    pub finish_date: DateTime<Utc>,
    pub people: i32,
    /// Room name, resolved at read time
    #[sqlx(default)]
    pub room_name: Option<String>,
    /// Reserved equipment ids, loaded from the junction table
    #[sqlx(skip)]
    pub equipment: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/replace reservation payload. Updates replace the booking wholesale,
/// so the same shape serves both operations.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ReservationPayload {
    pub user_id: i32,
    pub room_id: i32,
    pub start_date: DateTime<Utc>,
    pub finish_date: DateTime<Utc>,
    #[validate(range(min = 1))]
    pub people: i32,
    #[serde(default)]
    pub equipment: Vec<i32>,
}

pub const FILTER_FIELDS: &[FilterField] = &[
    FilterField::id("user", "r.user_id"),
    FilterField::id("room", "r.room_id"),
    FilterField::integer("people", "r.people"),
    FilterField::date("start_date", "r.start_date"),
];

/// Half-open interval intersection: `[a_start, a_end)` meets `[b_start, b_end)`.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        chrono::NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_partial_overlap() {
        assert!(intervals_overlap(at(10, 0), at(12, 0), at(11, 0), at(13, 0)));
        assert!(intervals_overlap(at(11, 0), at(13, 0), at(10, 0), at(12, 0)));
    }

    #[test]
    fn test_containment() {
        assert!(intervals_overlap(at(10, 0), at(14, 0), at(11, 0), at(12, 0)));
        assert!(intervals_overlap(at(11, 0), at(12, 0), at(10, 0), at(14, 0)));
    }

    #[test]
    fn test_back_to_back_is_not_overlap() {
        assert!(!intervals_overlap(at(10, 0), at(12, 0), at(12, 0), at(14, 0)));
        assert!(!intervals_overlap(at(12, 0), at(14, 0), at(10, 0), at(12, 0)));
    }

    #[test]
    fn test_disjoint() {
        assert!(!intervals_overlap(at(8, 0), at(9, 0), at(15, 0), at(16, 0)));
    }
}
