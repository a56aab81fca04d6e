//! Typed single-field filtering for listing endpoints.
//!
//! Each entity declares a compile-time table of filterable fields. Incoming
//! `field`/`value` query parameters are checked against that table and the raw
//! value is coerced to the field's declared type before any SQL is built.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};

/// Declared type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Case-insensitive substring match
    Text,
    /// Exact numeric equality
    Integer,
    /// Records falling on the given calendar day
    Date,
    /// Foreign-key identifier equality
    Id,
}

/// One entry in an entity's filter allow-list
#[derive(Debug, Clone, Copy)]
pub struct FilterField {
    /// Name accepted in the query string
    pub name: &'static str,
    /// Column (possibly alias-qualified) the condition applies to
    pub column: &'static str,
    pub kind: FieldKind,
}

impl FilterField {
    pub const fn text(name: &'static str, column: &'static str) -> Self {
        Self { name, column, kind: FieldKind::Text }
    }

    pub const fn integer(name: &'static str, column: &'static str) -> Self {
        Self { name, column, kind: FieldKind::Integer }
    }

    pub const fn date(name: &'static str, column: &'static str) -> Self {
        Self { name, column, kind: FieldKind::Date }
    }

    pub const fn id(name: &'static str, column: &'static str) -> Self {
        Self { name, column, kind: FieldKind::Id }
    }
}

/// Raw filter query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct FilterQuery {
    /// Field to filter on (must be in the entity's allow-list)
    pub field: Option<String>,
    /// Value, coerced to the field's declared type
    pub value: Option<String>,
}

/// A validated, typed filter condition
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedFilter {
    Text { column: &'static str, pattern: String },
    Integer { column: &'static str, value: i64 },
    Id { column: &'static str, value: i32 },
    DateRange {
        column: &'static str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl ResolvedFilter {
    /// SQL condition with placeholders starting at `$idx`
    pub fn condition(&self, idx: usize) -> String {
        match self {
            ResolvedFilter::Text { column, .. } => format!("{} ILIKE ${}", column, idx),
            ResolvedFilter::Integer { column, .. } | ResolvedFilter::Id { column, .. } => {
                format!("{} = ${}", column, idx)
            }
            ResolvedFilter::DateRange { column, .. } => {
                format!("{} >= ${} AND {} < ${}", column, idx, column, idx + 1)
            }
        }
    }
}

/// Validate `query` against `allowed` and coerce the value.
///
/// Returns `Ok(None)` when no filter was requested at all.
pub fn resolve(
    entity: &str,
    allowed: &[FilterField],
    query: &FilterQuery,
) -> AppResult<Option<ResolvedFilter>> {
    let (field, value) = match (&query.field, &query.value) {
        (None, None) => return Ok(None),
        (Some(f), Some(v)) => (f.as_str(), v.as_str()),
        _ => {
            return Err(AppError::MissingParameters(format!(
                "{}: filtering requires both field and value",
                entity
            )))
        }
    };

    let descriptor = allowed
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(field))
        .ok_or_else(|| {
            AppError::InvalidQueryFilter(format!("{}: cannot filter on field '{}'", entity, field))
        })?;

    let resolved = match descriptor.kind {
        FieldKind::Text => ResolvedFilter::Text {
            column: descriptor.column,
            pattern: format!("%{}%", value),
        },
        FieldKind::Integer => ResolvedFilter::Integer {
            column: descriptor.column,
            value: value.parse().map_err(|_| {
                AppError::InvalidQueryFilter(format!(
                    "{}: '{}' is not a valid number for field '{}'",
                    entity, value, field
                ))
            })?,
        },
        FieldKind::Id => ResolvedFilter::Id {
            column: descriptor.column,
            value: value.parse().map_err(|_| {
                AppError::InvalidQueryFilter(format!(
                    "{}: '{}' is not a valid identifier for field '{}'",
                    entity, value, field
                ))
            })?,
        },
        FieldKind::Date => {
            let day = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                AppError::InvalidQueryFilter(format!(
                    "{}: '{}' is not a valid date (expected YYYY-MM-DD) for field '{}'",
                    entity, value, field
                ))
            })?;
            let start = day
                .and_hms_opt(0, 0, 0)
                .expect("midnight is always valid")
                .and_utc();
            ResolvedFilter::DateRange {
                column: descriptor.column,
                start,
                end: start + Duration::days(1),
            }
        }
    };

    Ok(Some(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FilterField] = &[
        FilterField::text("name", "r.name"),
        FilterField::integer("people", "r.people"),
        FilterField::date("start", "r.start_date"),
        FilterField::id("room", "r.room_id"),
    ];

    fn q(field: &str, value: &str) -> FilterQuery {
        FilterQuery {
            field: Some(field.to_string()),
            value: Some(value.to_string()),
        }
    }

    #[test]
    fn test_no_filter() {
        assert_eq!(resolve("room", FIELDS, &FilterQuery::default()).unwrap(), None);
    }

    #[test]
    fn test_disallowed_field() {
        let err = resolve("room", FIELDS, &q("password", "x")).unwrap_err();
        assert!(matches!(err, AppError::InvalidQueryFilter(_)));
    }

    #[test]
    fn test_field_without_value() {
        let query = FilterQuery {
            field: Some("name".to_string()),
            value: None,
        };
        let err = resolve("room", FIELDS, &query).unwrap_err();
        assert!(matches!(err, AppError::MissingParameters(_)));
    }

    #[test]
    fn test_text_pattern() {
        let f = resolve("room", FIELDS, &q("name", "Lab")).unwrap().unwrap();
        assert_eq!(
            f,
            ResolvedFilter::Text {
                column: "r.name",
                pattern: "%Lab%".to_string()
            }
        );
        assert_eq!(f.condition(1), "r.name ILIKE $1");
    }

    #[test]
    fn test_integer_coercion() {
        let f = resolve("room", FIELDS, &q("people", "4")).unwrap().unwrap();
        assert_eq!(f, ResolvedFilter::Integer { column: "r.people", value: 4 });

        let err = resolve("room", FIELDS, &q("people", "four")).unwrap_err();
        assert!(matches!(err, AppError::InvalidQueryFilter(_)));
    }

    #[test]
    fn test_date_day_range() {
        let f = resolve("room", FIELDS, &q("start", "2030-01-01")).unwrap().unwrap();
        match f {
            ResolvedFilter::DateRange { start, end, .. } => {
                assert_eq!(end - start, Duration::days(1));
            }
            other => panic!("unexpected filter: {:?}", other),
        }
        let err = resolve("room", FIELDS, &q("start", "01/01/2030")).unwrap_err();
        assert!(matches!(err, AppError::InvalidQueryFilter(_)));
    }

    #[test]
    fn test_date_range_condition_uses_two_placeholders() {
        let f = resolve("room", FIELDS, &q("start", "2030-01-01")).unwrap().unwrap();
        assert_eq!(f.condition(2), "r.start_date >= $2 AND r.start_date < $3");
    }
}
