//! Repository layer for database operations

pub mod active_plans;
pub mod authors;
pub mod editorials;
pub mod equipment;
pub mod lookups;
pub mod plans;
pub mod reservations;
pub mod rooms;
pub mod users;

use sqlx::{Pool, Postgres};

use crate::models::pagination::PageWindow;

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub authors: authors::AuthorsRepository,
    pub editorials: editorials::EditorialsRepository,
    pub plans: plans::PlansRepository,
    pub equipment: equipment::EquipmentRepository,
    pub rooms: rooms::RoomsRepository,
    pub genders: lookups::LookupRepository,
    pub plan_statuses: lookups::LookupRepository,
    pub loan_statuses: lookups::LookupRepository,
    pub room_statuses: lookups::LookupRepository,
    pub room_locations: lookups::LookupRepository,
    pub reservations: reservations::ReservationsRepository,
    pub active_plans: active_plans::ActivePlansRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            editorials: editorials::EditorialsRepository::new(pool.clone()),
            plans: plans::PlansRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            rooms: rooms::RoomsRepository::new(pool.clone()),
            genders: lookups::LookupRepository::new(pool.clone(), "genders", "Gender"),
            plan_statuses: lookups::LookupRepository::new(pool.clone(), "plan_statuses", "Plan status"),
            loan_statuses: lookups::LookupRepository::new(pool.clone(), "loan_statuses", "Loan status"),
            room_statuses: lookups::LookupRepository::new(pool.clone(), "room_statuses", "Room status"),
            room_locations: lookups::LookupRepository::new(pool.clone(), "room_locations", "Room location"),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            active_plans: active_plans::ActivePlansRepository::new(pool.clone()),
            pool,
        }
    }
}

/// LIMIT/OFFSET fragment for a validated pagination window
pub(crate) fn page_clause(window: &PageWindow) -> String {
    match window.limit {
        Some(limit) => format!("LIMIT {} OFFSET {}", limit, window.skip()),
        None => String::new(),
    }
}

/// Bind a resolved filter's value(s) onto a query builder
macro_rules! bind_filter {
    ($query:expr, $filter:expr) => {
        match $filter {
            crate::models::filter::ResolvedFilter::Text { pattern, .. } => {
                $query.bind(pattern.clone())
            }
            crate::models::filter::ResolvedFilter::Integer { value, .. } => $query.bind(*value),
            crate::models::filter::ResolvedFilter::Id { value, .. } => $query.bind(*value),
            crate::models::filter::ResolvedFilter::DateRange { start, end, .. } => {
                $query.bind(*start).bind(*end)
            }
        }
    };
}
pub(crate) use bind_filter;
