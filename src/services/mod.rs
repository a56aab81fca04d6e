//! Business logic services

pub mod active_plans;
pub mod authors;
pub mod editorials;
pub mod equipment;
pub mod lookups;
pub mod plans;
pub mod reservations;
pub mod rooms;
pub mod users;

use std::sync::Arc;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub authors: authors::AuthorsService,
    pub editorials: editorials::EditorialsService,
    pub plans: plans::PlansService,
    pub equipment: equipment::EquipmentService,
    pub rooms: rooms::RoomsService,
    pub genders: lookups::LookupService,
    pub plan_statuses: lookups::LookupService,
    pub loan_statuses: lookups::LookupService,
    pub room_statuses: lookups::LookupService,
    pub room_locations: lookups::LookupService,
    pub reservations: reservations::ReservationsService,
    pub active_plans: active_plans::ActivePlansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let page_size = config.pagination.default_page_size;
        Self {
            users: users::UsersService::new(repository.clone(), page_size),
            authors: authors::AuthorsService::new(repository.clone(), page_size),
            editorials: editorials::EditorialsService::new(repository.clone(), page_size),
            plans: plans::PlansService::new(repository.clone(), page_size),
            equipment: equipment::EquipmentService::new(repository.clone(), page_size),
            rooms: rooms::RoomsService::new(repository.clone(), page_size),
            genders: lookups::LookupService::new(repository.genders.clone(), page_size),
            plan_statuses: lookups::LookupService::new(repository.plan_statuses.clone(), page_size),
            loan_statuses: lookups::LookupService::new(repository.loan_statuses.clone(), page_size),
            room_statuses: lookups::LookupService::new(repository.room_statuses.clone(), page_size),
            room_locations: lookups::LookupService::new(repository.room_locations.clone(), page_size),
            reservations: reservations::ReservationsService::new(
                Arc::new(repository.reservations.clone()),
                config.reservations.clone(),
                page_size,
            ),
            active_plans: active_plans::ActivePlansService::new(
                Arc::new(repository.active_plans.clone()),
                config.subscriptions.clone(),
                page_size,
            ),
        }
    }
}
