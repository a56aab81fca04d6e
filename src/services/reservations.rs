//! Room reservation service.
//!
//! Enforces the booking rules before delegating to the store: the referenced
//! user and room must exist, the window must be well-formed and inside working
//! hours, the headcount must fit the room, and the room must be free on the
//! requested window. Updates run the same checks but skip the record being
//! replaced in the overlap query.

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};

use crate::{
    config::ReservationsConfig,
    error::{AppError, AppResult},
    models::{
        filter::{self, FilterQuery},
        pagination::{PageQuery, PageWindow},
        reservation::{self, Reservation, ReservationPayload},
        Paginated,
    },
    repository::reservations::ReservationStore,
};

/// Check ordering, window shape and working hours against the configured limits
fn validate_window(
    start: DateTime<Utc>,
    finish: DateTime<Utc>,
    now: DateTime<Utc>,
    config: &ReservationsConfig,
) -> AppResult<()> {
    if start < now {
        return Err(AppError::DateInPast);
    }
    if finish <= start {
        return Err(AppError::FinishBeforeStart);
    }
    if finish - start > chrono::Duration::hours(config.max_duration_hours) {
        return Err(AppError::ReservationTooLong);
    }

    let opening = NaiveTime::from_hms_opt(config.opening_hour, 0, 0)
        .ok_or_else(|| AppError::Internal("invalid opening_hour configuration".to_string()))?;
    let closing = NaiveTime::from_hms_opt(config.closing_hour, 0, 0)
        .ok_or_else(|| AppError::Internal("invalid closing_hour configuration".to_string()))?;

    // Must fit inside a single working day; finishing exactly at closing is fine
    if start.date_naive() != finish.date_naive()
        || start.time() < opening
        || finish.time() > closing
    {
        return Err(AppError::OutsideWorkingHours);
    }

    Ok(())
}

#[derive(Clone)]
pub struct ReservationsService {
    store: Arc<dyn ReservationStore>,
    config: ReservationsConfig,
    default_page_size: i64,
}

impl ReservationsService {
    pub fn new(
        store: Arc<dyn ReservationStore>,
        config: ReservationsConfig,
        default_page_size: i64,
    ) -> Self {
        Self { store, config, default_page_size }
    }

    pub async fn list(
        &self,
        page: PageQuery,
        filter: FilterQuery,
    ) -> AppResult<Paginated<Reservation>> {
        let window = PageWindow::from_query(&page, self.default_page_size)?;
        let filter = filter::resolve("Reservation", reservation::FILTER_FIELDS, &filter)?;
        let (items, total) = self.store.find_all(window, filter).await?;
        Ok(Paginated::new(items, total, &window))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Reservation> {
        self.store.find_by_id(id).await
    }

    pub async fn for_room(&self, room_id: i32) -> AppResult<Vec<Reservation>> {
        self.store.room(room_id).await?;
        self.store.find_for_room(room_id).await
    }

    pub async fn for_user(&self, user_id: i32) -> AppResult<Vec<Reservation>> {
        self.store.user(user_id).await?;
        self.store.find_for_user(user_id).await
    }

    /// Create a reservation after running every booking rule
    pub async fn create(&self, data: ReservationPayload) -> AppResult<Reservation> {
        self.check(&data, None).await?;
        self.store.insert(data).await
    }

    /// Replace a reservation, skipping itself in the overlap check
    pub async fn update(&self, id: i32, data: ReservationPayload) -> AppResult<Reservation> {
        self.store.find_by_id(id).await?;
        self.check(&data, Some(id)).await?;
        self.store.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.store.find_by_id(id).await?;
        self.store.delete(id).await
    }

    async fn check(&self, data: &ReservationPayload, exclude: Option<i32>) -> AppResult<()> {
        self.store.user(data.user_id).await?;
        let room = self.store.room(data.room_id).await?;

        validate_window(data.start_date, data.finish_date, Utc::now(), &self.config)?;

        if data.people < room.min_people || data.people > room.max_people {
            return Err(AppError::RoomPeopleUnauthorized);
        }

        for equipment_id in &data.equipment {
            if !self.store.equipment_exists(*equipment_id).await? {
                return Err(AppError::NotFound(format!(
                    "Equipment with id {} not found",
                    equipment_id
                )));
            }
        }

        if let Some(existing) = self
            .store
            .find_overlapping(data.room_id, data.start_date, data.finish_date, exclude)
            .await?
        {
            return Err(AppError::AlreadyExists(format!(
                "Room {} is already reserved by reservation {} on the requested window",
                data.room_id, existing.id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Room, User};
    use crate::repository::reservations::MockReservationStore;
    use chrono::Duration;

    fn config() -> ReservationsConfig {
        ReservationsConfig {
            max_duration_hours: 4,
            opening_hour: 8,
            closing_hour: 20,
        }
    }

    fn user(id: i32) -> User {
        User {
            id,
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: "ada@example.org".to_string(),
            phone: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn room(id: i32, min_people: i32, max_people: i32) -> Room {
        Room {
            id,
            name: format!("Room {}", id),
            location_id: 1,
            status_id: 1,
            location: None,
            status: None,
            min_people,
            max_people,
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn reservation(id: i32, payload: &ReservationPayload) -> Reservation {
        Reservation {
            id,
            user_id: payload.user_id,
            room_id: payload.room_id,
            start_date: payload.start_date,
            finish_date: payload.finish_date,
            people: payload.people,
            room_name: None,
            equipment: payload.equipment.clone(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Tomorrow at the given hour, safely inside working hours
    fn tomorrow_at(hour: u32) -> DateTime<Utc> {
        (Utc::now() + Duration::days(1))
            .date_naive()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn payload(room_id: i32, start_hour: u32, finish_hour: u32, people: i32) -> ReservationPayload {
        ReservationPayload {
            user_id: 1,
            room_id,
            start_date: tomorrow_at(start_hour),
            finish_date: tomorrow_at(finish_hour),
            people,
            equipment: vec![],
        }
    }

    fn service(mock: MockReservationStore) -> ReservationsService {
        ReservationsService::new(Arc::new(mock), config(), 20)
    }

    fn expect_user_and_room(mock: &mut MockReservationStore, min: i32, max: i32) {
        mock.expect_user().returning(|id| Ok(user(id)));
        mock.expect_room()
            .returning(move |id| Ok(room(id, min, max)));
    }

    #[tokio::test]
    async fn test_create_succeeds_when_room_is_free() {
        let mut mock = MockReservationStore::new();
        expect_user_and_room(&mut mock, 2, 6);
        mock.expect_find_overlapping()
            .withf(|room_id, _, _, exclude| *room_id == 2 && exclude.is_none())
            .returning(|_, _, _, _| Ok(None));
        mock.expect_insert()
            .returning(|data| Ok(reservation(1, &data)));

        let result = service(mock).create(payload(2, 10, 12, 4)).await;
        assert_eq!(result.unwrap().room_id, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_overlap() {
        let mut mock = MockReservationStore::new();
        expect_user_and_room(&mut mock, 2, 6);
        let existing = reservation(9, &payload(2, 11, 13, 4));
        mock.expect_find_overlapping()
            .returning(move |_, _, _, _| Ok(Some(existing.clone())));

        let err = service(mock).create(payload(2, 10, 12, 4)).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_people_outside_room_range() {
        let mut mock = MockReservationStore::new();
        expect_user_and_room(&mut mock, 2, 6);

        let err = service(mock).create(payload(2, 10, 12, 8)).await.unwrap_err();
        assert!(matches!(err, AppError::RoomPeopleUnauthorized));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_room() {
        let mut mock = MockReservationStore::new();
        mock.expect_user().returning(|id| Ok(user(id)));
        mock.expect_room()
            .returning(|id| Err(AppError::NotFound(format!("Room with id {} not found", id))));

        let err = service(mock).create(payload(99, 10, 12, 4)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_start_in_past() {
        let mut mock = MockReservationStore::new();
        expect_user_and_room(&mut mock, 2, 6);

        let mut data = payload(2, 10, 12, 4);
        data.start_date = Utc::now() - Duration::hours(2);
        data.finish_date = Utc::now() - Duration::hours(1);

        let err = service(mock).create(data).await.unwrap_err();
        assert!(matches!(err, AppError::DateInPast));
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_window() {
        let mut mock = MockReservationStore::new();
        expect_user_and_room(&mut mock, 2, 6);

        let err = service(mock).create(payload(2, 12, 10, 4)).await.unwrap_err();
        assert!(matches!(err, AppError::FinishBeforeStart));
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_reservation() {
        let mut mock = MockReservationStore::new();
        expect_user_and_room(&mut mock, 2, 6);

        // 9:00 -> 15:00 is six hours against a four hour cap
        let err = service(mock).create(payload(2, 9, 15, 4)).await.unwrap_err();
        assert!(matches!(err, AppError::ReservationTooLong));
    }

    #[tokio::test]
    async fn test_create_rejects_outside_working_hours() {
        let mut mock = MockReservationStore::new();
        expect_user_and_room(&mut mock, 2, 6);

        let err = service(mock).create(payload(2, 6, 9, 4)).await.unwrap_err();
        assert!(matches!(err, AppError::OutsideWorkingHours));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_equipment() {
        let mut mock = MockReservationStore::new();
        expect_user_and_room(&mut mock, 2, 6);
        mock.expect_equipment_exists().returning(|_| Ok(false));

        let mut data = payload(2, 10, 12, 4);
        data.equipment = vec![42];

        let err = service(mock).create(data).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_excludes_itself_from_overlap_check() {
        let mut mock = MockReservationStore::new();
        let current = reservation(7, &payload(2, 10, 12, 4));
        mock.expect_find_by_id()
            .returning(move |_| Ok(current.clone()));
        expect_user_and_room(&mut mock, 2, 6);
        mock.expect_find_overlapping()
            .withf(|_, _, _, exclude| *exclude == Some(7))
            .returning(|_, _, _, _| Ok(None));
        mock.expect_update()
            .returning(|id, data| Ok(reservation(id, &data)));

        let result = service(mock).update(7, payload(2, 11, 13, 4)).await;
        assert_eq!(result.unwrap().id, 7);
    }

    #[tokio::test]
    async fn test_delete_requires_existing_record() {
        let mut mock = MockReservationStore::new();
        mock.expect_find_by_id().returning(|id| {
            Err(AppError::NotFound(format!(
                "Reservation with id {} not found",
                id
            )))
        });

        let err = service(mock).delete(404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_window_finishing_at_closing_is_allowed() {
        let start = tomorrow_at(17);
        let finish = tomorrow_at(20);
        assert!(validate_window(start, finish, Utc::now(), &config()).is_ok());
    }
}
