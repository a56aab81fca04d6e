//! Reservations repository and storage interface.
//!
//! The service layer talks to [`ReservationStore`] so the booking rules can be
//! tested against an in-memory double. The sqlx implementation re-runs the
//! overlap probe inside a SERIALIZABLE transaction on every write, so two
//! concurrent requests cannot both pass the check and commit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use super::{bind_filter, page_clause};
use crate::{
    error::{AppError, AppResult},
    models::{
        filter::ResolvedFilter,
        pagination::PageWindow,
        reservation::{Reservation, ReservationPayload},
        Room, User,
    },
};

const SELECT: &str =
    "SELECT r.*, rm.name AS room_name FROM reservations r LEFT JOIN rooms rm ON rm.id = r.room_id";

/// Storage operations the reservation service depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn user(&self, id: i32) -> AppResult<User>;
    async fn room(&self, id: i32) -> AppResult<Room>;
    async fn equipment_exists(&self, id: i32) -> AppResult<bool>;

    async fn find_all(
        &self,
        window: PageWindow,
        filter: Option<ResolvedFilter>,
    ) -> AppResult<(Vec<Reservation>, i64)>;
    async fn find_by_id(&self, id: i32) -> AppResult<Reservation>;
    async fn find_for_room(&self, room_id: i32) -> AppResult<Vec<Reservation>>;
    async fn find_for_user(&self, user_id: i32) -> AppResult<Vec<Reservation>>;

    /// First reservation on the room whose window intersects `[start, finish)`,
    /// skipping `exclude` (the record being updated)
    async fn find_overlapping(
        &self,
        room_id: i32,
        start: DateTime<Utc>,
        finish: DateTime<Utc>,
        exclude: Option<i32>,
    ) -> AppResult<Option<Reservation>>;

    async fn insert(&self, data: ReservationPayload) -> AppResult<Reservation>;
    async fn update(&self, id: i32, data: ReservationPayload) -> AppResult<Reservation>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn load_equipment(&self, reservation: &mut Reservation) -> AppResult<()> {
        reservation.equipment = sqlx::query_scalar::<_, i32>(
            "SELECT equipment_id FROM reservation_equipment WHERE reservation_id = $1 ORDER BY equipment_id",
        )
        .bind(reservation.id)
        .fetch_all(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_transaction_serializable(
        tx: &mut sqlx::Transaction<'_, Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Overlap probe executed inside the write transaction
    async fn overlap_probe(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        room_id: i32,
        start: DateTime<Utc>,
        finish: DateTime<Utc>,
        exclude: Option<i32>,
    ) -> AppResult<bool> {
        let conflict: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT id FROM reservations
            WHERE room_id = $1 AND start_date < $3 AND $2 < finish_date
              AND ($4::int4 IS NULL OR id != $4)
            LIMIT 1
            "#,
        )
        .bind(room_id)
        .bind(start)
        .bind(finish)
        .bind(exclude)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(conflict.is_some())
    }

    async fn replace_equipment(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        reservation_id: i32,
        equipment: &[i32],
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM reservation_equipment WHERE reservation_id = $1")
            .bind(reservation_id)
            .execute(&mut **tx)
            .await?;
        for equipment_id in equipment {
            sqlx::query(
                "INSERT INTO reservation_equipment (reservation_id, equipment_id) VALUES ($1, $2)",
            )
            .bind(reservation_id)
            .bind(equipment_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationStore for ReservationsRepository {
    async fn user(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    async fn room(&self, id: i32) -> AppResult<Room> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", id)))
    }

    async fn equipment_exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipment WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn find_all(
        &self,
        window: PageWindow,
        filter: Option<ResolvedFilter>,
    ) -> AppResult<(Vec<Reservation>, i64)> {
        let where_clause = match &filter {
            Some(f) => format!("WHERE {}", f.condition(1)),
            None => String::new(),
        };

        let count_query = format!("SELECT COUNT(*) FROM reservations r {}", where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(f) = &filter {
            count = bind_filter!(count, f);
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_query = format!(
            "{} {} ORDER BY r.start_date {}",
            SELECT,
            where_clause,
            page_clause(&window),
        );
        let mut rows = sqlx::query_as::<_, Reservation>(&select_query);
        if let Some(f) = &filter {
            rows = bind_filter!(rows, f);
        }
        let mut items = rows.fetch_all(&self.pool).await?;

        for reservation in &mut items {
            self.load_equipment(reservation).await?;
        }

        Ok((items, total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Reservation> {
        let query = format!("{} WHERE r.id = $1", SELECT);
        let mut reservation = sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))?;

        self.load_equipment(&mut reservation).await?;
        Ok(reservation)
    }

    async fn find_for_room(&self, room_id: i32) -> AppResult<Vec<Reservation>> {
        let query = format!("{} WHERE r.room_id = $1 ORDER BY r.start_date", SELECT);
        let mut items = sqlx::query_as::<_, Reservation>(&query)
            .bind(room_id)
            .fetch_all(&self.pool)
            .await?;
        for reservation in &mut items {
            self.load_equipment(reservation).await?;
        }
        Ok(items)
    }

    async fn find_for_user(&self, user_id: i32) -> AppResult<Vec<Reservation>> {
        let query = format!("{} WHERE r.user_id = $1 ORDER BY r.start_date", SELECT);
        let mut items = sqlx::query_as::<_, Reservation>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        for reservation in &mut items {
            self.load_equipment(reservation).await?;
        }
        Ok(items)
    }

    async fn find_overlapping(
        &self,
        room_id: i32,
        start: DateTime<Utc>,
        finish: DateTime<Utc>,
        exclude: Option<i32>,
    ) -> AppResult<Option<Reservation>> {
        let query = format!(
            r#"
            {} WHERE r.room_id = $1 AND r.start_date < $3 AND $2 < r.finish_date
              AND ($4::int4 IS NULL OR r.id != $4)
            ORDER BY r.start_date
            LIMIT 1
            "#,
            SELECT
        );
        let reservation = sqlx::query_as::<_, Reservation>(&query)
            .bind(room_id)
            .bind(start)
            .bind(finish)
            .bind(exclude)
            .fetch_optional(&self.pool)
            .await?;
        Ok(reservation)
    }

    async fn insert(&self, data: ReservationPayload) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;
        Self::set_transaction_serializable(&mut tx).await?;

        if Self::overlap_probe(&mut tx, data.room_id, data.start_date, data.finish_date, None)
            .await?
        {
            return Err(AppError::AlreadyExists(format!(
                "Room {} is already reserved on the requested window",
                data.room_id
            )));
        }

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO reservations (user_id, room_id, start_date, finish_date, people)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(data.user_id)
        .bind(data.room_id)
        .bind(data.start_date)
        .bind(data.finish_date)
        .bind(data.people)
        .fetch_one(&mut *tx)
        .await?;

        Self::replace_equipment(&mut tx, id, &data.equipment).await?;

        tx.commit().await?;

        self.find_by_id(id).await
    }

    async fn update(&self, id: i32, data: ReservationPayload) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;
        Self::set_transaction_serializable(&mut tx).await?;

        if Self::overlap_probe(
            &mut tx,
            data.room_id,
            data.start_date,
            data.finish_date,
            Some(id),
        )
        .await?
        {
            return Err(AppError::AlreadyExists(format!(
                "Room {} is already reserved on the requested window",
                data.room_id
            )));
        }

        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET user_id = $1, room_id = $2, start_date = $3, finish_date = $4,
                people = $5, updated_at = $6
            WHERE id = $7
            "#,
        )
        .bind(data.user_id)
        .bind(data.room_id)
        .bind(data.start_date)
        .bind(data.finish_date)
        .bind(data.people)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Reservation with id {} not found",
                id
            )));
        }

        Self::replace_equipment(&mut tx, id, &data.equipment).await?;

        tx.commit().await?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Reservation with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
