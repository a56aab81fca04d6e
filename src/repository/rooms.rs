//! Rooms repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{bind_filter, page_clause};
use crate::{
    error::{AppError, AppResult},
    models::{
        filter::ResolvedFilter,
        pagination::PageWindow,
        room::{CreateRoom, Room, UpdateRoom},
    },
};

const SELECT: &str = r#"
    SELECT r.*, rl.name AS location, rs.name AS status
    FROM rooms r
    LEFT JOIN room_locations rl ON rl.id = r.location_id
    LEFT JOIN room_statuses rs ON rs.id = r.status_id
"#;

#[derive(Clone)]
pub struct RoomsRepository {
    pool: Pool<Postgres>,
}

impl RoomsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List rooms with pagination and an optional filter
    pub async fn find_all(
        &self,
        window: &PageWindow,
        filter: Option<&ResolvedFilter>,
    ) -> AppResult<(Vec<Room>, i64)> {
        let where_clause = match filter {
            Some(f) => format!("WHERE {}", f.condition(1)),
            None => String::new(),
        };

        let count_query = format!("SELECT COUNT(*) FROM rooms r {}", where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(f) = filter {
            count = bind_filter!(count, f);
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_query = format!(
            "{} {} ORDER BY r.name {}",
            SELECT,
            where_clause,
            page_clause(window),
        );
        let mut rows = sqlx::query_as::<_, Room>(&select_query);
        if let Some(f) = filter {
            rows = bind_filter!(rows, f);
        }
        let items = rows.fetch_all(&self.pool).await?;

        Ok((items, total))
    }

    pub async fn count(&self) -> AppResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await?)
    }

    /// Get room by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Room> {
        let query = format!("{} WHERE r.id = $1", SELECT);
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", id)))
    }

    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM rooms WHERE LOWER(name) = LOWER($1) AND ($2::int4 IS NULL OR id != $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a room
    pub async fn create(&self, data: &CreateRoom) -> AppResult<Room> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO rooms (name, location_id, status_id, min_people, max_people, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(data.location_id)
        .bind(data.status_id)
        .bind(data.min_people)
        .bind(data.max_people)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;

        self.find_by_id(id).await
    }

    /// Update a room
    pub async fn update(&self, id: i32, data: &UpdateRoom) -> AppResult<Room> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.location_id, "location_id");
        add_field!(data.status_id, "status_id");
        add_field!(data.min_people, "min_people");
        add_field!(data.max_people, "max_people");
        add_field!(data.notes, "notes");

        let query = format!("UPDATE rooms SET {} WHERE id = {}", sets.join(", "), id);

        let mut builder = sqlx::query(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.location_id);
        bind_field!(data.status_id);
        bind_field!(data.min_people);
        bind_field!(data.max_people);
        bind_field!(data.notes);

        let result = builder.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Room with id {} not found", id)));
        }

        self.find_by_id(id).await
    }

    /// Delete a room
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Room with id {} not found", id)));
        }
        Ok(())
    }
}
