//! Equipment repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{bind_filter, page_clause};
use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        filter::ResolvedFilter,
        pagination::PageWindow,
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment with pagination and an optional filter
    pub async fn find_all(
        &self,
        window: &PageWindow,
        filter: Option<&ResolvedFilter>,
    ) -> AppResult<(Vec<Equipment>, i64)> {
        let where_clause = match filter {
            Some(f) => format!("WHERE {}", f.condition(1)),
            None => String::new(),
        };

        let count_query = format!("SELECT COUNT(*) FROM equipment {}", where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(f) = filter {
            count = bind_filter!(count, f);
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_query = format!(
            "SELECT * FROM equipment {} ORDER BY name {}",
            where_clause,
            page_clause(window),
        );
        let mut rows = sqlx::query_as::<_, Equipment>(&select_query);
        if let Some(f) = filter {
            rows = bind_filter!(rows, f);
        }
        let items = rows.fetch_all(&self.pool).await?;

        Ok((items, total))
    }

    pub async fn count(&self) -> AppResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(&self.pool)
            .await?)
    }

    /// Get equipment by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))
    }

    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM equipment WHERE LOWER(name) = LOWER($1) AND ($2::int4 IS NULL OR id != $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (name, quantity, notes)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.quantity)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update equipment
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
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
        add_field!(data.quantity, "quantity");
        add_field!(data.notes, "notes");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.quantity);
        bind_field!(data.notes);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))
    }

    /// Delete equipment
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Equipment with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
