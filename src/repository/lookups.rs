//! Shared repository for the label lookup tables.
//!
//! The five lookup tables (genders, plan_statuses, loan_statuses, room_statuses,
//! room_locations) have identical shapes, so one repository parameterized by
//! table name serves them all.

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{bind_filter, page_clause};
use crate::{
    error::{AppError, AppResult},
    models::{filter::ResolvedFilter, pagination::PageWindow, LookupEntry},
};

#[derive(Clone)]
pub struct LookupRepository {
    pool: Pool<Postgres>,
    table: &'static str,
    /// Human-readable entity name used in error messages
    entity: &'static str,
}

impl LookupRepository {
    pub fn new(pool: Pool<Postgres>, table: &'static str, entity: &'static str) -> Self {
        Self { pool, table, entity }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// List entries with pagination and an optional filter
    pub async fn find_all(
        &self,
        window: &PageWindow,
        filter: Option<&ResolvedFilter>,
    ) -> AppResult<(Vec<LookupEntry>, i64)> {
        let where_clause = match filter {
            Some(f) => format!("WHERE {}", f.condition(1)),
            None => String::new(),
        };

        let count_query = format!("SELECT COUNT(*) FROM {} {}", self.table, where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(f) = filter {
            count = bind_filter!(count, f);
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_query = format!(
            "SELECT * FROM {} {} ORDER BY name {}",
            self.table,
            where_clause,
            page_clause(window),
        );
        let mut rows = sqlx::query_as::<_, LookupEntry>(&select_query);
        if let Some(f) = filter {
            rows = bind_filter!(rows, f);
        }
        let items = rows.fetch_all(&self.pool).await?;

        Ok((items, total))
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count_query = format!("SELECT COUNT(*) FROM {}", self.table);
        Ok(sqlx::query_scalar(&count_query).fetch_one(&self.pool).await?)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<LookupEntry> {
        let query = format!("SELECT * FROM {} WHERE id = $1", self.table);
        sqlx::query_as::<_, LookupEntry>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} with id {} not found", self.entity, id)))
    }

    /// Case-insensitive label lookup
    pub async fn find_by_name(&self, name: &str) -> AppResult<LookupEntry> {
        let query = format!("SELECT * FROM {} WHERE LOWER(name) = LOWER($1)", self.table);
        sqlx::query_as::<_, LookupEntry>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("{} '{}' not found", self.entity, name))
            })
    }

    /// Check whether a label is already taken
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE LOWER(name) = LOWER($1) AND ($2::int4 IS NULL OR id != $2))",
            self.table
        );
        let exists: bool = sqlx::query_scalar(&query)
            .bind(name)
            .bind(exclude_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn create(&self, name: &str) -> AppResult<LookupEntry> {
        let query = format!("INSERT INTO {} (name) VALUES ($1) RETURNING *", self.table);
        Ok(sqlx::query_as::<_, LookupEntry>(&query)
            .bind(name)
            .fetch_one(&self.pool)
            .await?)
    }

    pub async fn update(&self, id: i32, name: &str) -> AppResult<LookupEntry> {
        let query = format!(
            "UPDATE {} SET name = $1, updated_at = $2 WHERE id = $3 RETURNING *",
            self.table
        );
        sqlx::query_as::<_, LookupEntry>(&query)
            .bind(name)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} with id {} not found", self.entity, id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let query = format!("DELETE FROM {} WHERE id = $1", self.table);
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "{} with id {} not found",
                self.entity, id
            )));
        }
        Ok(())
    }
}
