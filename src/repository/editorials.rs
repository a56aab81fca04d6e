//! Editorials repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{bind_filter, page_clause};
use crate::{
    error::{AppError, AppResult},
    models::{
        editorial::{CreateEditorial, Editorial, UpdateEditorial},
        filter::ResolvedFilter,
        pagination::PageWindow,
    },
};

#[derive(Clone)]
pub struct EditorialsRepository {
    pool: Pool<Postgres>,
}

impl EditorialsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List editorials with pagination and an optional filter
    pub async fn find_all(
        &self,
        window: &PageWindow,
        filter: Option<&ResolvedFilter>,
    ) -> AppResult<(Vec<Editorial>, i64)> {
        let where_clause = match filter {
            Some(f) => format!("WHERE {}", f.condition(1)),
            None => String::new(),
        };

        let count_query = format!("SELECT COUNT(*) FROM editorials {}", where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(f) = filter {
            count = bind_filter!(count, f);
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_query = format!(
            "SELECT * FROM editorials {} ORDER BY name {}",
            where_clause,
            page_clause(window),
        );
        let mut rows = sqlx::query_as::<_, Editorial>(&select_query);
        if let Some(f) = filter {
            rows = bind_filter!(rows, f);
        }
        let items = rows.fetch_all(&self.pool).await?;

        Ok((items, total))
    }

    pub async fn count(&self) -> AppResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM editorials")
            .fetch_one(&self.pool)
            .await?)
    }

    /// Get editorial by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Editorial> {
        sqlx::query_as::<_, Editorial>("SELECT * FROM editorials WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Editorial with id {} not found", id)))
    }

    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM editorials WHERE LOWER(name) = LOWER($1) AND ($2::int4 IS NULL OR id != $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM editorials WHERE LOWER(email) = LOWER($1) AND ($2::int4 IS NULL OR id != $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create an editorial
    pub async fn create(&self, data: &CreateEditorial) -> AppResult<Editorial> {
        let row = sqlx::query_as::<_, Editorial>(
            r#"
            INSERT INTO editorials (name, email, address, website)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.address)
        .bind(&data.website)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update an editorial
    pub async fn update(&self, id: i32, data: &UpdateEditorial) -> AppResult<Editorial> {
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
        add_field!(data.email, "email");
        add_field!(data.address, "address");
        add_field!(data.website, "website");

        let query = format!(
            "UPDATE editorials SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Editorial>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.email);
        bind_field!(data.address);
        bind_field!(data.website);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Editorial with id {} not found", id)))
    }

    /// Delete an editorial
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM editorials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Editorial with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
