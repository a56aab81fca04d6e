//! Authors repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{bind_filter, page_clause};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        filter::ResolvedFilter,
        pagination::PageWindow,
    },
};

const SELECT: &str =
    "SELECT a.*, g.name AS gender FROM authors a LEFT JOIN genders g ON g.id = a.gender_id";

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List authors with pagination and an optional filter
    pub async fn find_all(
        &self,
        window: &PageWindow,
        filter: Option<&ResolvedFilter>,
    ) -> AppResult<(Vec<Author>, i64)> {
        let where_clause = match filter {
            Some(f) => format!("WHERE {}", f.condition(1)),
            None => String::new(),
        };

        let count_query = format!("SELECT COUNT(*) FROM authors a {}", where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(f) = filter {
            count = bind_filter!(count, f);
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_query = format!(
            "{} {} ORDER BY a.lastname, a.firstname {}",
            SELECT,
            where_clause,
            page_clause(window),
        );
        let mut rows = sqlx::query_as::<_, Author>(&select_query);
        if let Some(f) = filter {
            rows = bind_filter!(rows, f);
        }
        let items = rows.fetch_all(&self.pool).await?;

        Ok((items, total))
    }

    pub async fn count(&self) -> AppResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?)
    }

    /// Get author by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Author> {
        let query = format!("{} WHERE a.id = $1", SELECT);
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Check whether the (firstname, lastname) pair is already taken
    pub async fn name_exists(
        &self,
        firstname: &str,
        lastname: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM authors
                WHERE LOWER(firstname) = LOWER($1) AND LOWER(lastname) = LOWER($2)
                  AND ($3::int4 IS NULL OR id != $3)
            )
            "#,
        )
        .bind(firstname)
        .bind(lastname)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create an author
    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO authors (firstname, lastname, gender_id, birthdate, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&data.firstname)
        .bind(&data.lastname)
        .bind(data.gender_id)
        .bind(data.birthdate)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;

        self.find_by_id(id).await
    }

    /// Update an author
    pub async fn update(&self, id: i32, data: &UpdateAuthor) -> AppResult<Author> {
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

        add_field!(data.firstname, "firstname");
        add_field!(data.lastname, "lastname");
        add_field!(data.gender_id, "gender_id");
        add_field!(data.birthdate, "birthdate");
        add_field!(data.notes, "notes");

        let query = format!("UPDATE authors SET {} WHERE id = {}", sets.join(", "), id);

        let mut builder = sqlx::query(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.firstname);
        bind_field!(data.lastname);
        bind_field!(data.gender_id);
        bind_field!(data.birthdate);
        bind_field!(data.notes);

        let result = builder.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author with id {} not found", id)));
        }

        self.find_by_id(id).await
    }

    /// Delete an author
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author with id {} not found", id)));
        }
        Ok(())
    }
}
