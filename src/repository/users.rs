//! Users repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{bind_filter, page_clause};
use crate::{
    error::{AppError, AppResult},
    models::{
        filter::ResolvedFilter,
        pagination::PageWindow,
        user::{CreateUser, UpdateUser, User},
    },
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List users with pagination and an optional filter
    pub async fn find_all(
        &self,
        window: &PageWindow,
        filter: Option<&ResolvedFilter>,
    ) -> AppResult<(Vec<User>, i64)> {
        let where_clause = match filter {
            Some(f) => format!("WHERE {}", f.condition(1)),
            None => String::new(),
        };

        let count_query = format!("SELECT COUNT(*) FROM users {}", where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(f) = filter {
            count = bind_filter!(count, f);
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_query = format!(
            "SELECT * FROM users {} ORDER BY lastname, firstname {}",
            where_clause,
            page_clause(window),
        );
        let mut rows = sqlx::query_as::<_, User>(&select_query);
        if let Some(f) = filter {
            rows = bind_filter!(rows, f);
        }
        let items = rows.fetch_all(&self.pool).await?;

        Ok((items, total))
    }

    pub async fn count(&self) -> AppResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?)
    }

    /// Get user by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1) AND ($2::int4 IS NULL OR id != $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a new user
    pub async fn create(&self, user: &CreateUser) -> AppResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (firstname, lastname, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(&user.email)
        .bind(&user.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update an existing user
    pub async fn update(&self, id: i32, user: &UpdateUser) -> AppResult<User> {
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

        add_field!(user.firstname, "firstname");
        add_field!(user.lastname, "lastname");
        add_field!(user.email, "email");
        add_field!(user.phone, "phone");

        let query = format!(
            "UPDATE users SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, User>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(user.firstname);
        bind_field!(user.lastname);
        bind_field!(user.email);
        bind_field!(user.phone);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Delete a user
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }
        Ok(())
    }
}
