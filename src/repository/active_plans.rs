//! Active plans repository and storage interface.
//!
//! Same layering as the reservations store: the service depends on
//! [`ActivePlanStore`], the sqlx implementation closes the check-then-act
//! window by re-probing inside a SERIALIZABLE transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use super::{bind_filter, page_clause};
use crate::{
    error::{AppError, AppResult},
    models::{
        active_plan::{ActivePlan, NewActivePlan},
        filter::ResolvedFilter,
        pagination::PageWindow,
        LookupEntry, Plan, User,
    },
};

const SELECT: &str = r#"
    SELECT ap.*, ps.name AS status, p.name AS plan_name
    FROM active_plans ap
    LEFT JOIN plan_statuses ps ON ps.id = ap.status_id
    LEFT JOIN plans p ON p.id = ap.plan_id
"#;

/// Storage operations the active-plan service depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivePlanStore: Send + Sync {
    async fn user(&self, id: i32) -> AppResult<User>;
    async fn plan(&self, id: i32) -> AppResult<Plan>;
    async fn status(&self, id: i32) -> AppResult<LookupEntry>;
    async fn status_by_name(&self, name: String) -> AppResult<LookupEntry>;

    async fn find_all(
        &self,
        window: PageWindow,
        filter: Option<ResolvedFilter>,
    ) -> AppResult<(Vec<ActivePlan>, i64)>;
    async fn find_by_id(&self, id: i32) -> AppResult<ActivePlan>;
    async fn find_for_user(&self, user_id: i32) -> AppResult<Vec<ActivePlan>>;

    /// First ACTIVE plan of the user whose `[created_at, ending_date|finished_date]`
    /// interval intersects `[start, end]`
    async fn find_active_overlapping(
        &self,
        user_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Option<ActivePlan>>;

    async fn insert(&self, data: NewActivePlan) -> AppResult<ActivePlan>;
    async fn set_status(
        &self,
        id: i32,
        status_id: i32,
        finished_date: DateTime<Utc>,
    ) -> AppResult<ActivePlan>;
    async fn set_ending_date(&self, id: i32, ending_date: DateTime<Utc>) -> AppResult<ActivePlan>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct ActivePlansRepository {
    pool: Pool<Postgres>,
}

impl ActivePlansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn overlap_probe(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        user_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool> {
        let conflict: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT ap.id FROM active_plans ap
            JOIN plan_statuses ps ON ps.id = ap.status_id
            WHERE ap.user_id = $1 AND LOWER(ps.name) = 'active'
              AND ap.created_at <= $3
              AND (COALESCE(ap.finished_date, ap.ending_date) IS NULL
                   OR $2 <= COALESCE(ap.finished_date, ap.ending_date))
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(conflict.is_some())
    }
}

#[async_trait]
impl ActivePlanStore for ActivePlansRepository {
    async fn user(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    async fn plan(&self, id: i32) -> AppResult<Plan> {
        sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Plan with id {} not found", id)))
    }

    async fn status(&self, id: i32) -> AppResult<LookupEntry> {
        sqlx::query_as::<_, LookupEntry>("SELECT * FROM plan_statuses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Plan status with id {} not found", id)))
    }

    async fn status_by_name(&self, name: String) -> AppResult<LookupEntry> {
        sqlx::query_as::<_, LookupEntry>(
            "SELECT * FROM plan_statuses WHERE LOWER(name) = LOWER($1)",
        )
        .bind(&name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Plan status '{}' not found", name)))
    }

    async fn find_all(
        &self,
        window: PageWindow,
        filter: Option<ResolvedFilter>,
    ) -> AppResult<(Vec<ActivePlan>, i64)> {
        let where_clause = match &filter {
            Some(f) => format!("WHERE {}", f.condition(1)),
            None => String::new(),
        };

        let count_query = format!("SELECT COUNT(*) FROM active_plans ap {}", where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(f) = &filter {
            count = bind_filter!(count, f);
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_query = format!(
            "{} {} ORDER BY ap.created_at DESC {}",
            SELECT,
            where_clause,
            page_clause(&window),
        );
        let mut rows = sqlx::query_as::<_, ActivePlan>(&select_query);
        if let Some(f) = &filter {
            rows = bind_filter!(rows, f);
        }
        let items = rows.fetch_all(&self.pool).await?;

        Ok((items, total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<ActivePlan> {
        let query = format!("{} WHERE ap.id = $1", SELECT);
        sqlx::query_as::<_, ActivePlan>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Active plan with id {} not found", id)))
    }

    async fn find_for_user(&self, user_id: i32) -> AppResult<Vec<ActivePlan>> {
        let query = format!("{} WHERE ap.user_id = $1 ORDER BY ap.created_at DESC", SELECT);
        Ok(sqlx::query_as::<_, ActivePlan>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_active_overlapping(
        &self,
        user_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Option<ActivePlan>> {
        let query = format!(
            r#"
            {} WHERE ap.user_id = $1 AND LOWER(ps.name) = 'active'
              AND ap.created_at <= $3
              AND (COALESCE(ap.finished_date, ap.ending_date) IS NULL
                   OR $2 <= COALESCE(ap.finished_date, ap.ending_date))
            ORDER BY ap.created_at DESC
            LIMIT 1
            "#,
            SELECT
        );
        let plan = sqlx::query_as::<_, ActivePlan>(&query)
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_optional(&self.pool)
            .await?;
        Ok(plan)
    }

    async fn insert(&self, data: NewActivePlan) -> AppResult<ActivePlan> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        if Self::overlap_probe(&mut tx, data.user_id, Utc::now(), data.ending_date).await? {
            return Err(AppError::AlreadyExists(format!(
                "User {} already has an active plan on the requested window",
                data.user_id
            )));
        }

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO active_plans (user_id, plan_id, status_id, ending_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(data.user_id)
        .bind(data.plan_id)
        .bind(data.status_id)
        .bind(data.ending_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        self.find_by_id(id).await
    }

    async fn set_status(
        &self,
        id: i32,
        status_id: i32,
        finished_date: DateTime<Utc>,
    ) -> AppResult<ActivePlan> {
        let result = sqlx::query(
            "UPDATE active_plans SET status_id = $1, finished_date = $2, updated_at = $3 WHERE id = $4",
        )
        .bind(status_id)
        .bind(finished_date)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Active plan with id {} not found",
                id
            )));
        }

        self.find_by_id(id).await
    }

    async fn set_ending_date(&self, id: i32, ending_date: DateTime<Utc>) -> AppResult<ActivePlan> {
        let result = sqlx::query(
            "UPDATE active_plans SET ending_date = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(ending_date)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Active plan with id {} not found",
                id
            )));
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM active_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Active plan with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
