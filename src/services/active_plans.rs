//! Active plan (subscription) lifecycle service.
//!
//! A user holds at most one concurrently active plan. Plans finish or cancel
//! exactly once; renewal pushes the ending date forward by the configured
//! number of days from its current value.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::{
    config::SubscriptionsConfig,
    error::{AppError, AppResult},
    models::{
        active_plan::{
            self, ActivePlan, CreateActivePlan, NewActivePlan, STATUS_ACTIVE, STATUS_CANCELED,
            STATUS_FINISHED,
        },
        filter::{self, FilterQuery},
        pagination::{PageQuery, PageWindow},
        Paginated,
    },
    repository::active_plans::ActivePlanStore,
};

/// No transition leaves a terminal state
fn ensure_not_terminal(plan: &ActivePlan) -> AppResult<()> {
    if plan.is_cancelled() {
        return Err(AppError::PlanAlreadyCancelled);
    }
    if plan.is_finished() {
        return Err(AppError::PlanAlreadyFinished);
    }
    Ok(())
}

#[derive(Clone)]
pub struct ActivePlansService {
    store: Arc<dyn ActivePlanStore>,
    config: SubscriptionsConfig,
    default_page_size: i64,
}

impl ActivePlansService {
    pub fn new(
        store: Arc<dyn ActivePlanStore>,
        config: SubscriptionsConfig,
        default_page_size: i64,
    ) -> Self {
        Self { store, config, default_page_size }
    }

    pub async fn list(
        &self,
        page: PageQuery,
        filter: FilterQuery,
    ) -> AppResult<Paginated<ActivePlan>> {
        let window = PageWindow::from_query(&page, self.default_page_size)?;
        let filter = filter::resolve("Active plan", active_plan::FILTER_FIELDS, &filter)?;
        let (items, total) = self.store.find_all(window, filter).await?;
        Ok(Paginated::new(items, total, &window))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ActivePlan> {
        self.store.find_by_id(id).await
    }

    pub async fn for_user(&self, user_id: i32) -> AppResult<Vec<ActivePlan>> {
        self.store.user(user_id).await?;
        self.store.find_for_user(user_id).await
    }

    /// Subscribe a user to a plan.
    ///
    /// Defaults: status ACTIVE (matched case-insensitively), ending date now
    /// plus the configured subscription length.
    pub async fn create(&self, data: CreateActivePlan) -> AppResult<ActivePlan> {
        self.store.user(data.user_id).await?;
        self.store.plan(data.plan_id).await?;

        let status = match data.status_id {
            Some(id) => self.store.status(id).await?,
            None => self.store.status_by_name(STATUS_ACTIVE.to_string()).await?,
        };

        let now = Utc::now();
        let ending_date = data
            .ending_date
            .unwrap_or_else(|| now + Duration::days(self.config.default_length_days));

        if let Some(existing) = self
            .store
            .find_active_overlapping(data.user_id, now, ending_date)
            .await?
        {
            return Err(AppError::AlreadyExists(format!(
                "User {} already has an active plan (id {}) on the requested window",
                data.user_id, existing.id
            )));
        }

        self.store
            .insert(NewActivePlan {
                user_id: data.user_id,
                plan_id: data.plan_id,
                status_id: status.id,
                ending_date,
            })
            .await
    }

    /// Extend an unfinished plan by the configured number of days
    pub async fn renew(&self, id: i32) -> AppResult<ActivePlan> {
        let plan = self.store.find_by_id(id).await?;
        ensure_not_terminal(&plan)?;

        let base = plan.ending_date.unwrap_or(plan.created_at);
        self.store
            .set_ending_date(id, base + Duration::days(self.config.renewal_days))
            .await
    }

    /// ACTIVE -> FINISHED
    pub async fn finish(&self, id: i32) -> AppResult<ActivePlan> {
        let plan = self.store.find_by_id(id).await?;
        ensure_not_terminal(&plan)?;

        let status = self.store.status_by_name(STATUS_FINISHED.to_string()).await?;
        self.store.set_status(id, status.id, Utc::now()).await
    }

    /// ACTIVE -> CANCELED
    pub async fn cancel(&self, id: i32) -> AppResult<ActivePlan> {
        let plan = self.store.find_by_id(id).await?;
        ensure_not_terminal(&plan)?;

        let status = self.store.status_by_name(STATUS_CANCELED.to_string()).await?;
        self.store.set_status(id, status.id, Utc::now()).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.store.find_by_id(id).await?;
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LookupEntry, Plan, User};
    use crate::repository::active_plans::MockActivePlanStore;
    use chrono::DateTime;
    use rust_decimal::Decimal;

    fn config() -> SubscriptionsConfig {
        SubscriptionsConfig {
            default_length_days: 30,
            renewal_days: 30,
        }
    }

    fn user(id: i32) -> User {
        User {
            id,
            firstname: "Grace".to_string(),
            lastname: "Hopper".to_string(),
            email: "grace@example.org".to_string(),
            phone: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn plan_def(id: i32) -> Plan {
        Plan {
            id,
            name: "Monthly".to_string(),
            description: None,
            price: Decimal::new(1990, 2),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn status(id: i32, name: &str) -> LookupEntry {
        LookupEntry {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn active_plan(id: i32, status_label: &str) -> ActivePlan {
        ActivePlan {
            id,
            user_id: 1,
            plan_id: 1,
            status_id: 1,
            status: Some(status_label.to_string()),
            plan_name: Some("Monthly".to_string()),
            ending_date: Some(Utc::now() + Duration::days(10)),
            finished_date: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn service(mock: MockActivePlanStore) -> ActivePlansService {
        ActivePlansService::new(Arc::new(mock), config(), 20)
    }

    fn expect_user_and_plan(mock: &mut MockActivePlanStore) {
        mock.expect_user().returning(|id| Ok(user(id)));
        mock.expect_plan().returning(|id| Ok(plan_def(id)));
    }

    #[tokio::test]
    async fn test_create_defaults_status_and_ending_date() {
        let mut mock = MockActivePlanStore::new();
        expect_user_and_plan(&mut mock);
        mock.expect_status_by_name()
            .withf(|name| name == STATUS_ACTIVE)
            .returning(|_| Ok(status(1, "ACTIVE")));
        mock.expect_find_active_overlapping()
            .returning(|_, _, _| Ok(None));
        mock.expect_insert()
            .withf(|data| {
                // ending_date defaults to roughly now + 30 days
                let expected = Utc::now() + Duration::days(30);
                (data.ending_date - expected).num_seconds().abs() < 5 && data.status_id == 1
            })
            .returning(|data| {
                let mut plan = active_plan(1, "ACTIVE");
                plan.ending_date = Some(data.ending_date);
                Ok(plan)
            });

        let created = service(mock)
            .create(CreateActivePlan {
                user_id: 1,
                plan_id: 1,
                status_id: None,
                ending_date: None,
            })
            .await
            .unwrap();
        assert!(created.ending_date.is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_overlapping_active_plan() {
        let mut mock = MockActivePlanStore::new();
        expect_user_and_plan(&mut mock);
        mock.expect_status_by_name()
            .returning(|_| Ok(status(1, "ACTIVE")));
        mock.expect_find_active_overlapping()
            .returning(|_, _, _| Ok(Some(active_plan(5, "ACTIVE"))));

        let err = service(mock)
            .create(CreateActivePlan {
                user_id: 1,
                plan_id: 1,
                status_id: None,
                ending_date: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_plan() {
        let mut mock = MockActivePlanStore::new();
        mock.expect_user().returning(|id| Ok(user(id)));
        mock.expect_plan()
            .returning(|id| Err(AppError::NotFound(format!("Plan with id {} not found", id))));

        let err = service(mock)
            .create(CreateActivePlan {
                user_id: 1,
                plan_id: 99,
                status_id: None,
                ending_date: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_renew_extends_from_current_ending_date() {
        let ending: DateTime<Utc> = Utc::now() + Duration::days(3);
        let mut current = active_plan(4, "ACTIVE");
        current.ending_date = Some(ending);

        let mut mock = MockActivePlanStore::new();
        mock.expect_find_by_id()
            .returning(move |_| Ok(current.clone()));
        mock.expect_set_ending_date()
            .withf(move |id, new_ending| *id == 4 && *new_ending == ending + Duration::days(30))
            .returning(|id, new_ending| {
                let mut plan = active_plan(id, "ACTIVE");
                plan.ending_date = Some(new_ending);
                Ok(plan)
            });

        let renewed = service(mock).renew(4).await.unwrap();
        assert_eq!(renewed.ending_date, Some(ending + Duration::days(30)));
    }

    #[tokio::test]
    async fn test_renew_rejects_finished_plan() {
        let mut finished = active_plan(4, "FINISHED");
        finished.finished_date = Some(Utc::now());

        let mut mock = MockActivePlanStore::new();
        mock.expect_find_by_id()
            .returning(move |_| Ok(finished.clone()));

        let err = service(mock).renew(4).await.unwrap_err();
        assert!(matches!(err, AppError::PlanAlreadyFinished));
    }

    #[tokio::test]
    async fn test_finish_sets_terminal_status() {
        let mut mock = MockActivePlanStore::new();
        mock.expect_find_by_id()
            .returning(|id| Ok(active_plan(id, "ACTIVE")));
        mock.expect_status_by_name()
            .withf(|name| name == STATUS_FINISHED)
            .returning(|_| Ok(status(2, "FINISHED")));
        mock.expect_set_status()
            .withf(|_, status_id, _| *status_id == 2)
            .returning(|id, _, finished_date| {
                let mut plan = active_plan(id, "FINISHED");
                plan.finished_date = Some(finished_date);
                Ok(plan)
            });

        let finished = service(mock).finish(3).await.unwrap();
        assert!(finished.finished_date.is_some());
    }

    #[tokio::test]
    async fn test_cancel_after_finish_fails() {
        let mut finished = active_plan(3, "FINISHED");
        finished.finished_date = Some(Utc::now());

        let mut mock = MockActivePlanStore::new();
        mock.expect_find_by_id()
            .returning(move |_| Ok(finished.clone()));

        let err = service(mock).cancel(3).await.unwrap_err();
        assert!(matches!(err, AppError::PlanAlreadyFinished));
    }

    #[tokio::test]
    async fn test_finish_after_cancel_fails() {
        let mut cancelled = active_plan(3, "CANCELED");
        cancelled.finished_date = Some(Utc::now());

        let mut mock = MockActivePlanStore::new();
        mock.expect_find_by_id()
            .returning(move |_| Ok(cancelled.clone()));

        let err = service(mock).finish(3).await.unwrap_err();
        assert!(matches!(err, AppError::PlanAlreadyCancelled));
    }
}
