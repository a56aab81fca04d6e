//! Plan management service

use crate::{
    error::{AppError, AppResult},
    models::{
        filter::{self, FilterQuery},
        pagination::{PageQuery, PageWindow},
        plan::{self, CreatePlan, UpdatePlan},
        Paginated, Plan,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct PlansService {
    repository: Repository,
    default_page_size: i64,
}

impl PlansService {
    pub fn new(repository: Repository, default_page_size: i64) -> Self {
        Self { repository, default_page_size }
    }

    pub async fn list(&self, page: PageQuery, filter: FilterQuery) -> AppResult<Paginated<Plan>> {
        let window = PageWindow::from_query(&page, self.default_page_size)?;
        let filter = filter::resolve("Plan", plan::FILTER_FIELDS, &filter)?;
        let (items, total) = self.repository.plans.find_all(&window, filter.as_ref()).await?;
        Ok(Paginated::new(items, total, &window))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Plan> {
        self.repository.plans.find_by_id(id).await
    }

    pub async fn create(&self, data: &CreatePlan) -> AppResult<Plan> {
        if self.repository.plans.name_exists(&data.name, None).await? {
            return Err(AppError::AlreadyExists(format!(
                "Plan '{}' already exists",
                data.name
            )));
        }
        self.repository.plans.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdatePlan) -> AppResult<Plan> {
        self.repository.plans.find_by_id(id).await?;
        if let Some(ref name) = data.name {
            if self.repository.plans.name_exists(name, Some(id)).await? {
                return Err(AppError::AlreadyExists(format!(
                    "Plan '{}' already exists",
                    name
                )));
            }
        }
        self.repository.plans.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.plans.delete(id).await
    }
}
