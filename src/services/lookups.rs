//! Shared service for the label lookup tables

use crate::{
    error::{AppError, AppResult},
    models::{
        filter::{self, FilterQuery},
        lookup::{LookupPayload, FILTER_FIELDS},
        pagination::{PageQuery, PageWindow},
        LookupEntry, Paginated,
    },
    repository::lookups::LookupRepository,
};

#[derive(Clone)]
pub struct LookupService {
    repository: LookupRepository,
    default_page_size: i64,
}

impl LookupService {
    pub fn new(repository: LookupRepository, default_page_size: i64) -> Self {
        Self { repository, default_page_size }
    }

    pub async fn list(
        &self,
        page: PageQuery,
        filter: FilterQuery,
    ) -> AppResult<Paginated<LookupEntry>> {
        let window = PageWindow::from_query(&page, self.default_page_size)?;
        let filter = filter::resolve(self.repository.entity(), FILTER_FIELDS, &filter)?;
        let (items, total) = self.repository.find_all(&window, filter.as_ref()).await?;
        Ok(Paginated::new(items, total, &window))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<LookupEntry> {
        self.repository.find_by_id(id).await
    }

    pub async fn create(&self, data: &LookupPayload) -> AppResult<LookupEntry> {
        if self.repository.name_exists(&data.name, None).await? {
            return Err(AppError::AlreadyExists(format!(
                "{} '{}' already exists",
                self.repository.entity(),
                data.name
            )));
        }
        self.repository.create(&data.name).await
    }

    pub async fn update(&self, id: i32, data: &LookupPayload) -> AppResult<LookupEntry> {
        self.repository.find_by_id(id).await?;
        if self.repository.name_exists(&data.name, Some(id)).await? {
            return Err(AppError::AlreadyExists(format!(
                "{} '{}' already exists",
                self.repository.entity(),
                data.name
            )));
        }
        self.repository.update(id, &data.name).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.delete(id).await
    }
}
