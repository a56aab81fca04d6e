//! Editorial management service

use crate::{
    error::{AppError, AppResult},
    models::{
        editorial::{self, CreateEditorial, UpdateEditorial},
        filter::{self, FilterQuery},
        pagination::{PageQuery, PageWindow},
        Editorial, Paginated,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EditorialsService {
    repository: Repository,
    default_page_size: i64,
}

impl EditorialsService {
    pub fn new(repository: Repository, default_page_size: i64) -> Self {
        Self { repository, default_page_size }
    }

    pub async fn list(
        &self,
        page: PageQuery,
        filter: FilterQuery,
    ) -> AppResult<Paginated<Editorial>> {
        let window = PageWindow::from_query(&page, self.default_page_size)?;
        let filter = filter::resolve("Editorial", editorial::FILTER_FIELDS, &filter)?;
        let (items, total) = self
            .repository
            .editorials
            .find_all(&window, filter.as_ref())
            .await?;
        Ok(Paginated::new(items, total, &window))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Editorial> {
        self.repository.editorials.find_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEditorial) -> AppResult<Editorial> {
        if self.repository.editorials.name_exists(&data.name, None).await? {
            return Err(AppError::AlreadyExists(format!(
                "Editorial '{}' already exists",
                data.name
            )));
        }
        if self.repository.editorials.email_exists(&data.email, None).await? {
            return Err(AppError::AlreadyExists(format!(
                "Editorial with email '{}' already exists",
                data.email
            )));
        }
        self.repository.editorials.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEditorial) -> AppResult<Editorial> {
        self.repository.editorials.find_by_id(id).await?;

        if let Some(ref name) = data.name {
            if self.repository.editorials.name_exists(name, Some(id)).await? {
                return Err(AppError::AlreadyExists(format!(
                    "Editorial '{}' already exists",
                    name
                )));
            }
        }
        if let Some(ref email) = data.email {
            if self.repository.editorials.email_exists(email, Some(id)).await? {
                return Err(AppError::AlreadyExists(format!(
                    "Editorial with email '{}' already exists",
                    email
                )));
            }
        }

        self.repository.editorials.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.editorials.delete(id).await
    }
}
