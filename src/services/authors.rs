//! Author management service

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{self, CreateAuthor, UpdateAuthor},
        filter::{self, FilterQuery},
        pagination::{PageQuery, PageWindow},
        Author, Paginated,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
    default_page_size: i64,
}

impl AuthorsService {
    pub fn new(repository: Repository, default_page_size: i64) -> Self {
        Self { repository, default_page_size }
    }

    pub async fn list(&self, page: PageQuery, filter: FilterQuery) -> AppResult<Paginated<Author>> {
        let window = PageWindow::from_query(&page, self.default_page_size)?;
        let filter = filter::resolve("Author", author::FILTER_FIELDS, &filter)?;
        let (items, total) = self.repository.authors.find_all(&window, filter.as_ref()).await?;
        Ok(Paginated::new(items, total, &window))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.find_by_id(id).await
    }

    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        // Referenced gender must exist
        self.repository.genders.find_by_id(data.gender_id).await?;

        if self
            .repository
            .authors
            .name_exists(&data.firstname, &data.lastname, None)
            .await?
        {
            return Err(AppError::AlreadyExists(format!(
                "Author '{} {}' already exists",
                data.firstname, data.lastname
            )));
        }
        self.repository.authors.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateAuthor) -> AppResult<Author> {
        let current = self.repository.authors.find_by_id(id).await?;

        if let Some(gender_id) = data.gender_id {
            self.repository.genders.find_by_id(gender_id).await?;
        }

        let firstname = data.firstname.as_deref().unwrap_or(&current.firstname);
        let lastname = data.lastname.as_deref().unwrap_or(&current.lastname);
        if self
            .repository
            .authors
            .name_exists(firstname, lastname, Some(id))
            .await?
        {
            return Err(AppError::AlreadyExists(format!(
                "Author '{} {}' already exists",
                firstname, lastname
            )));
        }

        self.repository.authors.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }
}
