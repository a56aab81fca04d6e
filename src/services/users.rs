//! User management service

use crate::{
    error::{AppError, AppResult},
    models::{
        filter::{self, FilterQuery},
        pagination::{PageQuery, PageWindow},
        user::{self, CreateUser, UpdateUser},
        Paginated, User,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    default_page_size: i64,
}

impl UsersService {
    pub fn new(repository: Repository, default_page_size: i64) -> Self {
        Self { repository, default_page_size }
    }

    pub async fn list(&self, page: PageQuery, filter: FilterQuery) -> AppResult<Paginated<User>> {
        let window = PageWindow::from_query(&page, self.default_page_size)?;
        let filter = filter::resolve("User", user::FILTER_FIELDS, &filter)?;
        let (items, total) = self.repository.users.find_all(&window, filter.as_ref()).await?;
        Ok(Paginated::new(items, total, &window))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.find_by_id(id).await
    }

    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        if self.repository.users.email_exists(&data.email, None).await? {
            return Err(AppError::AlreadyExists(format!(
                "User with email '{}' already exists",
                data.email
            )));
        }
        self.repository.users.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateUser) -> AppResult<User> {
        self.repository.users.find_by_id(id).await?;
        if let Some(ref email) = data.email {
            if self.repository.users.email_exists(email, Some(id)).await? {
                return Err(AppError::AlreadyExists(format!(
                    "User with email '{}' already exists",
                    email
                )));
            }
        }
        self.repository.users.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await
    }
}
