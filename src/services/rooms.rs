//! Room management service

use crate::{
    error::{AppError, AppResult},
    models::{
        filter::{self, FilterQuery},
        pagination::{PageQuery, PageWindow},
        room::{self, CreateRoom, UpdateRoom},
        Paginated, Room,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RoomsService {
    repository: Repository,
    default_page_size: i64,
}

impl RoomsService {
    pub fn new(repository: Repository, default_page_size: i64) -> Self {
        Self { repository, default_page_size }
    }

    pub async fn list(&self, page: PageQuery, filter: FilterQuery) -> AppResult<Paginated<Room>> {
        let window = PageWindow::from_query(&page, self.default_page_size)?;
        let filter = filter::resolve("Room", room::FILTER_FIELDS, &filter)?;
        let (items, total) = self.repository.rooms.find_all(&window, filter.as_ref()).await?;
        Ok(Paginated::new(items, total, &window))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Room> {
        self.repository.rooms.find_by_id(id).await
    }

    pub async fn create(&self, data: &CreateRoom) -> AppResult<Room> {
        // Referenced lookups must exist
        self.repository.room_locations.find_by_id(data.location_id).await?;
        self.repository.room_statuses.find_by_id(data.status_id).await?;

        if data.max_people < data.min_people {
            return Err(AppError::Validation(
                "max_people must be greater than or equal to min_people".to_string(),
            ));
        }

        if self.repository.rooms.name_exists(&data.name, None).await? {
            return Err(AppError::AlreadyExists(format!(
                "Room '{}' already exists",
                data.name
            )));
        }

        self.repository.rooms.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateRoom) -> AppResult<Room> {
        let current = self.repository.rooms.find_by_id(id).await?;

        if let Some(location_id) = data.location_id {
            self.repository.room_locations.find_by_id(location_id).await?;
        }
        if let Some(status_id) = data.status_id {
            self.repository.room_statuses.find_by_id(status_id).await?;
        }

        let min_people = data.min_people.unwrap_or(current.min_people);
        let max_people = data.max_people.unwrap_or(current.max_people);
        if max_people < min_people {
            return Err(AppError::Validation(
                "max_people must be greater than or equal to min_people".to_string(),
            ));
        }

        if let Some(ref name) = data.name {
            if self.repository.rooms.name_exists(name, Some(id)).await? {
                return Err(AppError::AlreadyExists(format!(
                    "Room '{}' already exists",
                    name
                )));
            }
        }

        self.repository.rooms.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.rooms.delete(id).await
    }
}
