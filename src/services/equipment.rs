//! Equipment management service

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{self, CreateEquipment, UpdateEquipment},
        filter::{self, FilterQuery},
        pagination::{PageQuery, PageWindow},
        Equipment, Paginated,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    default_page_size: i64,
}

impl EquipmentService {
    pub fn new(repository: Repository, default_page_size: i64) -> Self {
        Self { repository, default_page_size }
    }

    pub async fn list(
        &self,
        page: PageQuery,
        filter: FilterQuery,
    ) -> AppResult<Paginated<Equipment>> {
        let window = PageWindow::from_query(&page, self.default_page_size)?;
        let filter = filter::resolve("Equipment", equipment::FILTER_FIELDS, &filter)?;
        let (items, total) = self
            .repository
            .equipment
            .find_all(&window, filter.as_ref())
            .await?;
        Ok(Paginated::new(items, total, &window))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.find_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        if self.repository.equipment.name_exists(&data.name, None).await? {
            return Err(AppError::AlreadyExists(format!(
                "Equipment '{}' already exists",
                data.name
            )));
        }
        self.repository.equipment.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.find_by_id(id).await?;
        if let Some(ref name) = data.name {
            if self.repository.equipment.name_exists(name, Some(id)).await? {
                return Err(AppError::AlreadyExists(format!(
                    "Equipment '{}' already exists",
                    name
                )));
            }
        }
        self.repository.equipment.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }
}
