use std::sync::Arc;

use tracing::info;

use crate::dto::ApiResponse;
use crate::models::motorcycle::{CreateMotorcycleRequest, Motorcycle, UpdateMotorcycleRequest};
use crate::repositories::MotorcycleStore;
use crate::utils::errors::{not_found_error, AppError};

pub struct MotorcycleController {
    store: Arc<dyn MotorcycleStore>,
}

impl MotorcycleController {
    pub fn new(store: Arc<dyn MotorcycleStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Motorcycle>>, AppError> {
        let motorcycles = self.store.list_motorcycles().await?;
        Ok(ApiResponse::success(motorcycles))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ApiResponse<Motorcycle>, AppError> {
        let motorcycle = self
            .store
            .find_motorcycle(id)
            .await?
            .ok_or_else(|| not_found_error("Motorcycle", id))?;

        Ok(ApiResponse::success(motorcycle))
    }

    pub async fn create(&self, request: CreateMotorcycleRequest) -> Result<ApiResponse<Motorcycle>, AppError> {
        request.check()?;

        let motorcycle = self.store.create_motorcycle(request).await?;
        info!(motorcycle_id = motorcycle.id, "🏍️ Motorcycle created");

        Ok(ApiResponse::success_with_message(
            motorcycle,
            "Motorcycle created successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateMotorcycleRequest,
    ) -> Result<ApiResponse<Motorcycle>, AppError> {
        request.check()?;

        let motorcycle = self
            .store
            .update_motorcycle(id, request)
            .await?
            .ok_or_else(|| not_found_error("Motorcycle", id))?;
        info!(motorcycle_id = id, status = ?motorcycle.status, "🏍️ Motorcycle updated");

        Ok(ApiResponse::success_with_message(
            motorcycle,
            "Motorcycle updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<()>, AppError> {
        if !self.store.delete_motorcycle(id).await? {
            return Err(not_found_error("Motorcycle", id));
        }
        info!(motorcycle_id = id, "🗑️ Motorcycle deleted with its bookings");

        Ok(ApiResponse::message("Motorcycle deleted successfully".to_string()))
    }
}
