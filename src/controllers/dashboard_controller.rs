use std::sync::Arc;

use chrono::Utc;

use crate::dto::ApiResponse;
use crate::models::dashboard::DashboardSummary;
use crate::repositories::BookingStore;
use crate::services::dashboard_service;
use crate::utils::errors::AppError;

pub struct DashboardController {
    bookings: Arc<dyn BookingStore>,
}

impl DashboardController {
    pub fn new(bookings: Arc<dyn BookingStore>) -> Self {
        Self { bookings }
    }

    pub async fn summary(&self) -> Result<ApiResponse<DashboardSummary>, AppError> {
        let summary = dashboard_service::dashboard_summary(self.bookings.as_ref(), Utc::now()).await?;
        Ok(ApiResponse::success(summary))
    }
}
