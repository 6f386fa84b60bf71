use crate::dto::booking_dto::{BookingFilters, BookingWithMotorcycle, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::dto::ApiResponse;
use crate::models::booking::Booking;
use crate::services::BookingService;
use crate::utils::errors::AppError;

pub struct BookingController {
    service: BookingService,
}

impl BookingController {
    pub fn new(service: BookingService) -> Self {
        Self { service }
    }

    pub async fn create(&self, request: CreateBookingRequest) -> Result<ApiResponse<Booking>, AppError> {
        let booking = self.service.create_booking(request).await?;
        Ok(ApiResponse::success_with_message(
            booking,
            "Booking request submitted successfully.".to_string(),
        ))
    }

    pub async fn list(&self, filters: BookingFilters) -> Result<ApiResponse<Vec<BookingWithMotorcycle>>, AppError> {
        let bookings = self.service.list_bookings(filters.status.as_deref()).await?;
        Ok(ApiResponse::success(bookings))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ApiResponse<BookingWithMotorcycle>, AppError> {
        let booking = self.service.get_booking(id).await?;
        Ok(ApiResponse::success(booking))
    }

    pub async fn update_status(
        &self,
        id: i64,
        request: UpdateBookingStatusRequest,
    ) -> Result<ApiResponse<Booking>, AppError> {
        let booking = self.service.update_status(id, &request.status).await?;
        Ok(ApiResponse::success_with_message(
            booking,
            "Booking status updated successfully.".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse<()>, AppError> {
        self.service.delete_booking(id).await?;
        Ok(ApiResponse::message("Booking deleted successfully".to_string()))
    }
}
