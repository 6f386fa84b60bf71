use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{BookingFilters, BookingWithMotorcycle, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::dto::ApiResponse;
use crate::models::booking::Booking;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Solicitud pública de reserva
pub fn public_booking_router() -> Router<AppState> {
    Router::new().route("/bookings", post(create_booking))
}

/// Revisión de reservas (solo administradores)
pub fn admin_booking_router() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings))
        .route(
            "/bookings/:id",
            get(get_booking).put(update_booking_status).delete(delete_booking),
        )
}

fn controller(state: &AppState) -> BookingController {
    BookingController::new(state.booking_service.clone())
}

async fn create_booking(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ApiResponse<Booking>>), AppError> {
    let request = CreateBookingRequest::from_json(body)?;
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(filters): Query<BookingFilters>,
) -> Result<Json<ApiResponse<Vec<BookingWithMotorcycle>>>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BookingWithMotorcycle>>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let response = controller(&state).update_status(id, request).await?;
    Ok(Json(response))
}

async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).delete(id).await?;
    Ok(Json(response))
}
