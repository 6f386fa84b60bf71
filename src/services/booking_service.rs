//! Servicio de reservas
//!
//! Admisión de nuevas reservas (validación, disponibilidad, solapamiento,
//! precio e inserción en una sola unidad atómica), cambios de estado y borrado.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::dto::booking_dto::{BookingWithMotorcycle, CreateBookingRequest};
use crate::models::booking::{Booking, BookingStatus};
use crate::repositories::BookingStore;
use crate::services::expiry_service::ExpiryPolicy;
use crate::services::overlap::find_conflict;
use crate::services::pricing::compute_total;
use crate::utils::errors::{not_found_error, AppError, AppResult};

#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingStore>,
    expiry: ExpiryPolicy,
}

impl BookingService {
    pub fn new(bookings: Arc<dyn BookingStore>, expiry: ExpiryPolicy) -> Self {
        Self { bookings, expiry }
    }

    /// Admitir una nueva reserva en estado `Pending`.
    ///
    /// Cada paso es una barrera: validación de campos, existencia de la moto,
    /// disponibilidad manual, solapamiento con reservas activas y cálculo del
    /// precio. Nada se escribe salvo que todos pasen.
    pub async fn create_booking(&self, request: CreateBookingRequest) -> AppResult<Booking> {
        let draft = request.validate_draft()?;
        let motorcycle_id = draft.motorcycle_id;

        let mut scope = self.bookings.begin_admission(motorcycle_id).await?;

        let motorcycle = scope
            .motorcycle()
            .await?
            .ok_or_else(|| not_found_error("Motorcycle", motorcycle_id))?;

        if !motorcycle.is_available() {
            warn!(motorcycle_id, "❌ Booking rejected: motorcycle flagged unavailable");
            return Err(AppError::VehicleUnavailable(motorcycle_id));
        }

        if let Some(cutoff) = self.expiry.cutoff(Utc::now()) {
            let expired = scope.expire_pending_created_before(cutoff).await?;
            if expired > 0 {
                info!(motorcycle_id, expired, "⏰ Expired stale pending bookings before admission");
            }
        }

        let active = scope.active_bookings().await?;
        if let Some(conflict) = find_conflict(motorcycle_id, draft.start_date, draft.end_date, &active) {
            warn!(
                motorcycle_id,
                conflicting_booking_id = conflict.id,
                start_date = %draft.start_date,
                end_date = %draft.end_date,
                "❌ Booking rejected: dates overlap an active booking"
            );
            return Err(AppError::DateConflict);
        }

        let total_price = compute_total(draft.start_date, draft.end_date, motorcycle.price_per_day)?;

        let booking = scope.insert(draft.priced(total_price)).await?;
        scope.commit().await?;

        info!(
            booking_id = booking.id,
            motorcycle_id,
            total_price = %booking.total_price,
            "✅ Booking admitted"
        );
        Ok(booking)
    }

    /// Cambiar el estado de una reserva según la tabla de transiciones
    pub async fn update_status(&self, booking_id: i64, new_status: &str) -> AppResult<Booking> {
        let booking = self
            .bookings
            .find_booking(booking_id)
            .await?
            .ok_or_else(|| not_found_error("Booking", booking_id))?;

        let target: BookingStatus = new_status.parse()?;
        let from = booking.status;
        from.transition_to(target)?;

        match self.bookings.update_status(booking_id, from, target).await? {
            Some(updated) => {
                info!(booking_id, %from, to = %target, "🔄 Booking status updated");
                Ok(updated)
            }
            // Otro administrador cambió o borró la reserva entre la lectura y la escritura
            None => match self.bookings.find_booking(booking_id).await? {
                Some(latest) => Err(AppError::InvalidTransition {
                    from: latest.status,
                    to: target,
                }),
                None => Err(not_found_error("Booking", booking_id)),
            },
        }
    }

    /// Borrado físico, sin restricción de estado
    pub async fn delete_booking(&self, booking_id: i64) -> AppResult<()> {
        if !self.bookings.delete_booking(booking_id).await? {
            return Err(not_found_error("Booking", booking_id));
        }
        info!(booking_id, "🗑️ Booking deleted");
        Ok(())
    }

    pub async fn get_booking(&self, booking_id: i64) -> AppResult<BookingWithMotorcycle> {
        self.bookings
            .find_with_motorcycle(booking_id)
            .await?
            .ok_or_else(|| not_found_error("Booking", booking_id))
    }

    pub async fn list_bookings(&self, status: Option<&str>) -> AppResult<Vec<BookingWithMotorcycle>> {
        let status = status
            .filter(|s| !s.is_empty())
            .map(BookingStatus::parse_filter)
            .transpose()?;
        self.bookings.list_with_motorcycle(status).await
    }

    /// Reservas que hoy bloquean fechas de la moto
    pub async fn get_active_bookings(&self, motorcycle_id: i64) -> AppResult<Vec<Booking>> {
        self.bookings.active_for_motorcycle(motorcycle_id).await
    }
}
