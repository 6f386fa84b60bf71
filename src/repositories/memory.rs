//! Implementación en memoria de los repositorios, para tests y desarrollo
//!
//! Todo el estado vive detrás de un único `tokio::sync::Mutex`; una admisión
//! retiene el lock durante todo su scope, lo que serializa las admisiones.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{AdmissionScope, BookingStore, MotorcycleStore};
use crate::dto::booking_dto::BookingWithMotorcycle;
use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::models::dashboard::DashboardSummary;
use crate::models::motorcycle::{CreateMotorcycleRequest, Motorcycle, UpdateMotorcycleRequest};
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    motorcycles: BTreeMap<i64, Motorcycle>,
    bookings: BTreeMap<i64, Booking>,
    last_motorcycle_id: i64,
    last_booking_id: i64,
}

impl MemoryState {
    fn active_for(&self, motorcycle_id: i64) -> Vec<Booking> {
        let mut active: Vec<Booking> = self
            .bookings
            .values()
            .filter(|b| b.motorcycle_id == motorcycle_id && b.status.is_active())
            .cloned()
            .collect();
        active.sort_by_key(|b| b.start_date);
        active
    }

    fn expire_pending(&mut self, cutoff: DateTime<Utc>, motorcycle_id: Option<i64>) -> u64 {
        let now = Utc::now();
        let mut expired = 0;
        for booking in self.bookings.values_mut() {
            if booking.status == BookingStatus::Pending
                && booking.created_at < cutoff
                && motorcycle_id.map_or(true, |id| booking.motorcycle_id == id)
            {
                booking.status = BookingStatus::Expired;
                booking.updated_at = now;
                expired += 1;
            }
        }
        expired
    }

    fn insert_booking(&mut self, new: NewBooking) -> Booking {
        self.last_booking_id += 1;
        let now = Utc::now();
        let booking = Booking {
            id: self.last_booking_id,
            motorcycle_id: new.motorcycle_id,
            customer_name: new.customer_name,
            customer_phone: new.customer_phone,
            customer_address: new.customer_address,
            start_date: new.start_date,
            end_date: new.end_date,
            total_price: new.total_price,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.bookings.insert(booking.id, booking.clone());
        booking
    }

    fn with_motorcycle(&self, booking: &Booking) -> AppResult<BookingWithMotorcycle> {
        let motorcycle = self.motorcycles.get(&booking.motorcycle_id).cloned().ok_or_else(|| {
            AppError::Internal(format!(
                "booking {} references missing motorcycle {}",
                booking.id, booking.motorcycle_id
            ))
        })?;
        Ok(BookingWithMotorcycle {
            booking: booking.clone(),
            motorcycle,
        })
    }
}

/// Store en memoria que implementa `MotorcycleStore` y `BookingStore`
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insertar una reserva tal cual, conservando id y fechas de auditoría
    pub async fn seed_booking(&self, booking: Booking) {
        let mut state = self.state.lock().await;
        state.last_booking_id = state.last_booking_id.max(booking.id);
        state.bookings.insert(booking.id, booking);
    }
}

#[async_trait]
impl MotorcycleStore for InMemoryStore {
    async fn list_motorcycles(&self) -> AppResult<Vec<Motorcycle>> {
        let state = self.state.lock().await;
        Ok(state.motorcycles.values().cloned().collect())
    }

    async fn find_motorcycle(&self, id: i64) -> AppResult<Option<Motorcycle>> {
        let state = self.state.lock().await;
        Ok(state.motorcycles.get(&id).cloned())
    }

    async fn create_motorcycle(&self, request: CreateMotorcycleRequest) -> AppResult<Motorcycle> {
        let mut state = self.state.lock().await;
        state.last_motorcycle_id += 1;
        let now = Utc::now();
        let motorcycle = Motorcycle {
            id: state.last_motorcycle_id,
            name: request.name,
            brand: request.brand,
            category: request.category,
            price_per_day: request.price_per_day,
            image_url: request.image_url,
            status: request.status,
            description: request.description,
            created_at: now,
            updated_at: now,
        };
        state.motorcycles.insert(motorcycle.id, motorcycle.clone());
        Ok(motorcycle)
    }

    async fn update_motorcycle(&self, id: i64, request: UpdateMotorcycleRequest) -> AppResult<Option<Motorcycle>> {
        let mut state = self.state.lock().await;
        let Some(motorcycle) = state.motorcycles.get_mut(&id) else {
            return Ok(None);
        };
        request.apply_to(motorcycle);
        motorcycle.updated_at = Utc::now();
        Ok(Some(motorcycle.clone()))
    }

    async fn delete_motorcycle(&self, id: i64) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if state.motorcycles.remove(&id).is_none() {
            return Ok(false);
        }
        state.bookings.retain(|_, b| b.motorcycle_id != id);
        Ok(true)
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn begin_admission(&self, motorcycle_id: i64) -> AppResult<Box<dyn AdmissionScope>> {
        let guard = self.state.clone().lock_owned().await;
        let working = (*guard).clone();
        Ok(Box::new(MemoryAdmission {
            guard,
            working,
            motorcycle_id,
        }))
    }

    async fn find_booking(&self, id: i64) -> AppResult<Option<Booking>> {
        let state = self.state.lock().await;
        Ok(state.bookings.get(&id).cloned())
    }

    async fn find_with_motorcycle(&self, id: i64) -> AppResult<Option<BookingWithMotorcycle>> {
        let state = self.state.lock().await;
        state
            .bookings
            .get(&id)
            .map(|booking| state.with_motorcycle(booking))
            .transpose()
    }

    async fn list_with_motorcycle(
        &self,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<BookingWithMotorcycle>> {
        let state = self.state.lock().await;
        let mut bookings: Vec<&Booking> = state
            .bookings
            .values()
            .filter(|b| status.map_or(true, |s| b.status == s))
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        bookings.into_iter().map(|b| state.with_motorcycle(b)).collect()
    }

    async fn active_for_motorcycle(&self, motorcycle_id: i64) -> AppResult<Vec<Booking>> {
        let state = self.state.lock().await;
        Ok(state.active_for(motorcycle_id))
    }

    async fn update_status(
        &self,
        id: i64,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> AppResult<Option<Booking>> {
        let mut state = self.state.lock().await;
        match state.bookings.get_mut(&id) {
            Some(booking) if booking.status == expected => {
                booking.status = status;
                booking.updated_at = Utc::now();
                Ok(Some(booking.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_booking(&self, id: i64) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state.bookings.remove(&id).is_some())
    }

    async fn expire_pending_created_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut state = self.state.lock().await;
        Ok(state.expire_pending(cutoff, None))
    }

    async fn dashboard_summary(
        &self,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
        month_start: DateTime<Utc>,
    ) -> AppResult<DashboardSummary> {
        let state = self.state.lock().await;
        let revenue = |from: DateTime<Utc>, to: Option<DateTime<Utc>>| -> Decimal {
            state
                .bookings
                .values()
                .filter(|b| BookingStatus::REVENUE.contains(&b.status))
                .filter(|b| b.created_at >= from && to.map_or(true, |to| b.created_at < to))
                .map(|b| b.total_price)
                .sum()
        };

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for booking in state.bookings.values() {
            *counts.entry(booking.motorcycle_id).or_default() += 1;
        }
        // Empate: gana el id más bajo
        let most_rented_id = counts
            .into_iter()
            .max_by(|(id_a, count_a), (id_b, count_b)| count_a.cmp(count_b).then(id_b.cmp(id_a)))
            .map(|(id, _)| id);

        Ok(DashboardSummary {
            daily_revenue: revenue(day_start, Some(day_end)),
            monthly_revenue: revenue(month_start, None),
            active_bookings: state.bookings.values().filter(|b| b.status.is_active()).count() as i64,
            most_rented_motorcycle: most_rented_id.and_then(|id| state.motorcycles.get(&id).cloned()),
        })
    }
}

/// Scope de admisión: trabaja sobre una copia y la publica en `commit`
struct MemoryAdmission {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
    motorcycle_id: i64,
}

#[async_trait]
impl AdmissionScope for MemoryAdmission {
    async fn motorcycle(&mut self) -> AppResult<Option<Motorcycle>> {
        Ok(self.working.motorcycles.get(&self.motorcycle_id).cloned())
    }

    async fn expire_pending_created_before(&mut self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        Ok(self.working.expire_pending(cutoff, Some(self.motorcycle_id)))
    }

    async fn active_bookings(&mut self) -> AppResult<Vec<Booking>> {
        Ok(self.working.active_for(self.motorcycle_id))
    }

    async fn insert(&mut self, booking: NewBooking) -> AppResult<Booking> {
        if booking.motorcycle_id != self.motorcycle_id {
            return Err(AppError::Internal(format!(
                "admission scope for motorcycle {} cannot insert for {}",
                self.motorcycle_id, booking.motorcycle_id
            )));
        }
        Ok(self.working.insert_booking(booking))
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryAdmission {
            mut guard, working, ..
        } = *self;
        *guard = working;
        Ok(())
    }
}
