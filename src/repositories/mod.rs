//! Repositorios de persistencia
//!
//! Los servicios dependen de estos traits; `BookingRepository` y
//! `MotorcycleRepository` los implementan sobre PostgreSQL y `InMemoryStore`
//! en memoria para tests y desarrollo.

pub mod booking_repository;
pub mod memory;
pub mod motorcycle_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::dto::booking_dto::BookingWithMotorcycle;
use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::models::dashboard::DashboardSummary;
use crate::models::motorcycle::{CreateMotorcycleRequest, Motorcycle, UpdateMotorcycleRequest};
use crate::utils::errors::AppResult;

pub use booking_repository::BookingRepository;
pub use memory::InMemoryStore;
pub use motorcycle_repository::MotorcycleRepository;

#[async_trait]
pub trait MotorcycleStore: Send + Sync {
    async fn list_motorcycles(&self) -> AppResult<Vec<Motorcycle>>;

    async fn find_motorcycle(&self, id: i64) -> AppResult<Option<Motorcycle>>;

    async fn create_motorcycle(&self, request: CreateMotorcycleRequest) -> AppResult<Motorcycle>;

    /// `None` si la moto no existe
    async fn update_motorcycle(&self, id: i64, request: UpdateMotorcycleRequest) -> AppResult<Option<Motorcycle>>;

    /// Borra la moto y, en cascada, sus reservas. `false` si no existía.
    async fn delete_motorcycle(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Abrir la unidad atómica de admisión para una moto. Mientras el scope
    /// está abierto ninguna otra admisión para esa moto puede confirmar.
    async fn begin_admission(&self, motorcycle_id: i64) -> AppResult<Box<dyn AdmissionScope>>;

    async fn find_booking(&self, id: i64) -> AppResult<Option<Booking>>;

    async fn find_with_motorcycle(&self, id: i64) -> AppResult<Option<BookingWithMotorcycle>>;

    /// Más recientes primero
    async fn list_with_motorcycle(
        &self,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<BookingWithMotorcycle>>;

    /// Reservas `Pending`/`Approved` de la moto
    async fn active_for_motorcycle(&self, motorcycle_id: i64) -> AppResult<Vec<Booking>>;

    /// Cambia el estado solo si sigue siendo `expected`; `None` si la reserva
    /// no existe o su estado cambió entretanto
    async fn update_status(
        &self,
        id: i64,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> AppResult<Option<Booking>>;

    async fn delete_booking(&self, id: i64) -> AppResult<bool>;

    /// Pasa a `Expired` toda reserva `Pending` creada antes de `cutoff`
    async fn expire_pending_created_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;

    async fn dashboard_summary(
        &self,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
        month_start: DateTime<Utc>,
    ) -> AppResult<DashboardSummary>;
}

/// Lecturas y escrituras de una admisión. Soltar el scope sin `commit`
/// descarta todo lo escrito.
#[async_trait]
pub trait AdmissionScope: Send {
    /// La moto de la admisión, bloqueada hasta el final del scope
    async fn motorcycle(&mut self) -> AppResult<Option<Motorcycle>>;

    async fn expire_pending_created_before(&mut self, cutoff: DateTime<Utc>) -> AppResult<u64>;

    async fn active_bookings(&mut self) -> AppResult<Vec<Booking>>;

    async fn insert(&mut self, booking: NewBooking) -> AppResult<Booking>;

    async fn commit(self: Box<Self>) -> AppResult<()>;
}
