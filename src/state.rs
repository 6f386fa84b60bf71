//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{BookingRepository, BookingStore, InMemoryStore, MotorcycleRepository, MotorcycleStore};
use crate::services::{BookingService, ExpiryPolicy, JwtService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub motorcycles: Arc<dyn MotorcycleStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub booking_service: BookingService,
    pub jwt: JwtService,
}

impl AppState {
    /// Estado respaldado por PostgreSQL
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self::with_stores(
            Arc::new(MotorcycleRepository::new(pool.clone())),
            Arc::new(BookingRepository::new(pool)),
            config,
        )
    }

    /// Estado respaldado por el almacén en memoria
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        let store = InMemoryStore::new();
        Self::with_stores(Arc::new(store.clone()), Arc::new(store), config)
    }

    pub fn with_stores(
        motorcycles: Arc<dyn MotorcycleStore>,
        bookings: Arc<dyn BookingStore>,
        config: EnvironmentConfig,
    ) -> Self {
        let expiry = ExpiryPolicy::from_hours(config.pending_expiry_hours);
        Self {
            booking_service: BookingService::new(bookings.clone(), expiry),
            jwt: JwtService::from_config(&config),
            config: Arc::new(config),
            motorcycles,
            bookings,
        }
    }

    pub fn expiry_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy::from_hours(self.config.pending_expiry_hours)
    }
}
