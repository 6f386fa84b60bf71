//! Expiración de reservas `Pending` antiguas
//!
//! Desactivada por defecto. Con un TTL configurado, las reservas `Pending`
//! más antiguas que el TTL pasan a `Expired` de forma perezosa en cada
//! admisión y periódicamente mediante un barrido en segundo plano.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info};

use crate::repositories::BookingStore;
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpiryPolicy {
    ttl: Option<Duration>,
}

impl ExpiryPolicy {
    pub fn disabled() -> Self {
        Self { ttl: None }
    }

    pub fn after(ttl: Duration) -> Self {
        Self { ttl: Some(ttl) }
    }

    pub fn from_hours(hours: Option<i64>) -> Self {
        hours.and_then(Duration::try_hours).map(Self::after).unwrap_or_default()
    }

    pub fn is_enabled(&self) -> bool {
        self.ttl.is_some()
    }

    /// Instante antes del cual una reserva `Pending` está caducada.
    /// Un TTL que se sale del rango de fechas no caduca nada.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.ttl.and_then(|ttl| now.checked_sub_signed(ttl))
    }
}

/// Ejecuta un barrido y devuelve cuántas reservas caducaron
pub async fn sweep_once(store: &dyn BookingStore, policy: ExpiryPolicy, now: DateTime<Utc>) -> AppResult<u64> {
    let Some(cutoff) = policy.cutoff(now) else {
        return Ok(0);
    };
    let expired = store.expire_pending_created_before(cutoff).await?;
    if expired > 0 {
        info!(expired, %cutoff, "⏰ Expired stale pending bookings");
    } else {
        debug!(%cutoff, "expiry sweep found nothing to expire");
    }
    Ok(expired)
}

/// Tarea en segundo plano que barre periódicamente las reservas caducadas
pub async fn run_expiry_sweeper(store: Arc<dyn BookingStore>, policy: ExpiryPolicy, every: StdDuration) {
    if !policy.is_enabled() {
        return;
    }
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        if let Err(e) = sweep_once(store.as_ref(), policy, Utc::now()).await {
            error!("❌ Expiry sweep failed: {}", e);
        }
    }
}
