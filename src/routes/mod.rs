//! Rutas HTTP
//!
//! Las rutas públicas y las de administración se montan bajo `/api`; las de
//! administración pasan por `require_admin`.

pub mod auth_routes;
pub mod booking_routes;
pub mod dashboard_routes;
pub mod motorcycle_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::middleware::require_admin;
use crate::state::AppState;

/// Router completo de la API, sin capas de transporte (CORS, trazas)
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .merge(auth_routes::public_auth_router())
        .merge(motorcycle_routes::public_motorcycle_router())
        .merge(booking_routes::public_booking_router());

    let admin = Router::new()
        .merge(auth_routes::admin_auth_router())
        .merge(motorcycle_routes::admin_motorcycle_router())
        .merge(booking_routes::admin_booking_router())
        .merge(dashboard_routes::dashboard_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(health))
        .nest("/api", public.merge(admin))
        .with_state(state)
}

/// Endpoint de salud
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
