//! Motor Rental
//!
//! Backend de alquiler de motos: catálogo, admisión de reservas sin
//! solapamientos, ciclo de vida de las reservas y dashboard de administración.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
