//! Middleware del sistema
//!
//! Este módulo contiene el middleware de autenticación de administradores y CORS.

pub mod auth;
pub mod cors;

pub use auth::require_admin;
pub use cors::cors_layer;
