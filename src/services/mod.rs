//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: admisión de
//! reservas, cálculo de precios, expiración, dashboard y emisión de tokens.

pub mod booking_service;
pub mod dashboard_service;
pub mod expiry_service;
pub mod jwt_service;
pub mod overlap;
pub mod pricing;

pub use booking_service::BookingService;
pub use expiry_service::ExpiryPolicy;
pub use jwt_service::JwtService;
