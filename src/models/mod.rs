//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL
//! de motos y reservas.

pub mod booking;
pub mod dashboard;
pub mod motorcycle;
