//! Modelo de Booking
//!
//! Contiene la entidad Booking, su ciclo de vida (`BookingStatus`) y la tabla
//! explícita de transiciones permitidas.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::utils::errors::{AppError, AppResult};

/// Estado de una reserva - mapea al ENUM booking_status
///
/// `Pending` es el estado inicial. `Rejected`, `Completed` y `Expired` son terminales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "booking_status")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    /// Solo lo asigna el barrido de expiración, nunca un administrador
    Expired,
}

/// Aristas que un administrador puede recorrer. Todo lo demás es inválido,
/// incluidas las auto-transiciones.
const ADMIN_TRANSITIONS: &[(BookingStatus, BookingStatus)] = &[
    (BookingStatus::Pending, BookingStatus::Approved),
    (BookingStatus::Pending, BookingStatus::Rejected),
    (BookingStatus::Approved, BookingStatus::Completed),
];

impl BookingStatus {
    /// Valores aceptados por la operación de actualización de estado
    pub const ADMIN_SETTABLE: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Approved,
        BookingStatus::Rejected,
        BookingStatus::Completed,
    ];

    /// Estados que bloquean nuevas reservas en fechas solapadas
    pub const ACTIVE: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Approved];

    /// Estados que cuentan como ingreso en el dashboard
    pub const REVENUE: [BookingStatus; 2] = [BookingStatus::Approved, BookingStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Approved => "Approved",
            BookingStatus::Rejected => "Rejected",
            BookingStatus::Completed => "Completed",
            BookingStatus::Expired => "Expired",
        }
    }

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    pub fn can_transition_to(&self, to: BookingStatus) -> bool {
        ADMIN_TRANSITIONS.contains(&(*self, to))
    }

    /// Validar la transición y devolver el nuevo estado
    pub fn transition_to(self, to: BookingStatus) -> AppResult<BookingStatus> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(AppError::InvalidTransition { from: self, to })
        }
    }

    /// Parsear el valor de filtro de listados; acepta también `Expired`
    pub fn parse_filter(value: &str) -> AppResult<BookingStatus> {
        match value {
            "Expired" => Ok(BookingStatus::Expired),
            other => other.parse(),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parseo de los literales aceptados por `update_status`
impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ADMIN_SETTABLE
            .iter()
            .copied()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| AppError::InvalidStatus(value.to_string()))
    }
}

/// Booking principal - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Booking {
    pub id: i64,
    pub motorcycle_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos validados listos para insertar; el estado inicial siempre es `Pending`
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub motorcycle_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
}
