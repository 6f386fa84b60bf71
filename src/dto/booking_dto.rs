use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::ValidationErrors;

use crate::models::booking::{Booking, NewBooking};
use crate::models::motorcycle::Motorcycle;
use crate::utils::errors::{field_error, AppError, AppResult};
use crate::utils::validation::{validate_date, validate_date_order, validate_length, validate_not_empty};
use rust_decimal::Decimal;

const MAX_NAME_LEN: usize = 255;
const MAX_PHONE_LEN: usize = 20;
const MAX_ADDRESS_LEN: usize = 1000;

/// Orden en que se reporta el primer error de validación
pub const BOOKING_FIELD_ORDER: &[&str] = &[
    "motorcycle_id",
    "customer_name",
    "customer_phone",
    "customer_address",
    "start_date",
    "end_date",
];

// Request para crear una reserva. Las fechas llegan como texto para poder
// reportar fechas inválidas como errores de validación por campo.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookingRequest {
    pub motorcycle_id: Option<i64>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub customer_address: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Reserva con campos validados, todavía sin precio
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub motorcycle_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl BookingDraft {
    pub fn priced(self, total_price: Decimal) -> NewBooking {
        NewBooking {
            motorcycle_id: self.motorcycle_id,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_address: self.customer_address,
            start_date: self.start_date,
            end_date: self.end_date,
            total_price,
        }
    }
}

impl CreateBookingRequest {
    /// Construir la request desde el cuerpo JSON. Un campo con un tipo
    /// incorrecto se reporta como error de ese campo junto al resto de fallos.
    pub fn from_json(body: Value) -> AppResult<Self> {
        let fields = match body {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        let mut type_errors = ValidationErrors::new();

        let motorcycle_id = match fields.get("motorcycle_id") {
            None | Some(Value::Null) => None,
            Some(value) => {
                let id = value
                    .as_i64()
                    .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()));
                if id.is_none() {
                    type_errors.add(
                        "motorcycle_id",
                        field_error("integer", "The motorcycle id field must be an integer."),
                    );
                }
                id
            }
        };

        let request = Self {
            motorcycle_id,
            customer_name: string_field(&fields, &mut type_errors, "customer_name", "customer name", "string"),
            customer_phone: string_field(&fields, &mut type_errors, "customer_phone", "customer phone", "string"),
            customer_address: string_field(
                &fields,
                &mut type_errors,
                "customer_address",
                "customer address",
                "string",
            ),
            start_date: string_field(&fields, &mut type_errors, "start_date", "start date", "date"),
            end_date: string_field(&fields, &mut type_errors, "end_date", "end date", "date"),
        };
        if type_errors.is_empty() {
            return Ok(request);
        }

        let typed: Vec<&'static str> = type_errors.field_errors().keys().copied().collect();
        if let Err(AppError::Validation { errors, .. }) = request.validate_draft() {
            for (field, field_errors) in errors.field_errors() {
                if typed.contains(&field) {
                    continue;
                }
                for error in field_errors {
                    type_errors.add(field, error.clone());
                }
            }
        }
        Err(AppError::validation(type_errors, BOOKING_FIELD_ORDER))
    }

    /// Validar todos los campos y acumular cada fallo
    pub fn validate_draft(&self) -> AppResult<BookingDraft> {
        let mut errors = ValidationErrors::new();

        if self.motorcycle_id.is_none() {
            errors.add(
                "motorcycle_id",
                field_error("required", "The motorcycle id field is required."),
            );
        }

        check_text(&mut errors, "customer_name", "customer name", &self.customer_name, MAX_NAME_LEN);
        check_text(&mut errors, "customer_phone", "customer phone", &self.customer_phone, MAX_PHONE_LEN);
        check_text(
            &mut errors,
            "customer_address",
            "customer address",
            &self.customer_address,
            MAX_ADDRESS_LEN,
        );

        let start_date = check_date(&mut errors, "start_date", "start date", &self.start_date);
        let end_date = check_date(&mut errors, "end_date", "end date", &self.end_date);

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if validate_date_order(start, end).is_err() {
                errors.add(
                    "end_date",
                    field_error(
                        "after_or_equal",
                        "The end date field must be a date after or equal to start date.",
                    ),
                );
            }
        }

        match (self.motorcycle_id, start_date, end_date) {
            (Some(motorcycle_id), Some(start_date), Some(end_date)) if errors.is_empty() => {
                Ok(BookingDraft {
                    motorcycle_id,
                    customer_name: self.customer_name.trim().to_string(),
                    customer_phone: self.customer_phone.trim().to_string(),
                    customer_address: self.customer_address.trim().to_string(),
                    start_date,
                    end_date,
                })
            }
            _ => Err(AppError::validation(errors, BOOKING_FIELD_ORDER)),
        }
    }
}

fn string_field(
    fields: &Map<String, Value>,
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    kind: &'static str,
) -> String {
    match fields.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(value)) => value.clone(),
        Some(_) => {
            let message = match kind {
                "date" => format!("The {} field must be a valid date.", label),
                _ => format!("The {} field must be a string.", label),
            };
            errors.add(field, field_error(kind, &message));
            String::new()
        }
    }
}

fn check_text(errors: &mut ValidationErrors, field: &'static str, label: &str, value: &str, max: usize) {
    if validate_not_empty(value).is_err() {
        errors.add(field, field_error("required", &format!("The {} field is required.", label)));
    } else if validate_length(value.trim(), 1, max).is_err() {
        errors.add(
            field,
            field_error(
                "max",
                &format!("The {} field must not be greater than {} characters.", label, max),
            ),
        );
    }
}

fn check_date(errors: &mut ValidationErrors, field: &'static str, label: &str, value: &str) -> Option<NaiveDate> {
    if validate_not_empty(value).is_err() {
        errors.add(field, field_error("required", &format!("The {} field is required.", label)));
        return None;
    }
    match validate_date(value) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(
                field,
                field_error("date", &format!("The {} field must be a valid date.", label)),
            );
            None
        }
    }
}

// Request para cambiar el estado de una reserva
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookingStatusRequest {
    #[serde(default)]
    pub status: String,
}

// Filtros del listado de reservas
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilters {
    pub status: Option<String>,
}

// Reserva con su moto (join de solo lectura)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingWithMotorcycle {
    #[serde(flatten)]
    pub booking: Booking,
    pub motorcycle: Motorcycle,
}
