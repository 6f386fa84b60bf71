//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::models::booking::BookingStatus;

/// SQLSTATE de PostgreSQL que indican que otra admisión ganó la carrera
const SERIALIZATION_FAILURE: &str = "40001";
const EXCLUSION_VIOLATION: &str = "23P01";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        errors: ValidationErrors,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Motorcycle {0} is currently not available for rent")]
    VehicleUnavailable(i64),

    #[error("The motorcycle is already booked for the selected dates")]
    DateConflict,

    #[error("Invalid status: '{0}'")]
    InvalidStatus(String),

    #[error("Cannot change booking status from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("End date {end} is before start date {start}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        let lost_race = e
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| code == SERIALIZATION_FAILURE || code == EXCLUSION_VIOLATION)
            .unwrap_or(false);

        if lost_race {
            AppError::DateConflict
        } else {
            AppError::Database(e)
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = headline(&errors, &[]);
        AppError::Validation { message, errors }
    }
}

impl AppError {
    /// Construir un error de validación cuyo mensaje principal es el primer
    /// fallo según el orden de campos indicado
    pub fn validation(errors: ValidationErrors, field_order: &[&str]) -> Self {
        let message = headline(&errors, field_order);
        AppError::Validation { message, errors }
    }
}

/// Primer mensaje de error: primero los campos en `field_order`, luego el resto alfabéticamente
fn headline(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| {
        let rank = field_order
            .iter()
            .position(|f| f == field)
            .unwrap_or(field_order.len());
        (rank, *field)
    });

    fields
        .first()
        .and_then(|(field, field_errors)| {
            field_errors.first().map(|e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("The {} field is invalid.", field.replace('_', " ")),
            })
        })
        .unwrap_or_else(|| "The provided data is invalid".to_string())
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error_response) = match self {
            AppError::Validation { message, errors } => {
                warn!("Validation error: {}", message);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        details: Some(json!(errors)),
                        ..ErrorResponse::new("Validation Error", message, "VALIDATION_ERROR")
                    },
                )
            }

            AppError::NotFound(_) => {
                warn!("Resource not found: {}", message);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new("Not Found", message, "NOT_FOUND"),
                )
            }

            AppError::VehicleUnavailable(_) => {
                warn!("{}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Vehicle Unavailable", message, "VEHICLE_UNAVAILABLE"),
                )
            }

            AppError::DateConflict => {
                warn!("{}", message);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("Date Conflict", message, "DATE_CONFLICT"),
                )
            }

            AppError::InvalidStatus(_) => {
                warn!("{}", message);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::new("Invalid Status", message, "INVALID_STATUS"),
                )
            }

            AppError::InvalidTransition { from, to } => {
                warn!("{}", message);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        details: Some(json!({ "from": from, "to": to })),
                        ..ErrorResponse::new("Invalid Transition", message, "INVALID_TRANSITION")
                    },
                )
            }

            AppError::InvalidRange { .. } => {
                warn!("{}", message);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::new("Invalid Range", message, "INVALID_RANGE"),
                )
            }

            AppError::Unauthorized(msg) => {
                warn!("Unauthorized access: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED"),
                )
            }

            AppError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Database Error",
                        "An error occurred while accessing the database".to_string(),
                        "DB_ERROR",
                    ),
                )
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Internal Server Error",
                        "An unexpected error occurred".to_string(),
                        "INTERNAL_ERROR",
                    ),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Crear un `ValidationError` con mensaje legible
pub fn field_error(code: &'static str, message: &str) -> validator::ValidationError {
    let mut error = validator::ValidationError::new(code);
    error.message = Some(message.to_string().into());
    error
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}
