//! Modelo de Motorcycle
//!
//! Este módulo contiene el struct Motorcycle y sus variantes para CRUD operations.
//! Mapea exactamente a la tabla `motorcycles` de PostgreSQL.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use validator::{Validate, ValidationErrors};

use crate::utils::errors::{field_error, AppError, AppResult};
use crate::utils::validation::{max_price_per_day, validate_max_amount, validate_non_negative};

/// Orden de campos para el mensaje principal de validación
const FIELD_ORDER: &[&str] = &["name", "brand", "type", "price_per_day", "image_url", "description"];

/// Disponibilidad manual de la moto - mapea al ENUM motorcycle_status.
/// No depende de las reservas: lo cambia únicamente un administrador.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "motorcycle_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MotorcycleStatus {
    #[default]
    Available,
    Unavailable,
}

/// Motorcycle principal - mapea exactamente a la tabla motorcycles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Motorcycle {
    pub id: i64,
    pub name: String,
    pub brand: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub category: String,
    pub price_per_day: Decimal,
    pub image_url: Option<String>,
    pub status: MotorcycleStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Motorcycle {
    pub fn is_available(&self) -> bool {
        self.status == MotorcycleStatus::Available
    }
}

/// Request para crear una nueva moto
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMotorcycleRequest {
    #[validate(length(min = 1, max = 255, message = "The name field is required and may not exceed 255 characters."))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "The brand field is required and may not exceed 255 characters."))]
    pub brand: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 255, message = "The type field is required and may not exceed 255 characters."))]
    pub category: String,

    pub price_per_day: Decimal,

    #[validate(url(message = "The image url must be a valid URL."))]
    pub image_url: Option<String>,

    #[serde(default)]
    pub status: MotorcycleStatus,

    pub description: Option<String>,
}

impl CreateMotorcycleRequest {
    /// Validar todos los campos, incluido el precio no negativo
    pub fn check(&self) -> AppResult<()> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);
        check_price(&mut errors, Some(self.price_per_day));
        finish(errors)
    }
}

/// Request para actualizar una moto existente; solo se tocan los campos presentes
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMotorcycleRequest {
    #[validate(length(min = 1, max = 255, message = "The name field may not be empty or exceed 255 characters."))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "The brand field may not be empty or exceed 255 characters."))]
    pub brand: Option<String>,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 255, message = "The type field may not be empty or exceed 255 characters."))]
    pub category: Option<String>,

    pub price_per_day: Option<Decimal>,

    #[validate(url(message = "The image url must be a valid URL."))]
    pub image_url: Option<String>,

    pub status: Option<MotorcycleStatus>,

    pub description: Option<String>,
}

impl UpdateMotorcycleRequest {
    pub fn check(&self) -> AppResult<()> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);
        check_price(&mut errors, self.price_per_day);
        finish(errors)
    }

    /// Aplicar los campos presentes sobre la moto actual
    pub fn apply_to(self, motorcycle: &mut Motorcycle) {
        if let Some(name) = self.name {
            motorcycle.name = name;
        }
        if let Some(brand) = self.brand {
            motorcycle.brand = brand;
        }
        if let Some(category) = self.category {
            motorcycle.category = category;
        }
        if let Some(price) = self.price_per_day {
            motorcycle.price_per_day = price;
        }
        if self.image_url.is_some() {
            motorcycle.image_url = self.image_url;
        }
        if let Some(status) = self.status {
            motorcycle.status = status;
        }
        if self.description.is_some() {
            motorcycle.description = self.description;
        }
    }
}

fn check_price(errors: &mut ValidationErrors, price: Option<Decimal>) {
    if let Some(price) = price {
        if validate_non_negative(price).is_err() {
            errors.add(
                "price_per_day",
                field_error("min", "The price per day must be at least 0."),
            );
        } else if validate_max_amount(price, max_price_per_day()).is_err() {
            errors.add(
                "price_per_day",
                field_error("max", "The price per day may not be greater than 9999999999.99."),
            );
        }
    }
}

fn finish(errors: ValidationErrors) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(errors, FIELD_ORDER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn create_request() -> CreateMotorcycleRequest {
        CreateMotorcycleRequest {
            name: "Honda Vario 160".to_string(),
            brand: "Honda".to_string(),
            category: "Matic".to_string(),
            price_per_day: dec(100000),
            image_url: None,
            status: MotorcycleStatus::Available,
            description: None,
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(create_request().check().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut request = create_request();
        request.price_per_day = dec(-1);

        let err = request.check().unwrap_err();
        assert_eq!(err.to_string(), "The price per day must be at least 0.");
    }

    #[test]
    fn test_price_above_column_precision_rejected() {
        let mut request = create_request();
        request.price_per_day = Decimal::MAX;

        let err = request.check().unwrap_err();
        assert_eq!(err.to_string(), "The price per day may not be greater than 9999999999.99.");

        request.price_per_day = max_price_per_day();
        assert!(request.check().is_ok());

        let update = UpdateMotorcycleRequest {
            price_per_day: Some(Decimal::MAX),
            ..Default::default()
        };
        assert!(update.check().is_err());
    }

    #[test]
    fn test_zero_price_allowed() {
        let mut request = create_request();
        request.price_per_day = Decimal::ZERO;
        assert!(request.check().is_ok());
    }

    #[test]
    fn test_empty_name_is_first_failure() {
        let mut request = create_request();
        request.name = String::new();
        request.price_per_day = dec(-5);

        let err = request.check().unwrap_err();
        assert!(err.to_string().starts_with("The name field"));
    }

    #[test]
    fn test_update_request_partial() {
        let request = UpdateMotorcycleRequest {
            status: Some(MotorcycleStatus::Unavailable),
            ..Default::default()
        };
        assert!(request.check().is_ok());

        let request = UpdateMotorcycleRequest {
            image_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(request.check().is_err());
    }

    #[test]
    fn test_apply_only_present_fields() {
        let now = chrono::Utc::now();
        let mut motorcycle = Motorcycle {
            id: 1,
            name: "Yamaha NMAX 155".to_string(),
            brand: "Yamaha".to_string(),
            category: "Maxi Scooter".to_string(),
            price_per_day: dec(150000),
            image_url: None,
            status: MotorcycleStatus::Available,
            description: Some("Skuter maxi".to_string()),
            created_at: now,
            updated_at: now,
        };

        UpdateMotorcycleRequest {
            price_per_day: Some(dec(175000)),
            status: Some(MotorcycleStatus::Unavailable),
            ..Default::default()
        }
        .apply_to(&mut motorcycle);

        assert_eq!(motorcycle.price_per_day, dec(175000));
        assert_eq!(motorcycle.status, MotorcycleStatus::Unavailable);
        assert_eq!(motorcycle.name, "Yamaha NMAX 155");
        assert_eq!(motorcycle.description.as_deref(), Some("Skuter maxi"));
    }

    #[test]
    fn test_status_wire_format() {
        let status: MotorcycleStatus = serde_json::from_str("\"unavailable\"").unwrap();
        assert_eq!(status, MotorcycleStatus::Unavailable);
        assert_eq!(serde_json::to_string(&MotorcycleStatus::Available).unwrap(), "\"available\"");
    }
}
