//! Cálculo del precio total de una reserva

use chrono::NaiveDate;
use rust_decimal::Decimal;

use validator::ValidationErrors;

use crate::utils::errors::{field_error, AppError, AppResult};
use crate::utils::validation::{max_total_price, validate_max_amount};

/// Días facturados: recogida y devolución incluidas, mínimo 1
pub fn billable_days(start: NaiveDate, end: NaiveDate) -> AppResult<i64> {
    if end < start {
        return Err(AppError::InvalidRange { start, end });
    }
    Ok((end - start).num_days() + 1)
}

/// `total = días * precio_por_día`. El precio no se revalida aquí: un valor
/// negativo produce un total negativo. Un total que no cabe en `total_price`
/// es un error de validación sobre ese campo.
pub fn compute_total(start: NaiveDate, end: NaiveDate, price_per_day: Decimal) -> AppResult<Decimal> {
    let days = billable_days(start, end)?;
    match Decimal::from(days).checked_mul(price_per_day) {
        Some(total) if validate_max_amount(total, max_total_price()).is_ok() => Ok(total),
        _ => {
            let mut errors = ValidationErrors::new();
            errors.add(
                "total_price",
                field_error("max", "The booking total may not be greater than 999999999999.99."),
            );
            Err(AppError::validation(errors, &["total_price"]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_same_day_bills_one_day() {
        let rate = Decimal::new(100000, 0);
        assert_eq!(compute_total(d(2025, 6, 10), d(2025, 6, 10), rate).unwrap(), rate);
    }

    #[test]
    fn test_three_days_later_bills_four_days() {
        let rate = Decimal::new(150000, 0);
        assert_eq!(
            compute_total(d(2025, 6, 10), d(2025, 6, 13), rate).unwrap(),
            Decimal::new(600000, 0)
        );
    }

    #[test]
    fn test_across_month_boundary() {
        assert_eq!(billable_days(d(2025, 1, 30), d(2025, 2, 2)).unwrap(), 4);
        assert_eq!(billable_days(d(2024, 2, 28), d(2024, 3, 1)).unwrap(), 3);
    }

    #[test]
    fn test_fractional_rate() {
        let rate = Decimal::new(12550, 2); // 125.50
        assert_eq!(
            compute_total(d(2025, 6, 1), d(2025, 6, 2), rate).unwrap(),
            Decimal::new(25100, 2)
        );
    }

    #[test]
    fn test_end_before_start_is_invalid_range() {
        let err = compute_total(d(2025, 6, 12), d(2025, 6, 10), Decimal::ONE).unwrap_err();
        assert!(matches!(err, AppError::InvalidRange { .. }));
    }

    #[test]
    fn test_overflowing_total_is_validation_error() {
        let err = compute_total(d(2025, 6, 10), d(2025, 6, 11), Decimal::MAX).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "The booking total may not be greater than 999999999999.99.");
    }

    #[test]
    fn test_total_bounded_by_column_precision() {
        let rate = crate::utils::validation::max_price_per_day();
        // 100 días caben, 101 ya no
        assert!(compute_total(d(2025, 1, 1), d(2025, 4, 10), rate).is_ok());
        assert!(compute_total(d(2025, 1, 1), d(2025, 4, 11), rate).is_err());
    }

    #[test]
    fn test_negative_rate_propagates() {
        let total = compute_total(d(2025, 6, 10), d(2025, 6, 11), Decimal::new(-5, 0)).unwrap();
        assert_eq!(total, Decimal::new(-10, 0));
    }
}
