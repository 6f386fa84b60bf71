//! Modelos del dashboard de administración

use rust_decimal::Decimal;
use serde::Serialize;

use super::motorcycle::Motorcycle;

/// Resumen de métricas del dashboard
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub daily_revenue: Decimal,
    pub monthly_revenue: Decimal,
    pub active_bookings: i64,
    pub most_rented_motorcycle: Option<Motorcycle>,
}
