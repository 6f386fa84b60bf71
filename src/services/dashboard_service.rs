//! Métricas del dashboard de administración (UTC)

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};

use crate::models::dashboard::DashboardSummary;
use crate::repositories::BookingStore;
use crate::utils::errors::{AppError, AppResult};

/// Inicio del día, del día siguiente y del mes que contienen `now`
pub fn reporting_window(now: DateTime<Utc>) -> AppResult<(DateTime<Utc>, DateTime<Utc>, DateTime<Utc>)> {
    let today = now.date_naive();
    let day_start = Utc.from_utc_datetime(&today.and_time(NaiveTime::MIN));
    let month_first = today
        .with_day(1)
        .ok_or_else(|| AppError::Internal(format!("no first day of month for {}", today)))?;
    let month_start = Utc.from_utc_datetime(&month_first.and_time(NaiveTime::MIN));

    Ok((day_start, day_start + Duration::days(1), month_start))
}

pub async fn dashboard_summary(store: &dyn BookingStore, now: DateTime<Utc>) -> AppResult<DashboardSummary> {
    let (day_start, day_end, month_start) = reporting_window(now)?;
    store.dashboard_summary(day_start, day_end, month_start).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporting_window() {
        let now = Utc.with_ymd_and_hms(2025, 6, 14, 17, 45, 0).unwrap();
        let (day_start, day_end, month_start) = reporting_window(now).unwrap();

        assert_eq!(day_start, Utc.with_ymd_and_hms(2025, 6, 14, 0, 0, 0).unwrap());
        assert_eq!(day_end, Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap());
        assert_eq!(month_start, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_reporting_window_last_day_of_month() {
        let now = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap();
        let (_, day_end, month_start) = reporting_window(now).unwrap();

        assert_eq!(day_end, Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(month_start, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }
}
