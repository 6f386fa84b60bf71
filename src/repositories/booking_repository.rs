use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use super::{AdmissionScope, BookingStore};
use crate::dto::booking_dto::BookingWithMotorcycle;
use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::models::dashboard::DashboardSummary;
use crate::models::motorcycle::Motorcycle;
use crate::utils::errors::{AppError, AppResult};

const ACTIVE_STATUSES: &str = "('Pending', 'Approved')";
const REVENUE_STATUSES: &str = "('Approved', 'Completed')";

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Adjuntar la moto de cada reserva (equivalente a un eager load)
    async fn attach_motorcycles(&self, bookings: Vec<Booking>) -> AppResult<Vec<BookingWithMotorcycle>> {
        let mut ids: Vec<i64> = bookings.iter().map(|b| b.motorcycle_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let motorcycles: HashMap<i64, Motorcycle> =
            sqlx::query_as::<_, Motorcycle>("SELECT * FROM motorcycles WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(|m| (m.id, m))
                .collect();

        bookings
            .into_iter()
            .map(|booking| {
                let motorcycle = motorcycles.get(&booking.motorcycle_id).cloned().ok_or_else(|| {
                    AppError::Internal(format!(
                        "booking {} references missing motorcycle {}",
                        booking.id, booking.motorcycle_id
                    ))
                })?;
                Ok(BookingWithMotorcycle { booking, motorcycle })
            })
            .collect()
    }

    async fn revenue_between(&self, from: DateTime<Utc>, to: Option<DateTime<Utc>>) -> AppResult<Decimal> {
        let revenue = sqlx::query_scalar::<_, Decimal>(&format!(
            r#"
            SELECT COALESCE(SUM(total_price), 0)
            FROM bookings
            WHERE status IN {REVENUE_STATUSES}
              AND created_at >= $1
              AND ($2::timestamptz IS NULL OR created_at < $2)
            "#
        ))
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(revenue)
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn begin_admission(&self, motorcycle_id: i64) -> AppResult<Box<dyn AdmissionScope>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        Ok(Box::new(PgAdmission { tx, motorcycle_id }))
    }

    async fn find_booking(&self, id: i64) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    async fn find_with_motorcycle(&self, id: i64) -> AppResult<Option<BookingWithMotorcycle>> {
        match self.find_booking(id).await? {
            Some(booking) => Ok(self.attach_motorcycles(vec![booking]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_with_motorcycle(
        &self,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<BookingWithMotorcycle>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE ($1::booking_status IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        self.attach_motorcycles(bookings).await
    }

    async fn active_for_motorcycle(&self, motorcycle_id: i64) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT * FROM bookings WHERE motorcycle_id = $1 AND status IN {ACTIVE_STATUSES} ORDER BY start_date"
        ))
        .bind(motorcycle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn update_status(
        &self,
        id: i64,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(expected)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn delete_booking(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn expire_pending_created_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'Expired', updated_at = NOW() WHERE status = 'Pending' AND created_at < $1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn dashboard_summary(
        &self,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
        month_start: DateTime<Utc>,
    ) -> AppResult<DashboardSummary> {
        let daily_revenue = self.revenue_between(day_start, Some(day_end)).await?;
        let monthly_revenue = self.revenue_between(month_start, None).await?;

        let active_bookings = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM bookings WHERE status IN {ACTIVE_STATUSES}"
        ))
        .fetch_one(&self.pool)
        .await?;

        // Empate: gana el id más bajo
        let most_rented_motorcycle = sqlx::query_as::<_, Motorcycle>(
            r#"
            SELECT m.* FROM motorcycles m
            JOIN (
                SELECT motorcycle_id, COUNT(*) AS rentals
                FROM bookings
                GROUP BY motorcycle_id
            ) counts ON counts.motorcycle_id = m.id
            ORDER BY counts.rentals DESC, m.id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(DashboardSummary {
            daily_revenue,
            monthly_revenue,
            active_bookings,
            most_rented_motorcycle,
        })
    }
}

/// Admisión dentro de una transacción SERIALIZABLE con la fila de la moto
/// bloqueada. Si se suelta sin `commit`, sqlx hace rollback.
struct PgAdmission {
    tx: Transaction<'static, Postgres>,
    motorcycle_id: i64,
}

#[async_trait]
impl AdmissionScope for PgAdmission {
    async fn motorcycle(&mut self) -> AppResult<Option<Motorcycle>> {
        let motorcycle = sqlx::query_as::<_, Motorcycle>("SELECT * FROM motorcycles WHERE id = $1 FOR UPDATE")
            .bind(self.motorcycle_id)
            .fetch_optional(&mut *self.tx)
            .await?;

        Ok(motorcycle)
    }

    async fn expire_pending_created_before(&mut self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET status = 'Expired', updated_at = NOW()
            WHERE motorcycle_id = $1 AND status = 'Pending' AND created_at < $2
            "#,
        )
        .bind(self.motorcycle_id)
        .bind(cutoff)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected())
    }

    async fn active_bookings(&mut self) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT * FROM bookings WHERE motorcycle_id = $1 AND status IN {ACTIVE_STATUSES} ORDER BY start_date"
        ))
        .bind(self.motorcycle_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(bookings)
    }

    async fn insert(&mut self, booking: NewBooking) -> AppResult<Booking> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (motorcycle_id, customer_name, customer_phone, customer_address,
                 start_date, end_date, total_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'Pending')
            RETURNING *
            "#,
        )
        .bind(booking.motorcycle_id)
        .bind(booking.customer_name)
        .bind(booking.customer_phone)
        .bind(booking.customer_address)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.total_price)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(booking)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let PgAdmission { tx, .. } = *self;
        tx.commit().await?;
        Ok(())
    }
}
