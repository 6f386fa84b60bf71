use async_trait::async_trait;
use sqlx::PgPool;

use super::MotorcycleStore;
use crate::models::motorcycle::{CreateMotorcycleRequest, Motorcycle, UpdateMotorcycleRequest};
use crate::utils::errors::AppResult;

pub struct MotorcycleRepository {
    pool: PgPool,
}

impl MotorcycleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MotorcycleStore for MotorcycleRepository {
    async fn list_motorcycles(&self) -> AppResult<Vec<Motorcycle>> {
        let motorcycles = sqlx::query_as::<_, Motorcycle>("SELECT * FROM motorcycles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(motorcycles)
    }

    async fn find_motorcycle(&self, id: i64) -> AppResult<Option<Motorcycle>> {
        let motorcycle = sqlx::query_as::<_, Motorcycle>("SELECT * FROM motorcycles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(motorcycle)
    }

    async fn create_motorcycle(&self, request: CreateMotorcycleRequest) -> AppResult<Motorcycle> {
        let motorcycle = sqlx::query_as::<_, Motorcycle>(
            r#"
            INSERT INTO motorcycles (name, brand, type, price_per_day, image_url, status, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(request.name)
        .bind(request.brand)
        .bind(request.category)
        .bind(request.price_per_day)
        .bind(request.image_url)
        .bind(request.status)
        .bind(request.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(motorcycle)
    }

    async fn update_motorcycle(&self, id: i64, request: UpdateMotorcycleRequest) -> AppResult<Option<Motorcycle>> {
        let mut tx = self.pool.begin().await?;

        // Obtener moto actual bloqueada hasta el commit
        let current = sqlx::query_as::<_, Motorcycle>("SELECT * FROM motorcycles WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut motorcycle) = current else {
            return Ok(None);
        };
        request.apply_to(&mut motorcycle);

        let motorcycle = sqlx::query_as::<_, Motorcycle>(
            r#"
            UPDATE motorcycles
            SET name = $2, brand = $3, type = $4, price_per_day = $5, image_url = $6,
                status = $7, description = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(motorcycle.name)
        .bind(motorcycle.brand)
        .bind(motorcycle.category)
        .bind(motorcycle.price_per_day)
        .bind(motorcycle.image_url)
        .bind(motorcycle.status)
        .bind(motorcycle.description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(motorcycle))
    }

    async fn delete_motorcycle(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM motorcycles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
