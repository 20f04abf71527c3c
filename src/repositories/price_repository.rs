use crate::models::price::{Price, PriceSegment, PriceType};
use crate::utils::errors::AppError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PriceRepository {
    pool: PgPool,
}

impl PriceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a price and its segment overrides atomically.
    pub async fn create(
        &self,
        price: &Price,
        segments: &[PriceSegment],
    ) -> Result<Price, AppError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Price>(
            r#"
            INSERT INTO prices (
                id, company_id, route_id, price_type, base_price,
                currency, valid_from, valid_to, is_active, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(price.id)
        .bind(price.company_id)
        .bind(price.route_id)
        .bind(price.price_type)
        .bind(price.base_price)
        .bind(&price.currency)
        .bind(price.valid_from)
        .bind(price.valid_to)
        .bind(price.is_active)
        .bind(price.created_at)
        .fetch_one(&mut *tx)
        .await?;

        for segment in segments {
            sqlx::query(
                r#"
                INSERT INTO price_segments (id, price_id, from_stop_id, to_stop_id, price)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(segment.id)
            .bind(segment.price_id)
            .bind(segment.from_stop_id)
            .bind(segment.to_stop_id)
            .bind(segment.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Price>, AppError> {
        let result = sqlx::query_as::<_, Price>("SELECT * FROM prices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_segments(&self, price_id: Uuid) -> Result<Vec<PriceSegment>, AppError> {
        let result = sqlx::query_as::<_, PriceSegment>(
            "SELECT * FROM price_segments WHERE price_id = $1",
        )
        .bind(price_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    /// Active prices of a company, optionally restricted to one route,
    /// newest first.
    pub async fn list_by_company(
        &self,
        company_id: Uuid,
        route_id: Option<Uuid>,
    ) -> Result<Vec<Price>, AppError> {
        let result = sqlx::query_as::<_, Price>(
            r#"
            SELECT * FROM prices
            WHERE company_id = $1
              AND is_active = TRUE
              AND ($2::uuid IS NULL OR route_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    /// Candidate set for resolution: active prices of the company that are
    /// valid at `at` and either scoped to the route or company-wide. The
    /// precedence between them is decided in `services::price_resolver`.
    pub async fn find_active_candidates(
        &self,
        company_id: Uuid,
        route_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Vec<Price>, AppError> {
        let result = sqlx::query_as::<_, Price>(
            r#"
            SELECT * FROM prices
            WHERE company_id = $1
              AND is_active = TRUE
              AND (route_id = $2 OR route_id IS NULL)
              AND valid_from <= $3
              AND (valid_to IS NULL OR valid_to >= $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .bind(route_id)
        .bind(at)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    /// Patch scalar fields; a supplied segment list replaces the whole set
    /// inside the same transaction.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        route_id: Option<Uuid>,
        price_type: Option<PriceType>,
        base_price: Option<Decimal>,
        currency: Option<String>,
        valid_from: Option<DateTime<Utc>>,
        valid_to: Option<DateTime<Utc>>,
        segments: Option<Vec<PriceSegment>>,
    ) -> Result<Price, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Price>(
            r#"
            UPDATE prices SET
                route_id = COALESCE($2, route_id),
                price_type = COALESCE($3, price_type),
                base_price = COALESCE($4, base_price),
                currency = COALESCE($5, currency),
                valid_from = COALESCE($6, valid_from),
                valid_to = COALESCE($7, valid_to)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(route_id)
        .bind(price_type)
        .bind(base_price)
        .bind(currency)
        .bind(valid_from)
        .bind(valid_to)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Price not found".to_string()))?;

        if let Some(replacement) = segments {
            sqlx::query("DELETE FROM price_segments WHERE price_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for segment in &replacement {
                sqlx::query(
                    r#"
                    INSERT INTO price_segments (id, price_id, from_stop_id, to_stop_id, price)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(segment.id)
                .bind(segment.price_id)
                .bind(segment.from_stop_id)
                .bind(segment.to_stop_id)
                .bind(segment.price)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(updated)
    }

    /// Soft delete: the row is kept for history and excluded from
    /// resolution and listing.
    pub async fn soft_delete(&self, id: Uuid) -> Result<Option<Price>, AppError> {
        let result = sqlx::query_as::<_, Price>(
            "UPDATE prices SET is_active = FALSE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }
}
