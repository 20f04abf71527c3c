use crate::config::environment::EnvironmentConfig;
use crate::dto::ApiResponse;
use crate::models::price::{
    CreatePriceRequest, CreateSegmentRequest, Price, PriceFilters, PriceResponse, PriceSegment,
    PriceType, UpdatePriceRequest,
};
use crate::repositories::price_repository::PriceRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::validate_validity_window;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Price lifecycle: list, fetch, create, patch, soft-delete.
///
/// Overlapping validity windows for the same route are allowed at write
/// time; the resolver decides precedence at lookup time instead.
pub struct PriceController {
    repository: PriceRepository,
    config: EnvironmentConfig,
}

impl PriceController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            repository: PriceRepository::new(pool),
            config,
        }
    }

    pub async fn list(&self, filters: PriceFilters) -> Result<Vec<PriceResponse>, AppError> {
        let prices = self
            .repository
            .list_by_company(filters.company_id, filters.route_id)
            .await?;

        let mut response = Vec::with_capacity(prices.len());
        for price in prices {
            let segments = self.repository.find_segments(price.id).await?;
            response.push(PriceResponse::from_parts(price, segments));
        }

        Ok(response)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PriceResponse, AppError> {
        let price = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Price", &id.to_string()))?;

        let segments = self.repository.find_segments(price.id).await?;

        Ok(PriceResponse::from_parts(price, segments))
    }

    pub async fn create(
        &self,
        request: CreatePriceRequest,
    ) -> Result<ApiResponse<PriceResponse>, AppError> {
        request.validate()?;
        validate_validity_window(request.valid_from, request.valid_to)?;

        let price = Price {
            id: Uuid::new_v4(),
            company_id: request.company_id,
            route_id: request.route_id,
            price_type: request.price_type,
            base_price: request.base_price,
            currency: effective_currency(request.currency, &self.config),
            valid_from: request.valid_from,
            valid_to: request.valid_to,
            is_active: true,
            created_at: Utc::now(),
        };

        let segments =
            segment_rows_for(price.price_type, price.id, request.segments).unwrap_or_default();

        let created = self.repository.create(&price, &segments).await?;
        let segments = self.repository.find_segments(created.id).await?;

        Ok(ApiResponse::success_with_message(
            PriceResponse::from_parts(created, segments),
            "Price created successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdatePriceRequest,
    ) -> Result<ApiResponse<PriceResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Price", &id.to_string()))?;

        // The window that would result from the patch must still be ordered.
        let effective_from = request.valid_from.unwrap_or(current.valid_from);
        let effective_to = request.valid_to.or(current.valid_to);
        validate_validity_window(effective_from, effective_to)?;

        let effective_type = request.price_type.unwrap_or(current.price_type);
        let replacement = segment_rows_for(effective_type, id, request.segments);

        let updated = self
            .repository
            .update(
                id,
                request.route_id,
                request.price_type,
                request.base_price,
                request.currency,
                request.valid_from,
                request.valid_to,
                replacement,
            )
            .await?;

        let segments = self.repository.find_segments(updated.id).await?;

        Ok(ApiResponse::success_with_message(
            PriceResponse::from_parts(updated, segments),
            "Price updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<PriceResponse>, AppError> {
        let deleted = self
            .repository
            .soft_delete(id)
            .await?
            .ok_or_else(|| not_found_error("Price", &id.to_string()))?;

        let segments = self.repository.find_segments(deleted.id).await?;

        Ok(ApiResponse::success_with_message(
            PriceResponse::from_parts(deleted, segments),
            "Price deactivated successfully".to_string(),
        ))
    }
}

fn effective_currency(requested: Option<String>, config: &EnvironmentConfig) -> String {
    requested.unwrap_or_else(|| config.default_currency.clone())
}

/// Segment rows to store for a price of the given type, or `None` when the
/// stored set should stay untouched. A flat price ignores segment
/// overrides: a list supplied alongside one is dropped, and patching a
/// price to flat while supplying segments clears the stored set instead of
/// inserting rows calculation would never read.
fn segment_rows_for(
    price_type: PriceType,
    price_id: Uuid,
    requested: Option<Vec<CreateSegmentRequest>>,
) -> Option<Vec<PriceSegment>> {
    match price_type {
        PriceType::Flat => requested.map(|_| Vec::new()),
        PriceType::PerSegment => requested.map(|segments| {
            segments
                .into_iter()
                .map(|s| PriceSegment {
                    id: Uuid::new_v4(),
                    price_id,
                    from_stop_id: s.from_stop_id,
                    to_stop_id: s.to_stop_id,
                    price: s.price,
                })
                .collect()
        }),
    }
}
