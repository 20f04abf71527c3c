use crate::models::fare::{FareQuery, FareResponse};
use crate::models::price::PriceType;
use crate::repositories::price_repository::PriceRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::services::{fare_calculator, price_resolver};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

/// Fare quoting: fetches the route's stop sequence and the price
/// candidates, resolves the applicable price, and computes the fare.
/// Stateless; every call re-reads the catalog, so price edits take
/// effect immediately.
pub struct FareController {
    routes: RouteRepository,
    prices: PriceRepository,
}

impl FareController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            routes: RouteRepository::new(pool.clone()),
            prices: PriceRepository::new(pool),
        }
    }

    pub async fn calculate(&self, query: FareQuery) -> Result<FareResponse, AppError> {
        query.validate()?;

        let at = query.at.unwrap_or_else(Utc::now);
        let passengers = query.passengers.unwrap_or(1);

        let route = self
            .routes
            .get_route_with_current_stops(query.route_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Route not found or has no current version".to_string())
            })?;

        let candidates = self
            .prices
            .find_active_candidates(route.company_id, query.route_id, at)
            .await?;

        let price = price_resolver::resolve(candidates, query.route_id, at).ok_or_else(|| {
            AppError::NotFound("No active price found for this route".to_string())
        })?;

        let overrides = match price.price_type {
            PriceType::Flat => Vec::new(),
            PriceType::PerSegment => self.prices.find_segments(price.id).await?,
        };

        let fare = fare_calculator::calculate(
            &route.stops,
            &price,
            &overrides,
            query.from_stop_id,
            query.to_stop_id,
            passengers,
        )?;

        Ok(FareResponse {
            route_id: query.route_id,
            from_stop_id: query.from_stop_id,
            to_stop_id: query.to_stop_id,
            passengers,
            price_type: price.price_type,
            currency: price.currency,
            unit_price: fare.unit_price,
            total_price: fare.total_price,
            segments: fare.segments,
        })
    }
}
