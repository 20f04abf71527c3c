//! Price model
//!
//! Contains the Price and PriceSegment structs and their request/response
//! variants for CRUD operations. Maps exactly to the PostgreSQL schema
//! (`prices` and `price_segments` tables, primary key 'id').

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Pricing policy kind. Stored as the PostgreSQL enum `price_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "price_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceType {
    /// Single fare for the whole journey, independent of the stops chosen
    Flat,
    /// Fare accumulated per adjacent stop pair between boarding and alighting
    PerSegment,
}

/// Price row - maps exactly to the `prices` table.
///
/// `route_id = NULL` makes the record a company-wide default; a concrete
/// `route_id` scopes it to that route. Soft-deleted rows keep their data
/// with `is_active = false` and never participate in resolution.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Price {
    pub id: Uuid,
    pub company_id: Uuid,
    pub route_id: Option<Uuid>,
    pub price_type: PriceType,
    pub base_price: Decimal,
    pub currency: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Per-adjacent-pair override row - maps exactly to the `price_segments` table.
///
/// Adjacency of (from_stop_id, to_stop_id) is not enforced at write time;
/// a pair that is not adjacent on any route simply never matches during
/// fare calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PriceSegment {
    pub id: Uuid,
    pub price_id: Uuid,
    pub from_stop_id: Uuid,
    pub to_stop_id: Uuid,
    pub price: Decimal,
}

/// Request to create a new price
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePriceRequest {
    pub company_id: Uuid,

    pub route_id: Option<Uuid>,

    pub price_type: PriceType,

    #[validate(custom = "crate::utils::validation::validate_non_negative_amount")]
    pub base_price: Decimal,

    /// Defaults to the configured home currency when omitted
    #[validate(custom = "crate::utils::validation::validate_currency_code")]
    pub currency: Option<String>,

    pub valid_from: DateTime<Utc>,

    pub valid_to: Option<DateTime<Utc>>,

    #[validate]
    pub segments: Option<Vec<CreateSegmentRequest>>,
}

/// Segment override supplied alongside a PER_SEGMENT price
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSegmentRequest {
    pub from_stop_id: Uuid,

    pub to_stop_id: Uuid,

    #[validate(custom = "crate::utils::validation::validate_non_negative_amount")]
    pub price: Decimal,
}

/// Request to update an existing price (scalar fields; a supplied
/// `segments` list replaces the whole set)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePriceRequest {
    pub route_id: Option<Uuid>,

    pub price_type: Option<PriceType>,

    #[validate(custom = "crate::utils::validation::validate_non_negative_amount")]
    pub base_price: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_currency_code")]
    pub currency: Option<String>,

    pub valid_from: Option<DateTime<Utc>>,

    pub valid_to: Option<DateTime<Utc>>,

    #[validate]
    pub segments: Option<Vec<CreateSegmentRequest>>,
}

/// Filters for price listing. `company_id` is required; everything else
/// is an explicit, enumerated optional.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceFilters {
    pub company_id: Uuid,
    pub route_id: Option<Uuid>,
}

/// Price response for the API, segments attached
#[derive(Debug, Clone, Serialize)]
pub struct PriceResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub route_id: Option<Uuid>,
    pub price_type: PriceType,
    pub base_price: Decimal,
    pub currency: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub segments: Vec<PriceSegmentResponse>,
}

/// Segment override in API responses
#[derive(Debug, Clone, Serialize)]
pub struct PriceSegmentResponse {
    pub from_stop_id: Uuid,
    pub to_stop_id: Uuid,
    pub price: Decimal,
}

impl PriceResponse {
    pub fn from_parts(price: Price, segments: Vec<PriceSegment>) -> Self {
        Self {
            id: price.id,
            company_id: price.company_id,
            route_id: price.route_id,
            price_type: price.price_type,
            base_price: price.base_price,
            currency: price.currency,
            valid_from: price.valid_from,
            valid_to: price.valid_to,
            is_active: price.is_active,
            created_at: price.created_at,
            segments: segments
                .into_iter()
                .map(|s| PriceSegmentResponse {
                    from_stop_id: s.from_stop_id,
                    to_stop_id: s.to_stop_id,
                    price: s.price,
                })
                .collect(),
        }
    }
}
