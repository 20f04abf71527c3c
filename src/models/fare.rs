//! Fare calculation request/response types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::price::PriceType;

/// Query parameters of the public fare quoting endpoint
#[derive(Debug, Deserialize, Validate)]
pub struct FareQuery {
    pub route_id: Uuid,

    pub from_stop_id: Uuid,

    pub to_stop_id: Uuid,

    /// Defaults to 1; non-positive counts are rejected before resolution
    #[validate(range(min = 1, max = 500))]
    pub passengers: Option<i32>,

    /// Instant the fare is quoted for (RFC3339); defaults to now
    pub at: Option<DateTime<Utc>>,
}

/// One traversed adjacent stop pair and its contribution to the fare
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FareSegment {
    pub from_stop_id: Uuid,
    pub to_stop_id: Uuid,
    pub price: Decimal,
}

/// Fare quote returned to the caller.
///
/// `segments` is present only for per-segment pricing, listing each
/// traversed pair in travel order.
#[derive(Debug, Serialize)]
pub struct FareResponse {
    pub route_id: Uuid,
    pub from_stop_id: Uuid,
    pub to_stop_id: Uuid,
    pub passengers: i32,
    pub price_type: PriceType,
    pub currency: String,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<FareSegment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(passengers: Option<i32>) -> FareQuery {
        FareQuery {
            route_id: Uuid::new_v4(),
            from_stop_id: Uuid::new_v4(),
            to_stop_id: Uuid::new_v4(),
            passengers,
            at: None,
        }
    }

    #[test]
    fn test_non_positive_passenger_count_is_rejected() {
        assert!(query(Some(0)).validate().is_err());
        assert!(query(Some(-3)).validate().is_err());
    }

    #[test]
    fn test_valid_passenger_counts_pass() {
        assert!(query(None).validate().is_ok());
        assert!(query(Some(1)).validate().is_ok());
        assert!(query(Some(4)).validate().is_ok());
    }

    #[test]
    fn test_excessive_passenger_count_is_rejected() {
        assert!(query(Some(501)).validate().is_err());
    }
}
