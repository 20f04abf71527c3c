//! Fare calculation
//!
//! Pure computation over an already-fetched stop sequence and an already
//! resolved price: no I/O, no stored state. Each call is independent and
//! idempotent for a fixed catalog state.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::fare::FareSegment;
use crate::models::price::{Price, PriceSegment, PriceType};
use crate::models::route::RouteStop;
use crate::utils::errors::{AppError, AppResult};

/// Outcome of a fare computation, before it is wrapped into the API
/// response.
#[derive(Debug)]
pub struct FareBreakdown {
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub segments: Vec<FareSegment>,
}

/// Compute the fare for one passenger group on a route.
///
/// `stops` must be the route's current stop sequence in travel order.
/// Boarding must strictly precede alighting; same-stop and
/// reversed-direction requests are invalid stop combinations, as are
/// stops that do not appear in the sequence at all.
///
/// Amounts accumulate exactly; only `total_price` is rounded, to two
/// decimal places after multiplication by `passengers`.
pub fn calculate(
    stops: &[RouteStop],
    price: &Price,
    overrides: &[PriceSegment],
    from_stop_id: Uuid,
    to_stop_id: Uuid,
    passengers: i32,
) -> AppResult<FareBreakdown> {
    let from_index = stops.iter().position(|s| s.stop_id == from_stop_id);
    let to_index = stops.iter().position(|s| s.stop_id == to_stop_id);

    let (from_index, to_index) = match (from_index, to_index) {
        (Some(f), Some(t)) if f < t => (f, t),
        _ => {
            return Err(AppError::NotFound(
                "invalid stop combination for this route".to_string(),
            ))
        }
    };

    let (unit_price, segments) = match price.price_type {
        PriceType::Flat => (price.base_price, Vec::new()),
        PriceType::PerSegment => {
            let mut total = Decimal::ZERO;
            let mut breakdown = Vec::with_capacity(to_index - from_index);

            for pair in stops[from_index..=to_index].windows(2) {
                let amount = overrides
                    .iter()
                    .find(|o| {
                        o.from_stop_id == pair[0].stop_id && o.to_stop_id == pair[1].stop_id
                    })
                    .map(|o| o.price)
                    .unwrap_or(price.base_price);

                total += amount;
                breakdown.push(FareSegment {
                    from_stop_id: pair[0].stop_id,
                    to_stop_id: pair[1].stop_id,
                    price: amount,
                });
            }

            (total, breakdown)
        }
    };

    let total_price = (unit_price * Decimal::from(passengers)).round_dp(2);

    Ok(FareBreakdown {
        unit_price,
        total_price,
        segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn stop_sequence(stop_ids: &[Uuid]) -> Vec<RouteStop> {
        stop_ids
            .iter()
            .enumerate()
            .map(|(i, &stop_id)| RouteStop {
                stop_id,
                sequence_number: (i + 1) as i32,
            })
            .collect()
    }

    fn flat_price(base_price: Decimal) -> Price {
        Price {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            route_id: None,
            price_type: PriceType::Flat,
            base_price,
            currency: "PLN".to_string(),
            valid_from: Utc::now(),
            valid_to: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn per_segment_price(base_price: Decimal) -> Price {
        Price {
            price_type: PriceType::PerSegment,
            ..flat_price(base_price)
        }
    }

    fn override_for(price_id: Uuid, from: Uuid, to: Uuid, amount: Decimal) -> PriceSegment {
        PriceSegment {
            id: Uuid::new_v4(),
            price_id,
            from_stop_id: from,
            to_stop_id: to,
            price: amount,
        }
    }

    #[test]
    fn test_flat_fare_ignores_stop_choice() {
        let stops: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let sequence = stop_sequence(&stops);
        let price = flat_price(dec!(20));

        let fare = calculate(&sequence, &price, &[], stops[0], stops[3], 2).unwrap();
        assert_eq!(fare.unit_price, dec!(20));
        assert_eq!(fare.total_price, dec!(40));
        assert!(fare.segments.is_empty());

        // A shorter journey on the same price costs the same per passenger.
        let short = calculate(&sequence, &price, &[], stops[1], stops[2], 1).unwrap();
        assert_eq!(short.unit_price, dec!(20));
    }

    #[test]
    fn test_per_segment_fare_sums_overrides_and_fallback() {
        let stops: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let sequence = stop_sequence(&stops);
        let price = per_segment_price(dec!(5));
        let overrides = vec![override_for(price.id, stops[0], stops[1], dec!(8))];

        // A -> C traverses A->B (override 8) and B->C (fallback 5).
        let fare = calculate(&sequence, &price, &overrides, stops[0], stops[2], 1).unwrap();
        assert_eq!(fare.unit_price, dec!(13));
        assert_eq!(fare.total_price, dec!(13));
        assert_eq!(
            fare.segments,
            vec![
                FareSegment {
                    from_stop_id: stops[0],
                    to_stop_id: stops[1],
                    price: dec!(8),
                },
                FareSegment {
                    from_stop_id: stops[1],
                    to_stop_id: stops[2],
                    price: dec!(5),
                },
            ]
        );
    }

    #[test]
    fn test_per_segment_total_scales_with_passengers() {
        let stops: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let sequence = stop_sequence(&stops);
        let price = per_segment_price(dec!(2.50));

        let fare = calculate(&sequence, &price, &[], stops[0], stops[2], 3).unwrap();
        assert_eq!(fare.unit_price, dec!(5.00));
        assert_eq!(fare.total_price, dec!(15.00));
    }

    #[test]
    fn test_total_is_rounded_once_after_multiplication() {
        let stops: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let sequence = stop_sequence(&stops);
        let price = per_segment_price(dec!(1.005));

        let fare = calculate(&sequence, &price, &[], stops[0], stops[2], 3).unwrap();
        // Exact accumulation: 2 segments * 1.005 = 2.010 per passenger.
        assert_eq!(fare.unit_price, dec!(2.010));
        // 2.010 * 3 = 6.030, rounded to minor units.
        assert_eq!(fare.total_price, dec!(6.03));
    }

    #[test]
    fn test_reversed_direction_is_rejected() {
        let stops: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let sequence = stop_sequence(&stops);
        let price = flat_price(dec!(20));

        let result = calculate(&sequence, &price, &[], stops[3], stops[0], 1);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_same_stop_is_rejected() {
        let stops: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let sequence = stop_sequence(&stops);
        let price = flat_price(dec!(20));

        let result = calculate(&sequence, &price, &[], stops[1], stops[1], 1);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_unknown_stop_is_rejected() {
        let stops: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let sequence = stop_sequence(&stops);
        let price = flat_price(dec!(20));

        let off_route = Uuid::new_v4();
        assert!(calculate(&sequence, &price, &[], stops[0], off_route, 1).is_err());
        assert!(calculate(&sequence, &price, &[], off_route, stops[2], 1).is_err());
    }

    #[test]
    fn test_non_adjacent_override_is_never_matched() {
        let stops: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let sequence = stop_sequence(&stops);
        let price = per_segment_price(dec!(5));
        // Override spans A -> C, which is not an adjacent pair.
        let overrides = vec![override_for(price.id, stops[0], stops[2], dec!(1))];

        let fare = calculate(&sequence, &price, &overrides, stops[0], stops[2], 1).unwrap();
        // Both traversed pairs fall back to the base price.
        assert_eq!(fare.unit_price, dec!(10));
    }
}
