//! Price resolution
//!
//! Selects the single applicable price record for a (route, instant) pair.
//! The repository pre-filters candidates by company and active flag; this
//! module owns the validity window and the specificity precedence so the
//! whole rule lives in one tested place.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::price::Price;

/// Specificity rank of a candidate: a route-scoped price beats a
/// company-wide default.
fn specificity(price: &Price, route_id: Uuid) -> u8 {
    if price.route_id == Some(route_id) {
        2
    } else {
        1
    }
}

/// Resolve the applicable price for `route_id` at instant `at`.
///
/// Keeps candidates that are active, valid at `at` (both window bounds
/// inclusive, `valid_to = None` is open-ended) and scoped to the route or
/// company-wide. Ties are broken deterministically: specificity first,
/// then most-recently-created.
///
/// Returns `None` when no candidate qualifies; the caller decides how to
/// surface that.
pub fn resolve(candidates: Vec<Price>, route_id: Uuid, at: DateTime<Utc>) -> Option<Price> {
    let mut matching: Vec<Price> = candidates
        .into_iter()
        .filter(|p| p.is_active)
        .filter(|p| p.valid_from <= at && p.valid_to.map_or(true, |end| end >= at))
        .filter(|p| p.route_id.map_or(true, |r| r == route_id))
        .collect();

    matching.sort_by(|a, b| {
        specificity(b, route_id)
            .cmp(&specificity(a, route_id))
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    matching.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::price::PriceType;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn price(
        company_id: Uuid,
        route_id: Option<Uuid>,
        valid_from: DateTime<Utc>,
        valid_to: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Price {
        Price {
            id: Uuid::new_v4(),
            company_id,
            route_id,
            price_type: PriceType::Flat,
            base_price: dec!(10),
            currency: "PLN".to_string(),
            valid_from,
            valid_to,
            is_active: true,
            created_at,
        }
    }

    #[test]
    fn test_route_specific_beats_company_default() {
        let company = Uuid::new_v4();
        let route = Uuid::new_v4();
        let now = Utc::now();
        let start = now - Duration::days(10);

        let company_wide = price(company, None, start, None, now - Duration::days(5));
        let route_specific = price(company, Some(route), start, None, now - Duration::days(9));

        let resolved = resolve(vec![company_wide, route_specific.clone()], route, now)
            .expect("a price should resolve");
        assert_eq!(resolved.id, route_specific.id);
    }

    #[test]
    fn test_most_recent_wins_among_equally_specific() {
        let company = Uuid::new_v4();
        let route = Uuid::new_v4();
        let now = Utc::now();
        let start = now - Duration::days(10);

        let older = price(company, Some(route), start, None, now - Duration::days(8));
        let newer = price(company, Some(route), start, None, now - Duration::days(2));

        let resolved = resolve(vec![older, newer.clone()], route, now).unwrap();
        assert_eq!(resolved.id, newer.id);
    }

    #[test]
    fn test_expired_candidate_falls_through_to_valid_one() {
        let company = Uuid::new_v4();
        let route = Uuid::new_v4();
        let now = Utc::now();

        let expired = price(
            company,
            Some(route),
            now - Duration::days(30),
            Some(now - Duration::days(1)),
            now - Duration::days(30),
        );
        let open_ended = price(company, None, now - Duration::days(30), None, now - Duration::days(30));

        let resolved = resolve(vec![expired, open_ended.clone()], route, now).unwrap();
        assert_eq!(resolved.id, open_ended.id);
    }

    #[test]
    fn test_not_yet_valid_candidate_is_excluded() {
        let company = Uuid::new_v4();
        let route = Uuid::new_v4();
        let now = Utc::now();

        let future = price(company, Some(route), now + Duration::days(1), None, now);
        assert!(resolve(vec![future], route, now).is_none());
    }

    #[test]
    fn test_validity_bounds_are_inclusive() {
        let company = Uuid::new_v4();
        let route = Uuid::new_v4();
        let now = Utc::now();

        let exact = price(company, Some(route), now, Some(now), now - Duration::days(1));
        assert!(resolve(vec![exact], route, now).is_some());
    }

    #[test]
    fn test_soft_deleted_price_never_resolves() {
        let company = Uuid::new_v4();
        let route = Uuid::new_v4();
        let now = Utc::now();

        let mut deleted = price(company, Some(route), now - Duration::days(10), None, now);
        deleted.is_active = false;

        assert!(resolve(vec![deleted], route, now).is_none());
    }

    #[test]
    fn test_other_route_price_is_excluded() {
        let company = Uuid::new_v4();
        let route = Uuid::new_v4();
        let other_route = Uuid::new_v4();
        let now = Utc::now();

        let other = price(company, Some(other_route), now - Duration::days(10), None, now);
        assert!(resolve(vec![other], route, now).is_none());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let company = Uuid::new_v4();
        let route = Uuid::new_v4();
        let now = Utc::now();
        let start = now - Duration::days(10);

        let a = price(company, Some(route), start, None, now - Duration::days(3));
        let b = price(company, Some(route), start, None, now - Duration::days(1));
        let c = price(company, None, start, None, now - Duration::days(2));

        let first = resolve(vec![a.clone(), b.clone(), c.clone()], route, now).unwrap();
        // Same catalog in a different order resolves to the same record.
        let second = resolve(vec![c, a, b], route, now).unwrap();
        assert_eq!(first.id, second.id);
    }
}
