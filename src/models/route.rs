//! Route stop-sequence read model
//!
//! This core only reads routes: the ordered stop list of the currently
//! active route version. Route CRUD and versioning live elsewhere.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One entry of a route version's ordered stop list
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RouteStop {
    pub stop_id: Uuid,
    pub sequence_number: i32,
}

/// A route together with the stops of its current version, ordered by
/// `sequence_number` ascending
#[derive(Debug, Clone, Serialize)]
pub struct RouteWithStops {
    pub route_id: Uuid,
    pub company_id: Uuid,
    pub stops: Vec<RouteStop>,
}
