pub mod fare_routes;
pub mod price_routes;
