pub mod price_repository;
pub mod route_repository;
