pub mod fare_controller;
pub mod price_controller;
