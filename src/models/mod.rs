//! System models
//!
//! Data models mapping exactly to the PostgreSQL schema, plus the
//! request/response structs of the API.

pub mod fare;
pub mod price;
pub mod route;
