//! System utilities
//!
//! Error handling and validation helpers shared across layers.

pub mod errors;
pub mod validation;
