//! Project configuration
//!
//! Environment variables and runtime settings.

pub mod environment;

pub use environment::*;
