//! Domain services
//!
//! Pure pricing logic: resolution of the applicable price record and the
//! fare computation itself. No I/O happens here; controllers fetch and
//! these functions decide.

pub mod fare_calculator;
pub mod price_resolver;
