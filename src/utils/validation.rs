//! Validation helpers
//!
//! Field-level validators wired into the `validator` derives on request
//! structs, plus cross-field checks the derives cannot express.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use validator::ValidationError;

use crate::utils::errors::{AppError, AppResult};

/// Validate that a money amount is not negative
pub fn validate_non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        let mut error = ValidationError::new("non_negative_amount");
        error.add_param("actual".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validate an ISO-4217-style currency code (three uppercase letters)
pub fn validate_currency_code(value: &str) -> Result<(), ValidationError> {
    if value.len() != 3 || !value.chars().all(|c| c.is_ascii_uppercase()) {
        let mut error = ValidationError::new("currency_code");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validate that a validity window is ordered.
///
/// A price with `valid_from` after `valid_to` could never be selected by
/// resolution, so such writes are rejected instead of silently stored.
pub fn validate_validity_window(
    valid_from: DateTime<Utc>,
    valid_to: Option<DateTime<Utc>>,
) -> AppResult<()> {
    if let Some(end) = valid_to {
        if valid_from > end {
            return Err(AppError::BadRequest(
                "valid_from must not be after valid_to".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    #[test]
    fn test_non_negative_amount() {
        assert!(validate_non_negative_amount(&dec!(0)).is_ok());
        assert!(validate_non_negative_amount(&dec!(12.50)).is_ok());
        assert!(validate_non_negative_amount(&dec!(-0.01)).is_err());
    }

    #[test]
    fn test_currency_code() {
        assert!(validate_currency_code("PLN").is_ok());
        assert!(validate_currency_code("EUR").is_ok());
        assert!(validate_currency_code("pln").is_err());
        assert!(validate_currency_code("ZLOTY").is_err());
        assert!(validate_currency_code("").is_err());
    }

    #[test]
    fn test_validity_window_order() {
        let now = Utc::now();

        assert!(validate_validity_window(now, None).is_ok());
        assert!(validate_validity_window(now, Some(now)).is_ok());
        assert!(validate_validity_window(now, Some(now + Duration::days(30))).is_ok());

        let rejected = validate_validity_window(now, Some(now - Duration::seconds(1)));
        assert!(matches!(rejected, Err(AppError::BadRequest(_))));
    }
}
