//! Currency and amount rules for card payments.

use crate::error::CoreError;

/// Default settlement currency.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Smallest chargeable amount in minor units (Stripe's USD minimum).
pub const MIN_CHARGE_CENTS: i64 = 50;

/// Largest chargeable amount in minor units.
pub const MAX_CHARGE_CENTS: i64 = 99_999_999;

/// Validate a three-letter ISO currency code and return its lowercase form.
pub fn normalize_currency(currency: &str) -> Result<String, CoreError> {
    let code = currency.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_lowercase())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid currency '{currency}'. Expected a 3-letter ISO code"
        )))
    }
}

/// Validate the amount of a card charge.
pub fn validate_charge_amount(amount_cents: i64) -> Result<(), CoreError> {
    if (MIN_CHARGE_CENTS..=MAX_CHARGE_CENTS).contains(&amount_cents) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "amount_cents must be between {MIN_CHARGE_CENTS} and {MAX_CHARGE_CENTS}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_is_lowercased() {
        assert_eq!(normalize_currency("USD").unwrap(), "usd");
        assert_eq!(normalize_currency(" lkr ").unwrap(), "lkr");
    }

    #[test]
    fn currency_must_be_three_letters() {
        assert!(normalize_currency("US").is_err());
        assert!(normalize_currency("US1").is_err());
        assert!(normalize_currency("dollars").is_err());
    }

    #[test]
    fn charge_amount_bounds() {
        assert!(validate_charge_amount(MIN_CHARGE_CENTS).is_ok());
        assert!(validate_charge_amount(MAX_CHARGE_CENTS).is_ok());
        assert!(validate_charge_amount(49).is_err());
        assert!(validate_charge_amount(0).is_err());
        assert!(validate_charge_amount(MAX_CHARGE_CENTS + 1).is_err());
    }
}
