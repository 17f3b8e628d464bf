//! Subscription plan vocabulary.

use crate::error::CoreError;

pub const PLAN_BASIC: &str = "basic";
pub const PLAN_STANDARD: &str = "standard";
pub const PLAN_PREMIUM: &str = "premium";

/// All valid subscription plans.
pub const VALID_PLANS: &[&str] = &[PLAN_BASIC, PLAN_STANDARD, PLAN_PREMIUM];

/// Validate a plan name.
pub fn validate_plan(plan: &str) -> Result<(), CoreError> {
    if VALID_PLANS.contains(&plan) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid plan '{plan}'. Must be one of: {}",
            VALID_PLANS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans() {
        assert!(validate_plan("basic").is_ok());
        assert!(validate_plan("premium").is_ok());
        assert!(validate_plan("gold").is_err());
        assert!(validate_plan("").is_err());
    }
}
