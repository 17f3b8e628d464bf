//! Waste-type and service-type vocabularies.
//!
//! Pickups, recycling requests and the material catalog all draw from the
//! same waste-type list, so it lives in one place.

use crate::error::CoreError;

pub const WASTE_ORGANIC: &str = "organic";
pub const WASTE_PLASTIC: &str = "plastic";
pub const WASTE_PAPER: &str = "paper";
pub const WASTE_GLASS: &str = "glass";
pub const WASTE_METAL: &str = "metal";
pub const WASTE_ELECTRONIC: &str = "electronic";
pub const WASTE_HAZARDOUS: &str = "hazardous";
pub const WASTE_GENERAL: &str = "general";

/// All accepted waste types.
pub const VALID_WASTE_TYPES: &[&str] = &[
    WASTE_ORGANIC,
    WASTE_PLASTIC,
    WASTE_PAPER,
    WASTE_GLASS,
    WASTE_METAL,
    WASTE_ELECTRONIC,
    WASTE_HAZARDOUS,
    WASTE_GENERAL,
];

pub const SERVICE_STANDARD: &str = "standard";
pub const SERVICE_BULK: &str = "bulk";
pub const SERVICE_HAZARDOUS: &str = "hazardous";
pub const SERVICE_E_WASTE: &str = "e_waste";

/// All accepted pickup service types.
pub const VALID_SERVICE_TYPES: &[&str] = &[
    SERVICE_STANDARD,
    SERVICE_BULK,
    SERVICE_HAZARDOUS,
    SERVICE_E_WASTE,
];

/// Upper bound on the declared weight of a recycling request.
pub const MAX_ESTIMATED_WEIGHT_KG: f64 = 10_000.0;

/// Validate a single waste type.
pub fn validate_waste_type(value: &str) -> Result<(), CoreError> {
    if VALID_WASTE_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid waste type '{value}'. Must be one of: {}",
            VALID_WASTE_TYPES.join(", ")
        )))
    }
}

/// Validate a non-empty list of waste types without duplicates.
pub fn validate_waste_types(field: &str, values: &[String]) -> Result<(), CoreError> {
    if values.is_empty() {
        return Err(CoreError::Validation(format!(
            "{field} must contain at least one waste type"
        )));
    }
    for (i, v) in values.iter().enumerate() {
        validate_waste_type(v)?;
        if values[..i].contains(v) {
            return Err(CoreError::Validation(format!(
                "{field} contains duplicate entry '{v}'"
            )));
        }
    }
    Ok(())
}

/// Validate a pickup service type.
pub fn validate_service_type(value: &str) -> Result<(), CoreError> {
    if VALID_SERVICE_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid service type '{value}'. Must be one of: {}",
            VALID_SERVICE_TYPES.join(", ")
        )))
    }
}

/// Validate the declared weight of a recycling request.
pub fn validate_estimated_weight(kg: f64) -> Result<(), CoreError> {
    if kg.is_finite() && kg > 0.0 && kg <= MAX_ESTIMATED_WEIGHT_KG {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "estimated_weight_kg must be greater than 0 and at most {MAX_ESTIMATED_WEIGHT_KG}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn known_waste_types_pass() {
        for t in VALID_WASTE_TYPES {
            assert!(validate_waste_type(t).is_ok(), "{t} should be valid");
        }
    }

    #[test]
    fn unknown_waste_type_fails() {
        let err = validate_waste_type("styrofoam").unwrap_err();
        assert!(err.to_string().contains("Invalid waste type"));
    }

    #[test]
    fn waste_type_list_must_be_non_empty() {
        assert!(validate_waste_types("waste_types", &[]).is_err());
    }

    #[test]
    fn waste_type_list_rejects_duplicates() {
        let err = validate_waste_types("materials", &list(&["paper", "glass", "paper"]))
            .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn waste_type_list_accepts_distinct_values() {
        assert!(validate_waste_types("waste_types", &list(&["paper", "metal"])).is_ok());
    }

    #[test]
    fn service_types() {
        assert!(validate_service_type("bulk").is_ok());
        assert!(validate_service_type("e_waste").is_ok());
        assert!(validate_service_type("express").is_err());
    }

    #[test]
    fn estimated_weight_bounds() {
        assert!(validate_estimated_weight(12.5).is_ok());
        assert!(validate_estimated_weight(MAX_ESTIMATED_WEIGHT_KG).is_ok());
        assert!(validate_estimated_weight(0.0).is_err());
        assert!(validate_estimated_weight(-1.0).is_err());
        assert!(validate_estimated_weight(f64::NAN).is_err());
        assert!(validate_estimated_weight(MAX_ESTIMATED_WEIGHT_KG + 1.0).is_err());
    }
}
