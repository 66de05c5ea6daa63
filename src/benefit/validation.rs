//! Field rules for benefit records
//!
//! The server enforces the same rules; running them client-side lets a
//! create/update call fail fast without a round trip.

use rust_decimal::Decimal;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// Benefit field validation errors
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum BenefitError {
    #[error("Benefit name is required")]
    NameMissing,

    #[error("Invalid length for {field}: expected {min}-{max}, got {actual}")]
    InvalidLength {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Benefit value must be zero or positive, got {0}")]
    NegativeValue(Decimal),
}

impl BenefitError {
    pub fn code(&self) -> &'static str {
        match self {
            BenefitError::NameMissing => "NAME_MISSING",
            BenefitError::InvalidLength { .. } => "INVALID_LENGTH",
            BenefitError::NegativeValue(_) => "NEGATIVE_VALUE",
        }
    }
}

/// Name must be non-blank and 3-100 characters (counted as chars, not bytes)
pub fn validate_name(name: &str) -> Result<(), BenefitError> {
    if name.trim().is_empty() {
        return Err(BenefitError::NameMissing);
    }

    let len = name.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(BenefitError::InvalidLength {
            field: "name",
            min: NAME_MIN_LEN,
            max: NAME_MAX_LEN,
            actual: len,
        });
    }
    Ok(())
}

pub fn validate_description(description: Option<&str>) -> Result<(), BenefitError> {
    let Some(description) = description else {
        return Ok(());
    };

    let len = description.chars().count();
    if len > DESCRIPTION_MAX_LEN {
        return Err(BenefitError::InvalidLength {
            field: "description",
            min: 0,
            max: DESCRIPTION_MAX_LEN,
            actual: len,
        });
    }
    Ok(())
}

pub fn validate_value(value: Decimal) -> Result<(), BenefitError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(BenefitError::NegativeValue(value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rules() {
        assert!(validate_name("Vale Refeição").is_ok());
        assert!(validate_name("abc").is_ok());
        assert_eq!(validate_name("   "), Err(BenefitError::NameMissing));
        assert_eq!(
            validate_name("ab"),
            Err(BenefitError::InvalidLength {
                field: "name",
                min: 3,
                max: 100,
                actual: 2
            })
        );
        assert!(validate_name(&"x".repeat(101)).is_err());
        assert!(validate_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_name_counts_chars_not_bytes() {
        // 3 chars, 6 bytes
        assert!(validate_name("ção").is_ok());
    }

    #[test]
    fn test_description_rules() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some("")).is_ok());
        assert!(validate_description(Some(&"d".repeat(500))).is_ok());
        assert!(validate_description(Some(&"d".repeat(501))).is_err());
    }

    #[test]
    fn test_value_rules() {
        assert!(validate_value(Decimal::ZERO).is_ok());
        assert!(validate_value(Decimal::new(10050, 2)).is_ok());
        assert_eq!(
            validate_value(Decimal::new(-1, 2)),
            Err(BenefitError::NegativeValue(Decimal::new(-1, 2)))
        );
        assert_eq!(validate_value(Decimal::new(-1, 2)).unwrap_err().code(), "NEGATIVE_VALUE");
    }
}
