//! Validation traits
//!
//! Common validation patterns shared by the draft and patch types.

use crate::error::ValidationError;

/// Trait for validating non-empty strings.
///
/// # Example
/// ```ignore
/// use prospect_core::validate::ValidateNonEmpty;
///
/// fn create_business(name: &str) -> Result<(), ValidationError> {
///     name.validate_non_empty("name")?;
///     // ... rest of logic
/// }
/// ```
pub trait ValidateNonEmpty {
    /// Validate that the value is present and not whitespace-only.
    ///
    /// # Errors
    /// Returns `ValidationError::RequiredFieldMissing` if the value is
    /// absent, empty, or whitespace-only.
    fn validate_non_empty(&self, field_name: &str) -> Result<(), ValidationError>;
}

impl ValidateNonEmpty for str {
    fn validate_non_empty(&self, field_name: &str) -> Result<(), ValidationError> {
        if self.trim().is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: field_name.to_string(),
            });
        }
        Ok(())
    }
}

impl ValidateNonEmpty for &str {
    fn validate_non_empty(&self, field_name: &str) -> Result<(), ValidationError> {
        (*self).validate_non_empty(field_name)
    }
}

impl ValidateNonEmpty for String {
    fn validate_non_empty(&self, field_name: &str) -> Result<(), ValidationError> {
        self.as_str().validate_non_empty(field_name)
    }
}

impl<T: ValidateNonEmpty> ValidateNonEmpty for Option<T> {
    fn validate_non_empty(&self, field_name: &str) -> Result<(), ValidationError> {
        match self {
            Some(value) => value.validate_non_empty(field_name),
            None => Err(ValidationError::RequiredFieldMissing {
                field: field_name.to_string(),
            }),
        }
    }
}

/// Trait for validating monetary amounts on opportunities.
pub trait ValidateAmount {
    /// Validate that the value is a finite, non-negative number.
    fn validate_amount(&self, field_name: &str) -> Result<(), ValidationError>;
}

impl ValidateAmount for f64 {
    fn validate_amount(&self, field_name: &str) -> Result<(), ValidationError> {
        if !self.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: field_name.to_string(),
                reason: "must be a finite number".to_string(),
            });
        }
        if *self < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: field_name.to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty_str() {
        assert!("hello".validate_non_empty("test").is_ok());
        assert!("".validate_non_empty("test").is_err());
        assert!("   ".validate_non_empty("test").is_err());
        assert!("  hi  ".validate_non_empty("test").is_ok());
    }

    #[test]
    fn test_validate_non_empty_option() {
        let some_str: Option<&str> = Some("hello");
        let some_empty: Option<&str> = Some("");
        let none_str: Option<&str> = None;

        assert!(some_str.validate_non_empty("test").is_ok());
        assert!(some_empty.validate_non_empty("test").is_err());
        assert!(none_str.validate_non_empty("test").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(0.0f64.validate_amount("value").is_ok());
        assert!(1250.50f64.validate_amount("value").is_ok());
        assert!((-1.0f64).validate_amount("value").is_err());
        assert!(f64::NAN.validate_amount("value").is_err());
        assert!(f64::INFINITY.validate_amount("value").is_err());
    }

    #[test]
    fn test_validate_amount_reports_field_name() {
        let err = (-5.0f64).validate_amount("opportunities[0].value").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidValue {
                field: "opportunities[0].value".to_string(),
                reason: "must be non-negative".to_string(),
            }
        );
    }
}
