//! Error types shared across the Prospect crates

use thiserror::Error;

/// Authorization errors raised at the identity boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Unrecognized role: {role}")]
    UnrecognizedRole { role: String },

    #[error("Missing identity field: {field}")]
    MissingIdentity { field: String },
}

/// Validation errors for user-supplied record fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display_unrecognized_role() {
        let err = AuthError::UnrecognizedRole {
            role: "wizard".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Unrecognized role"));
        assert!(msg.contains("wizard"));
    }

    #[test]
    fn test_validation_error_display_required_field() {
        let err = ValidationError::RequiredFieldMissing {
            field: "name".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Required field missing"));
        assert!(msg.contains("name"));
    }

    #[test]
    fn test_validation_error_display_invalid_value() {
        let err = ValidationError::InvalidValue {
            field: "value".to_string(),
            reason: "must be non-negative".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid value for value"));
        assert!(msg.contains("must be non-negative"));
    }
}
