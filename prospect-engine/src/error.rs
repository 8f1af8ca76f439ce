//! Error types for engine operations

use prospect_core::{AuthError, BusinessId, ValidationError};
use prospect_remote::RemoteError;
use thiserror::Error;

/// Master error type for engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The business was persisted but its paired contact was not.
    /// Callers decide whether to retry the contact or leave the
    /// business standing alone; the engine keeps the business cached
    /// either way.
    #[error("Business {business_id} was created but its contact failed: {source}")]
    ContactCreateFailed {
        business_id: BusinessId,
        source: RemoteError,
    },
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_from_variants() {
        let remote = EngineError::from(RemoteError::server(500, "boom"));
        assert!(matches!(remote, EngineError::Remote(_)));

        let auth = EngineError::from(AuthError::UnrecognizedRole {
            role: "wizard".to_string(),
        });
        assert!(matches!(auth, EngineError::Auth(_)));

        let validation = EngineError::from(ValidationError::RequiredFieldMissing {
            field: "name".to_string(),
        });
        assert!(matches!(validation, EngineError::Validation(_)));
    }

    #[test]
    fn test_contact_create_failed_display() {
        let err = EngineError::ContactCreateFailed {
            business_id: BusinessId::from("b7"),
            source: RemoteError::server(500, "contact create rejected"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("b7"));
        assert!(msg.contains("contact create rejected"));
    }
}
