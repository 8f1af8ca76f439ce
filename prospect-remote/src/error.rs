//! Error types for the CRM service client

use thiserror::Error;

/// Errors surfaced by CRM endpoint calls.
///
/// The split matters to callers: `Network` means the service was never
/// (or not fully) reached, `Server` means it answered with a non-2xx
/// status, `Decode` means a 2xx body did not match the expected shape.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Client config error: {0}")]
    Config(String),
}

impl RemoteError {
    /// Server-supplied failure text when there is one, otherwise the
    /// full error rendering. Bulk reports prefer the former.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RemoteError::Server { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Shorthand used by the mock and by tests.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        RemoteError::Server {
            status,
            message: message.into(),
        }
    }
}

/// Result type alias for CRM endpoint calls.
pub type RemoteResult<T> = Result<T, RemoteError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let err = RemoteError::server(500, "boom");
        let msg = format!("{}", err);
        assert!(msg.contains("500"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_server_message_extraction() {
        assert_eq!(
            RemoteError::server(404, "Business not found").server_message(),
            Some("Business not found")
        );
        assert_eq!(RemoteError::server(500, "   ").server_message(), None);
        assert_eq!(
            RemoteError::InvalidResponse("weird".to_string()).server_message(),
            None
        );
    }
}
