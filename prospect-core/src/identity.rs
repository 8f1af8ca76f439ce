//! Identity types for Prospect entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Declares an opaque string-backed identifier.
///
/// The CRM service mints identifiers server-side and treats them as
/// opaque tokens, so these wrap the raw string instead of a structured
/// type. `#[serde(transparent)]` keeps the wire shape a bare JSON
/// string.
macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id! {
    /// Identifier of a business record.
    BusinessId
}

string_id! {
    /// Identifier of a contact record.
    ContactId
}

string_id! {
    /// Identifier of a CRM user account.
    UserId
}

string_id! {
    /// Identifier of a company (tenant) within the CRM.
    CompanyId
}
