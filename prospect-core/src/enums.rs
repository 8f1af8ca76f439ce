//! Enum types shared across the Prospect crates

use crate::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access role attached to a CRM user account.
///
/// Roles form the visibility hierarchy: admins see everything, owners
/// see their company, managers see their sellers, sellers see only
/// their own records. The set is closed; unknown role strings are
/// rejected at the boundary rather than mapped to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Owner,
    Manager,
    Sale,
}

impl Role {
    /// Parse a raw role string as received from the auth layer.
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        match raw {
            "admin" => Ok(Role::Admin),
            "owner" => Ok(Role::Owner),
            "manager" => Ok(Role::Manager),
            "sale" => Ok(Role::Sale),
            other => Err(AuthError::UnrecognizedRole {
                role: other.to_string(),
            }),
        }
    }

    /// Wire representation used in endpoint paths and JSON bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Owner => "owner",
            Role::Manager => "manager",
            Role::Sale => "sale",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_known_values() {
        assert_eq!(Role::parse("admin").unwrap(), Role::Admin);
        assert_eq!(Role::parse("owner").unwrap(), Role::Owner);
        assert_eq!(Role::parse("manager").unwrap(), Role::Manager);
        assert_eq!(Role::parse("sale").unwrap(), Role::Sale);
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        let err = Role::parse("superadmin").unwrap_err();
        assert_eq!(
            err,
            AuthError::UnrecognizedRole {
                role: "superadmin".to_string()
            }
        );
    }

    #[test]
    fn test_role_parse_is_case_sensitive() {
        assert!(Role::parse("Admin").is_err());
        assert!(Role::parse("SALE").is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        let role: Role = serde_json::from_str("\"sale\"").unwrap();
        assert_eq!(role, Role::Sale);
    }

    #[test]
    fn test_role_display_round_trip() {
        for role in [Role::Admin, Role::Owner, Role::Manager, Role::Sale] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }
}
