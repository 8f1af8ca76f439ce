//! Core entity structures
//!
//! Wire-faithful models of the CRM service's records. The service
//! speaks camelCase JSON with Mongo-style `_id` keys; serde attributes
//! here mirror that shape so records round-trip untouched. Fields the
//! service may omit are `Option` or container types with defaults.

use crate::{
    AuthError, BusinessId, CompanyId, ContactId, Role, Timestamp, UserId,
    validate::ValidateNonEmpty,
};
use serde::{Deserialize, Serialize};

/// Creator stamp denormalized onto every record.
///
/// Carrying the creator's company on the record itself is what makes
/// owner-level scoping a pure in-memory filter instead of a second
/// lookup against the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBy {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub company_id: CompanyId,
}

/// Lightweight reference from a contact back to its business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRef {
    #[serde(rename = "_id")]
    pub id: BusinessId,
    pub name: String,
}

/// Per-channel do-not-disturb flags on a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DndSettings {
    #[serde(default)]
    pub call: bool,
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub sms: bool,
    #[serde(default)]
    pub whatsapp: bool,
    #[serde(default)]
    pub gmb: bool,
    #[serde(default)]
    pub facebook: bool,
}

impl DndSettings {
    /// True when every channel is blocked.
    pub fn all_blocked(&self) -> bool {
        self.call && self.email && self.sms && self.whatsapp && self.gmb && self.facebook
    }
}

/// Business - a company-level lead record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(rename = "_id")]
    pub id: BusinessId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_by: CreatedBy,
    pub created_at: Timestamp,
}

/// Contact - a person-level lead record, optionally linked to a business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id")]
    pub id: ContactId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// Funnel stage label. Open string, not an enum; tenants rename
    /// and extend their pipelines freely.
    pub status: String,
    pub assigned_to: UserId,
    pub created_by: CreatedBy,
    #[serde(default)]
    pub business: Option<BusinessRef>,
    #[serde(default)]
    pub dnd_settings: DndSettings,
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub notes: Vec<ContactNote>,
    pub created_at: Timestamp,
}

impl Contact {
    /// Presentation name: first and last name joined, trailing space
    /// trimmed when the last name is absent.
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.trim().is_empty() => {
                format!("{} {}", self.first_name.trim(), last.trim())
            }
            _ => self.first_name.trim().to_string(),
        }
    }
}

/// Opportunity - a deal attached to a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    #[serde(default)]
    pub products: Vec<String>,
    pub stage: String,
    pub value: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Free-form note attached to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactNote {
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Timestamp,
}

/// User - a CRM account in the tenant directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    pub company_id: CompanyId,
    /// Present on seller accounts; names the manager they report to.
    #[serde(default)]
    pub manager_id: Option<UserId>,
}

/// The authenticated identity on whose behalf the engine operates.
///
/// Built once per session from raw session values; construction is the
/// only place role strings are admitted, so everything downstream can
/// match on [`Role`] exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub id: UserId,
    pub role: Role,
    pub company_id: CompanyId,
}

impl Caller {
    pub fn new(id: UserId, role: Role, company_id: CompanyId) -> Self {
        Self {
            id,
            role,
            company_id,
        }
    }

    /// Build a caller from raw session strings, rejecting blank
    /// identifiers and unknown roles.
    pub fn from_parts(id: &str, role: &str, company_id: &str) -> Result<Self, AuthError> {
        if id.trim().is_empty() {
            return Err(AuthError::MissingIdentity {
                field: "user_id".to_string(),
            });
        }
        if company_id.trim().is_empty() {
            return Err(AuthError::MissingIdentity {
                field: "company_id".to_string(),
            });
        }
        Ok(Self {
            id: UserId::from(id),
            role: Role::parse(role)?,
            company_id: CompanyId::from(company_id),
        })
    }
}

/// Contact fields projected into the business-keyed index.
///
/// A summary is what list views consume: enough to render a lead row
/// and its badges without holding the full contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    pub id: ContactId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub assigned_to: UserId,
    pub created_at: Timestamp,
    pub opportunities: Vec<Opportunity>,
    pub dnd_settings: DndSettings,
}

impl From<&Contact> for ContactSummary {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.clone(),
            name: contact.display_name(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            status: contact.status.clone(),
            assigned_to: contact.assigned_to.clone(),
            created_at: contact.created_at,
            opportunities: contact.opportunities.clone(),
            dnd_settings: contact.dnd_settings,
        }
    }
}

/// Draft fields for creating a business. The service fills in `_id`,
/// `createdAt`, and echoes the creator stamp back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDraft {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl BusinessDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Check required fields before anything leaves the process.
    pub fn validate(&self) -> Result<(), crate::ValidationError> {
        self.name.validate_non_empty("name")?;
        Ok(())
    }
}

/// Draft fields for creating a contact alongside (or under) a business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Funnel stage the contact starts in. Required; the engine never
    /// invents a default stage on the client's behalf.
    pub status: String,
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
}

impl ContactDraft {
    pub fn validate(&self) -> Result<(), crate::ValidationError> {
        use crate::validate::ValidateAmount;

        self.first_name.validate_non_empty("first_name")?;
        self.status.validate_non_empty("status")?;
        for (i, opp) in self.opportunities.iter().enumerate() {
            opp.stage.validate_non_empty("opportunities.stage")?;
            opp.value.validate_amount(&format!("opportunities[{}].value", i))?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn creator() -> CreatedBy {
        CreatedBy {
            id: UserId::from("u1"),
            company_id: CompanyId::from("c1"),
        }
    }

    #[test]
    fn test_business_parses_camel_case_wire_shape() {
        let json = r#"{
            "_id": "b1",
            "name": "Acme Signs",
            "phone": "555-0100",
            "postalCode": "97201",
            "createdBy": { "_id": "u1", "companyId": "c1" },
            "createdAt": "2024-03-01T12:00:00Z"
        }"#;
        let business: Business = serde_json::from_str(json).unwrap();
        assert_eq!(business.id, BusinessId::from("b1"));
        assert_eq!(business.postal_code.as_deref(), Some("97201"));
        assert_eq!(business.email, None);
        assert_eq!(business.created_by.company_id, CompanyId::from("c1"));
    }

    #[test]
    fn test_contact_defaults_for_omitted_collections() {
        let json = r#"{
            "_id": "ct1",
            "firstName": "Rosa",
            "status": "New",
            "assignedTo": "u1",
            "createdBy": { "_id": "u1", "companyId": "c1" },
            "createdAt": "2024-03-01T12:00:00Z"
        }"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert!(contact.business.is_none());
        assert!(contact.opportunities.is_empty());
        assert!(contact.notes.is_empty());
        assert_eq!(contact.dnd_settings, DndSettings::default());
    }

    #[test]
    fn test_contact_display_name() {
        let mut contact = Contact {
            id: ContactId::from("ct1"),
            first_name: "Rosa".to_string(),
            last_name: Some("Diaz".to_string()),
            email: None,
            phone: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            website: None,
            status: "New".to_string(),
            assigned_to: UserId::from("u1"),
            created_by: creator(),
            business: None,
            dnd_settings: DndSettings::default(),
            opportunities: vec![],
            notes: vec![],
            created_at: Utc::now(),
        };
        assert_eq!(contact.display_name(), "Rosa Diaz");

        contact.last_name = None;
        assert_eq!(contact.display_name(), "Rosa");

        contact.last_name = Some("   ".to_string());
        assert_eq!(contact.display_name(), "Rosa");
    }

    #[test]
    fn test_contact_summary_projection() {
        let contact = Contact {
            id: ContactId::from("ct9"),
            first_name: "Jon".to_string(),
            last_name: Some("Ahn".to_string()),
            email: Some("jon@acme.test".to_string()),
            phone: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            website: None,
            status: "Qualified".to_string(),
            assigned_to: UserId::from("u2"),
            created_by: creator(),
            business: Some(BusinessRef {
                id: BusinessId::from("b1"),
                name: "Acme Signs".to_string(),
            }),
            dnd_settings: DndSettings {
                sms: true,
                ..DndSettings::default()
            },
            opportunities: vec![],
            notes: vec![],
            created_at: Utc::now(),
        };

        let summary = ContactSummary::from(&contact);
        assert_eq!(summary.name, "Jon Ahn");
        assert_eq!(summary.status, "Qualified");
        assert!(summary.dnd_settings.sms);
    }

    #[test]
    fn test_caller_from_parts() {
        let caller = Caller::from_parts("u1", "manager", "c1").unwrap();
        assert_eq!(caller.role, Role::Manager);
        assert_eq!(caller.id, UserId::from("u1"));

        let err = Caller::from_parts("u1", "intern", "c1").unwrap_err();
        assert!(matches!(err, AuthError::UnrecognizedRole { .. }));

        let err = Caller::from_parts("  ", "admin", "c1").unwrap_err();
        assert!(matches!(err, AuthError::MissingIdentity { .. }));

        let err = Caller::from_parts("u1", "admin", "").unwrap_err();
        assert!(matches!(err, AuthError::MissingIdentity { .. }));
    }

    #[test]
    fn test_business_draft_validation() {
        assert!(BusinessDraft::named("Acme").validate().is_ok());
        assert!(BusinessDraft::named("   ").validate().is_err());
        assert!(BusinessDraft::default().validate().is_err());
    }

    #[test]
    fn test_contact_draft_validation() {
        let mut draft = ContactDraft {
            first_name: "Rosa".to_string(),
            status: "New".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());

        draft.status.clear();
        assert!(draft.validate().is_err());

        draft.status = "New".to_string();
        draft.opportunities.push(Opportunity {
            products: vec!["signage".to_string()],
            stage: "New".to_string(),
            value: -10.0,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_dnd_all_blocked() {
        let mut dnd = DndSettings::default();
        assert!(!dnd.all_blocked());
        dnd = DndSettings {
            call: true,
            email: true,
            sms: true,
            whatsapp: true,
            gmb: true,
            facebook: true,
        };
        assert!(dnd.all_blocked());
    }

    #[test]
    fn test_user_role_wire_shape() {
        let json = r#"{
            "_id": "u5",
            "name": "Mira Voss",
            "role": "sale",
            "companyId": "c1",
            "managerId": "u2"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Sale);
        assert_eq!(user.manager_id, Some(UserId::from("u2")));
    }
}
