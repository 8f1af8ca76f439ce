//! Request and response DTOs for the CRM endpoints
//!
//! Create requests carry everything the service persists verbatim;
//! update requests are partial, and absent fields must stay absent on
//! the wire so the service leaves them untouched.

use prospect_core::{
    Business, BusinessDraft, BusinessRef, Caller, ContactDraft, ContactNote, CreatedBy,
    DndSettings, Opportunity, UserId,
};
use serde::{Deserialize, Serialize};

/// Error payload shape the service returns alongside non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Request to create a business record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_by: CreatedBy,
}

impl CreateBusinessRequest {
    /// Stamp a validated draft with the caller's identity.
    pub fn from_draft(draft: BusinessDraft, caller: &Caller) -> Self {
        Self {
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            postal_code: draft.postal_code,
            country: draft.country,
            website: draft.website,
            description: draft.description,
            created_by: CreatedBy {
                id: caller.id.clone(),
                company_id: caller.company_id.clone(),
            },
        }
    }
}

/// Partial update for a business record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBusinessRequest {
    /// New name (if changing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email (if changing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New phone (if changing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request to create a contact record.
///
/// When the contact is created under a business, the postal block and
/// website are copied from the business so the contact remains useful
/// on its own in list views and exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub status: String,
    pub assigned_to: UserId,
    pub created_by: CreatedBy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<BusinessRef>,
    pub dnd_settings: DndSettings,
    pub opportunities: Vec<Opportunity>,
    pub notes: Vec<ContactNote>,
}

impl CreateContactRequest {
    /// Build the wire request for a contact attached to `business`,
    /// assigned to and stamped with `caller`.
    pub fn under_business(draft: ContactDraft, caller: &Caller, business: &Business) -> Self {
        Self {
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            address: business.address.clone(),
            city: business.city.clone(),
            state: business.state.clone(),
            postal_code: business.postal_code.clone(),
            country: business.country.clone(),
            website: business.website.clone(),
            status: draft.status,
            assigned_to: caller.id.clone(),
            created_by: CreatedBy {
                id: caller.id.clone(),
                company_id: caller.company_id.clone(),
            },
            business: Some(BusinessRef {
                id: business.id.clone(),
                name: business.name.clone(),
            }),
            dnd_settings: DndSettings::default(),
            opportunities: draft.opportunities,
            notes: Vec::new(),
        }
    }

    /// Build the wire request for a standalone contact lead.
    pub fn standalone(draft: ContactDraft, caller: &Caller) -> Self {
        Self {
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            website: None,
            status: draft.status,
            assigned_to: caller.id.clone(),
            created_by: CreatedBy {
                id: caller.id.clone(),
                company_id: caller.company_id.clone(),
            },
            business: None,
            dnd_settings: DndSettings::default(),
            opportunities: draft.opportunities,
            notes: Vec::new(),
        }
    }
}

/// Partial update for a contact record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    /// New first name (if changing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New last name (if changing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New funnel stage (if moving)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Reassignment target (if changing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnd_settings: Option<DndSettings>,
    /// Full replacement for the opportunity list (if changing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunities: Option<Vec<Opportunity>>,
}

// =============================================================================
// TESTS
// =============================================================================
