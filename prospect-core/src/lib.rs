//! Prospect Core - Entity Types
//!
//! Pure data structures shared by every other crate: wire-faithful CRM
//! records, identity newtypes, the role enum, funnel stage labels, and
//! the validation and error types they report through. No I/O lives
//! here.

pub mod entities;
pub mod enums;
pub mod error;
pub mod funnel;
pub mod identity;
pub mod validate;

pub use entities::{
    Business, BusinessDraft, BusinessRef, Caller, Contact, ContactDraft, ContactNote,
    ContactSummary, CreatedBy, DndSettings, Opportunity, User,
};
pub use enums::Role;
pub use error::{AuthError, ValidationError};
pub use funnel::{FunnelStages, DEFAULT_STAGES};
pub use identity::{BusinessId, CompanyId, ContactId, Timestamp, UserId};
pub use validate::{ValidateAmount, ValidateNonEmpty};
