//! CRM service port
//!
//! Every network-facing operation the engine performs goes through
//! this trait, so the engine can run against the HTTP client in
//! production and the in-memory mock in tests.

use crate::error::RemoteResult;
use crate::types::{
    CreateBusinessRequest, CreateContactRequest, UpdateBusinessRequest, UpdateContactRequest,
};
use ::async_trait::async_trait;
use prospect_core::{Business, BusinessId, Contact, ContactId, Role, User, UserId};

/// Async port onto the CRM service endpoints.
#[async_trait]
pub trait CrmApi: Send + Sync {
    // ========================================================================
    // BUSINESS OPERATIONS
    // ========================================================================

    /// Fetch every business record visible to the tenant.
    async fn list_businesses(&self) -> RemoteResult<Vec<Business>>;

    /// Fetch the businesses created by one user.
    async fn list_businesses_by_user(&self, user_id: &UserId) -> RemoteResult<Vec<Business>>;

    /// Create a business; the service assigns its id and timestamps.
    async fn create_business(&self, req: &CreateBusinessRequest) -> RemoteResult<Business>;

    /// Apply a partial update and return the updated record.
    async fn update_business(
        &self,
        id: &BusinessId,
        req: &UpdateBusinessRequest,
    ) -> RemoteResult<Business>;

    /// Delete a business record.
    async fn delete_business(&self, id: &BusinessId) -> RemoteResult<()>;

    // ========================================================================
    // CONTACT OPERATIONS
    // ========================================================================

    /// Fetch every contact (lead) record visible to the tenant.
    async fn list_contacts(&self) -> RemoteResult<Vec<Contact>>;

    /// Create a contact; the service assigns its id and timestamps.
    async fn create_contact(&self, req: &CreateContactRequest) -> RemoteResult<Contact>;

    /// Apply a partial update and return the updated record.
    async fn update_contact(
        &self,
        id: &ContactId,
        req: &UpdateContactRequest,
    ) -> RemoteResult<Contact>;

    /// Delete a contact record.
    async fn delete_contact(&self, id: &ContactId) -> RemoteResult<()>;

    // ========================================================================
    // USER DIRECTORY
    // ========================================================================

    /// Fetch the tenant's user accounts holding one role.
    async fn list_users_by_role(&self, role: Role) -> RemoteResult<Vec<User>>;
}
