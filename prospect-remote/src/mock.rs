//! In-memory mock of the CRM service
//!
//! Behaves like the live service over owned `Vec`s: records keep
//! insertion order, ids are minted on create, and deletes of unknown
//! ids answer 404. Failure injection hooks let tests exercise the
//! partial-failure paths without a network.

use crate::api::CrmApi;
use crate::error::{RemoteError, RemoteResult};
use crate::types::{
    CreateBusinessRequest, CreateContactRequest, UpdateBusinessRequest, UpdateContactRequest,
};
use ::async_trait::async_trait;
use chrono::Utc;
use prospect_core::{Business, BusinessId, Contact, ContactId, Role, User, UserId};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Mock CRM service backed by in-memory collections.
#[derive(Default, Clone)]
pub struct MockCrmApi {
    businesses: Arc<RwLock<Vec<Business>>>,
    contacts: Arc<RwLock<Vec<Contact>>>,
    users: Arc<RwLock<Vec<User>>>,
    fail_business_deletes: Arc<RwLock<HashSet<BusinessId>>>,
    fail_business_updates: Arc<RwLock<HashSet<BusinessId>>>,
    fail_next_business_fetch: Arc<AtomicBool>,
    fail_next_contact_fetch: Arc<AtomicBool>,
    fail_next_contact_create: Arc<AtomicBool>,
}

impl MockCrmApi {
    /// Create an empty mock service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a business record as-is.
    pub fn seed_business(&self, business: Business) {
        self.businesses.write().unwrap().push(business);
    }

    /// Seed a contact record as-is.
    pub fn seed_contact(&self, contact: Contact) {
        self.contacts.write().unwrap().push(contact);
    }

    /// Seed a user directory entry.
    pub fn seed_user(&self, user: User) {
        self.users.write().unwrap().push(user);
    }

    /// Get count of stored businesses.
    pub fn business_count(&self) -> usize {
        self.businesses.read().unwrap().len()
    }

    /// Get count of stored contacts.
    pub fn contact_count(&self) -> usize {
        self.contacts.read().unwrap().len()
    }

    /// Make every delete of `id` answer 500 until cleared.
    pub fn fail_delete_of(&self, id: BusinessId) {
        self.fail_business_deletes.write().unwrap().insert(id);
    }

    /// Make every update of `id` answer 500 until cleared.
    pub fn fail_update_of(&self, id: BusinessId) {
        self.fail_business_updates.write().unwrap().insert(id);
    }

    /// Make the next business list fetch fail once.
    pub fn fail_next_business_fetch(&self) {
        self.fail_next_business_fetch.store(true, Ordering::SeqCst);
    }

    /// Make the next contact list fetch fail once.
    pub fn fail_next_contact_fetch(&self) {
        self.fail_next_contact_fetch.store(true, Ordering::SeqCst);
    }

    /// Make the next contact create fail once.
    pub fn fail_next_contact_create(&self) {
        self.fail_next_contact_create.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CrmApi for MockCrmApi {
    async fn list_businesses(&self) -> RemoteResult<Vec<Business>> {
        if self.fail_next_business_fetch.swap(false, Ordering::SeqCst) {
            return Err(RemoteError::server(500, "business fetch unavailable"));
        }
        Ok(self.businesses.read().unwrap().clone())
    }

    async fn list_businesses_by_user(&self, user_id: &UserId) -> RemoteResult<Vec<Business>> {
        if self.fail_next_business_fetch.swap(false, Ordering::SeqCst) {
            return Err(RemoteError::server(500, "business fetch unavailable"));
        }
        let businesses = self.businesses.read().unwrap();
        Ok(businesses
            .iter()
            .filter(|b| &b.created_by.id == user_id)
            .cloned()
            .collect())
    }

    async fn create_business(&self, req: &CreateBusinessRequest) -> RemoteResult<Business> {
        let business = Business {
            id: BusinessId::new(format!("mock-{}", Uuid::new_v4())),
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            address: req.address.clone(),
            city: req.city.clone(),
            state: req.state.clone(),
            postal_code: req.postal_code.clone(),
            country: req.country.clone(),
            website: req.website.clone(),
            description: req.description.clone(),
            created_by: req.created_by.clone(),
            created_at: Utc::now(),
        };
        self.businesses.write().unwrap().push(business.clone());
        Ok(business)
    }

    async fn update_business(
        &self,
        id: &BusinessId,
        req: &UpdateBusinessRequest,
    ) -> RemoteResult<Business> {
        if self.fail_business_updates.read().unwrap().contains(id) {
            return Err(RemoteError::server(500, "injected update failure"));
        }
        let mut businesses = self.businesses.write().unwrap();
        let business = businesses
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| RemoteError::server(404, "Business not found"))?;

        if let Some(name) = &req.name {
            business.name = name.clone();
        }
        if let Some(email) = &req.email {
            business.email = Some(email.clone());
        }
        if let Some(phone) = &req.phone {
            business.phone = Some(phone.clone());
        }
        if let Some(address) = &req.address {
            business.address = Some(address.clone());
        }
        if let Some(city) = &req.city {
            business.city = Some(city.clone());
        }
        if let Some(state) = &req.state {
            business.state = Some(state.clone());
        }
        if let Some(postal_code) = &req.postal_code {
            business.postal_code = Some(postal_code.clone());
        }
        if let Some(country) = &req.country {
            business.country = Some(country.clone());
        }
        if let Some(website) = &req.website {
            business.website = Some(website.clone());
        }
        if let Some(description) = &req.description {
            business.description = Some(description.clone());
        }
        Ok(business.clone())
    }

    async fn delete_business(&self, id: &BusinessId) -> RemoteResult<()> {
        if self.fail_business_deletes.read().unwrap().contains(id) {
            return Err(RemoteError::server(500, "injected delete failure"));
        }
        let mut businesses = self.businesses.write().unwrap();
        let before = businesses.len();
        businesses.retain(|b| &b.id != id);
        if businesses.len() == before {
            return Err(RemoteError::server(404, "Business not found"));
        }
        Ok(())
    }

    async fn list_contacts(&self) -> RemoteResult<Vec<Contact>> {
        if self.fail_next_contact_fetch.swap(false, Ordering::SeqCst) {
            return Err(RemoteError::server(500, "contact fetch unavailable"));
        }
        Ok(self.contacts.read().unwrap().clone())
    }

    async fn create_contact(&self, req: &CreateContactRequest) -> RemoteResult<Contact> {
        if self.fail_next_contact_create.swap(false, Ordering::SeqCst) {
            return Err(RemoteError::server(500, "contact create rejected"));
        }
        let contact = Contact {
            id: ContactId::new(format!("mock-{}", Uuid::new_v4())),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            address: req.address.clone(),
            city: req.city.clone(),
            state: req.state.clone(),
            postal_code: req.postal_code.clone(),
            country: req.country.clone(),
            website: req.website.clone(),
            status: req.status.clone(),
            assigned_to: req.assigned_to.clone(),
            created_by: req.created_by.clone(),
            business: req.business.clone(),
            dnd_settings: req.dnd_settings,
            opportunities: req.opportunities.clone(),
            notes: req.notes.clone(),
            created_at: Utc::now(),
        };
        self.contacts.write().unwrap().push(contact.clone());
        Ok(contact)
    }

    async fn update_contact(
        &self,
        id: &ContactId,
        req: &UpdateContactRequest,
    ) -> RemoteResult<Contact> {
        let mut contacts = self.contacts.write().unwrap();
        let contact = contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| RemoteError::server(404, "Lead not found"))?;

        if let Some(first_name) = &req.first_name {
            contact.first_name = first_name.clone();
        }
        if let Some(last_name) = &req.last_name {
            contact.last_name = Some(last_name.clone());
        }
        if let Some(email) = &req.email {
            contact.email = Some(email.clone());
        }
        if let Some(phone) = &req.phone {
            contact.phone = Some(phone.clone());
        }
        if let Some(status) = &req.status {
            contact.status = status.clone();
        }
        if let Some(assigned_to) = &req.assigned_to {
            contact.assigned_to = assigned_to.clone();
        }
        if let Some(dnd_settings) = &req.dnd_settings {
            contact.dnd_settings = *dnd_settings;
        }
        if let Some(opportunities) = &req.opportunities {
            contact.opportunities = opportunities.clone();
        }
        Ok(contact.clone())
    }

    async fn delete_contact(&self, id: &ContactId) -> RemoteResult<()> {
        let mut contacts = self.contacts.write().unwrap();
        let before = contacts.len();
        contacts.retain(|c| &c.id != id);
        if contacts.len() == before {
            return Err(RemoteError::server(404, "Lead not found"));
        }
        Ok(())
    }

    async fn list_users_by_role(&self, role: Role) -> RemoteResult<Vec<User>> {
        let users = self.users.read().unwrap();
        Ok(users.iter().filter(|u| u.role == role).cloned().collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use prospect_core::{CompanyId, CreatedBy};

    fn business(id: &str, name: &str, creator: &str) -> Business {
        Business {
            id: BusinessId::from(id),
            name: name.to_string(),
            email: None,
            phone: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            website: None,
            description: None,
            created_by: CreatedBy {
                id: UserId::from(creator),
                company_id: CompanyId::from("c1"),
            },
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_preserves_seed_order() {
        let mock = MockCrmApi::new();
        mock.seed_business(business("b1", "Alpha", "u1"));
        mock.seed_business(business("b2", "Beta", "u2"));
        mock.seed_business(business("b3", "Gamma", "u1"));

        let all = mock.list_businesses().await.unwrap();
        let names: Vec<&str> = all.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[tokio::test]
    async fn test_list_by_user_filters_creator() {
        let mock = MockCrmApi::new();
        mock.seed_business(business("b1", "Alpha", "u1"));
        mock.seed_business(business("b2", "Beta", "u2"));

        let mine = mock
            .list_businesses_by_user(&UserId::from("u1"))
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Alpha");
    }

    #[tokio::test]
    async fn test_update_merges_only_present_fields() {
        let mock = MockCrmApi::new();
        mock.seed_business(business("b1", "Alpha", "u1"));

        let req = UpdateBusinessRequest {
            phone: Some("555-0100".to_string()),
            ..Default::default()
        };
        let updated = mock
            .update_business(&BusinessId::from("b1"), &req)
            .await
            .unwrap();
        assert_eq!(updated.name, "Alpha");
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
    }

    #[tokio::test]
    async fn test_delete_missing_business_is_404() {
        let mock = MockCrmApi::new();
        let err = mock
            .delete_business(&BusinessId::from("nope"))
            .await
            .unwrap_err();
        match err {
            RemoteError::Server { status, .. } => assert_eq!(status, 404),
            other => panic!("expected 404, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_injected_fetch_failure_is_one_shot() {
        let mock = MockCrmApi::new();
        mock.seed_business(business("b1", "Alpha", "u1"));
        mock.fail_next_business_fetch();

        assert!(mock.list_businesses().await.is_err());
        assert!(mock.list_businesses().await.is_ok());
    }

    #[tokio::test]
    async fn test_create_business_mints_id() {
        let mock = MockCrmApi::new();
        let caller = prospect_core::Caller::new(
            UserId::from("u1"),
            Role::Owner,
            CompanyId::from("c1"),
        );
        let req = CreateBusinessRequest::from_draft(
            prospect_core::BusinessDraft::named("Acme"),
            &caller,
        );
        let created = mock.create_business(&req).await.unwrap();
        assert!(created.id.as_str().starts_with("mock-"));
        assert_eq!(mock.business_count(), 1);
    }
}
