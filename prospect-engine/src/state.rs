//! Engine state container
//!
//! One `LeadEngine` instance owns the working set for one signed-in
//! caller: the scoped businesses, the contact index derived from them,
//! and the query, selection, and column state layered on top. All
//! collaborators are injected, so the container itself performs no I/O
//! at construction beyond reading the column preference.

use crate::columns::{Column, ColumnPrefs};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::join::build_contact_index;
use crate::mutation::{self, BulkDeleteReport};
use crate::query::{QueryView, SortKey, SortSpec};
use crate::scope::{scoped_fetch, ScopedData};
use crate::selection::SelectionSet;
use crate::settings::{FileSettings, SettingsStore};
use prospect_core::{
    Business, BusinessDraft, BusinessId, Caller, Contact, ContactDraft, ContactId,
    ContactSummary, ValidationError,
};
use prospect_remote::{
    CreateBusinessRequest, CreateContactRequest, CrmApi, HttpCrmApi, UpdateBusinessRequest,
    UpdateContactRequest,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Proof that a refresh was begun. Redeemed exactly once against
/// `complete_refresh` or `fail_refresh`; a ticket older than the
/// latest issued one is refused, which is what stops a slow fetch
/// from overwriting a newer one.
#[derive(Debug, PartialEq, Eq)]
pub struct RefreshTicket(u64);

/// The engine's mutable state for one caller session.
pub struct LeadEngine {
    api: Arc<dyn CrmApi>,
    settings: Box<dyn SettingsStore>,

    businesses: Vec<Business>,
    contact_index: HashMap<BusinessId, Vec<ContactSummary>>,
    caller: Option<Caller>,

    query: QueryView,
    selection: SelectionSet,
    columns: ColumnPrefs,

    is_loading: bool,
    is_transitioning: bool,
    fetch_seq: u64,
}

impl LeadEngine {
    pub fn new(api: Arc<dyn CrmApi>, settings: Box<dyn SettingsStore>, page_size: usize) -> Self {
        let columns = ColumnPrefs::load(settings.as_ref());
        Self {
            api,
            settings,
            businesses: Vec::new(),
            contact_index: HashMap::new(),
            caller: None,
            query: QueryView::new(page_size),
            selection: SelectionSet::new(),
            columns,
            is_loading: false,
            is_transitioning: false,
            fetch_seq: 0,
        }
    }

    /// Wire up the live HTTP client and file-backed settings described
    /// by a loaded configuration.
    pub fn from_config(config: &EngineConfig) -> EngineResult<Self> {
        let api = HttpCrmApi::new(
            &config.api_base_url,
            &config.credentials(),
            config.request_timeout_ms,
        )?;
        let settings = FileSettings::open(&config.settings_path);
        Ok(Self::new(
            Arc::new(api),
            Box::new(settings),
            config.page_size,
        ))
    }

    // ========================================================================
    // REFRESH LIFECYCLE
    // ========================================================================

    /// Mark a refresh as in flight and issue its ticket.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.fetch_seq += 1;
        self.is_loading = true;
        RefreshTicket(self.fetch_seq)
    }

    /// Commit a finished fetch. Returns `false` without touching the
    /// cache when the ticket is not the latest issued one, which means
    /// a newer refresh started while this one was in flight.
    ///
    /// The selection set is left alone; callers decide when a scope
    /// change warrants clearing it.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        caller: Caller,
        data: ScopedData,
    ) -> bool {
        if ticket.0 != self.fetch_seq {
            tracing::warn!(
                ticket = ticket.0,
                current = self.fetch_seq,
                "discarding stale fetch result"
            );
            return false;
        }
        self.contact_index = build_contact_index(&data.businesses, &data.contacts);
        self.businesses = data.businesses;
        self.caller = Some(caller);
        self.is_loading = false;
        true
    }

    /// Settle a failed fetch. The cache keeps its previous contents;
    /// only the loading flag is cleared, and only if no newer refresh
    /// has started since.
    pub fn fail_refresh(&mut self, ticket: RefreshTicket) {
        if ticket.0 == self.fetch_seq {
            self.is_loading = false;
        }
    }

    /// Fetch and commit the caller's working set in one step.
    pub async fn refresh(&mut self, caller: Caller) -> EngineResult<()> {
        let ticket = self.begin_refresh();
        let api = Arc::clone(&self.api);
        match scoped_fetch(api.as_ref(), &caller).await {
            Ok(data) => {
                self.complete_refresh(ticket, caller, data);
                Ok(())
            }
            Err(err) => {
                self.fail_refresh(ticket);
                Err(err)
            }
        }
    }

    // ========================================================================
    // BUSINESS MUTATIONS
    // ========================================================================

    /// Create a business and append it to the working set.
    pub async fn create_business(
        &mut self,
        draft: BusinessDraft,
        caller: &Caller,
    ) -> EngineResult<Business> {
        draft.validate()?;
        self.is_transitioning = true;
        let req = CreateBusinessRequest::from_draft(draft, caller);
        let result = self.api.create_business(&req).await;
        self.is_transitioning = false;

        let business = result?;
        self.businesses.push(business.clone());
        Ok(business)
    }

    /// Create a business and its first contact in sequence.
    ///
    /// Not transactional: when the contact call fails, the business
    /// has already been persisted remotely and stays in the working
    /// set, and the error names it so the caller can surface the
    /// half-finished state instead of hiding it.
    pub async fn create_business_with_contact(
        &mut self,
        business_draft: BusinessDraft,
        contact_draft: ContactDraft,
        caller: &Caller,
    ) -> EngineResult<(Business, Contact)> {
        business_draft.validate()?;
        contact_draft.validate()?;
        self.is_transitioning = true;

        let business_req = CreateBusinessRequest::from_draft(business_draft, caller);
        let business = match self.api.create_business(&business_req).await {
            Ok(business) => business,
            Err(err) => {
                self.is_transitioning = false;
                return Err(err.into());
            }
        };
        self.businesses.push(business.clone());

        let contact_req = CreateContactRequest::under_business(contact_draft, caller, &business);
        let result = self.api.create_contact(&contact_req).await;
        self.is_transitioning = false;

        match result {
            Ok(contact) => {
                self.contact_index
                    .entry(business.id.clone())
                    .or_default()
                    .push(ContactSummary::from(&contact));
                Ok((business, contact))
            }
            Err(source) => Err(EngineError::ContactCreateFailed {
                business_id: business.id.clone(),
                source,
            }),
        }
    }

    /// Apply a partial update and swap the cached record in place,
    /// keeping its position in the fetched order.
    pub async fn update_business(
        &mut self,
        id: &BusinessId,
        patch: &UpdateBusinessRequest,
    ) -> EngineResult<Business> {
        self.is_transitioning = true;
        let result = self.api.update_business(id, patch).await;
        self.is_transitioning = false;

        let updated = result?;
        if let Some(existing) = self.businesses.iter_mut().find(|b| b.id == *id) {
            *existing = updated.clone();
        }
        Ok(updated)
    }

    /// Delete one business, dropping it from the cache, the contact
    /// index, and the selection on success.
    pub async fn delete_business(&mut self, id: &BusinessId) -> EngineResult<()> {
        self.is_transitioning = true;
        let result = self.api.delete_business(id).await;
        self.is_transitioning = false;

        result?;
        self.businesses.retain(|b| b.id != *id);
        self.contact_index.remove(id);
        self.selection.remove(id);
        Ok(())
    }

    /// Delete a batch of businesses. Only ids the server confirmed
    /// deleted leave the cache; failed ids stay visible and selected
    /// so the records on screen never disagree with the server.
    pub async fn delete_businesses(&mut self, ids: &[BusinessId]) -> BulkDeleteReport {
        self.is_transitioning = true;
        let report = mutation::delete_businesses(self.api.as_ref(), ids).await;
        self.is_transitioning = false;

        let deleted: HashSet<&BusinessId> = report.deleted.iter().collect();
        self.businesses.retain(|b| !deleted.contains(&b.id));
        for id in &report.deleted {
            self.contact_index.remove(id);
            self.selection.remove(id);
        }
        report
    }

    /// Delete every currently selected business.
    pub async fn delete_selected(&mut self) -> BulkDeleteReport {
        let ids = self.selection.ids();
        self.delete_businesses(&ids).await
    }

    // ========================================================================
    // CONTACT MUTATIONS
    // ========================================================================

    /// Create a contact under a business already in the working set.
    pub async fn create_contact(
        &mut self,
        business_id: &BusinessId,
        draft: ContactDraft,
        caller: &Caller,
    ) -> EngineResult<Contact> {
        draft.validate()?;
        let business = self
            .businesses
            .iter()
            .find(|b| b.id == *business_id)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "business_id".to_string(),
                reason: "not in the current working set".to_string(),
            })?
            .clone();

        self.is_transitioning = true;
        let req = CreateContactRequest::under_business(draft, caller, &business);
        let result = self.api.create_contact(&req).await;
        self.is_transitioning = false;

        let contact = result?;
        self.contact_index
            .entry(business.id.clone())
            .or_default()
            .push(ContactSummary::from(&contact));
        Ok(contact)
    }

    /// Apply a partial update to a contact and reconcile the index.
    pub async fn update_contact(
        &mut self,
        id: &ContactId,
        patch: &UpdateContactRequest,
    ) -> EngineResult<Contact> {
        self.is_transitioning = true;
        let result = self.api.update_contact(id, patch).await;
        self.is_transitioning = false;

        let updated = result?;
        self.reconcile_contact(&updated);
        Ok(updated)
    }

    /// Delete a contact and drop its summary from the index.
    pub async fn delete_contact(&mut self, id: &ContactId) -> EngineResult<()> {
        self.is_transitioning = true;
        let result = self.api.delete_contact(id).await;
        self.is_transitioning = false;

        result?;
        for bucket in self.contact_index.values_mut() {
            bucket.retain(|s| s.id != *id);
        }
        self.contact_index.retain(|_, bucket| !bucket.is_empty());
        Ok(())
    }

    /// Place an updated contact under the business it now references.
    ///
    /// A contact that kept its business is swapped in place so the
    /// bucket order holds; one that moved, detached, or now points at
    /// an out-of-scope business is purged and, when possible, re-added.
    fn reconcile_contact(&mut self, updated: &Contact) {
        let target = updated
            .business
            .as_ref()
            .filter(|r| self.businesses.iter().any(|b| b.id == r.id))
            .map(|r| r.id.clone());

        if let Some(ref business_id) = target {
            if let Some(bucket) = self.contact_index.get_mut(business_id) {
                if let Some(existing) = bucket.iter_mut().find(|s| s.id == updated.id) {
                    *existing = ContactSummary::from(updated);
                    return;
                }
            }
        }

        for bucket in self.contact_index.values_mut() {
            bucket.retain(|s| s.id != updated.id);
        }
        self.contact_index.retain(|_, bucket| !bucket.is_empty());
        if let Some(business_id) = target {
            self.contact_index
                .entry(business_id)
                .or_default()
                .push(ContactSummary::from(updated));
        }
    }

    // ========================================================================
    // READ ACCESSORS
    // ========================================================================

    pub fn businesses(&self) -> &[Business] {
        &self.businesses
    }

    pub fn caller(&self) -> Option<&Caller> {
        self.caller.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    /// The businesses on the current page under the current search
    /// and sort.
    pub fn visible_page(&self) -> Vec<&Business> {
        self.query.page_slice(&self.businesses)
    }

    pub fn filtered_count(&self) -> usize {
        self.query.filtered_count(&self.businesses)
    }

    pub fn total_pages(&self) -> usize {
        self.query.total_pages(&self.businesses)
    }

    /// Contact summaries linked to one business; empty when it has
    /// none or is unknown.
    pub fn leads_for(&self, id: &BusinessId) -> &[ContactSummary] {
        self.contact_index.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn lead_count(&self, id: &BusinessId) -> usize {
        self.contact_index.get(id).map_or(0, Vec::len)
    }

    // ========================================================================
    // QUERY PASSTHROUGH
    // ========================================================================

    pub fn search(&self) -> &str {
        self.query.search()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.set_search(term);
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.query.sort()
    }

    pub fn cycle_sort(&mut self, key: SortKey) {
        self.query.cycle_sort(key);
    }

    pub fn page(&self) -> usize {
        self.query.page()
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.set_page(page);
    }

    pub fn page_size(&self) -> usize {
        self.query.page_size()
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.query.set_page_size(size);
    }

    // ========================================================================
    // SELECTION PASSTHROUGH
    // ========================================================================

    pub fn toggle_selection(&mut self, id: &BusinessId) {
        self.selection.toggle(id);
    }

    /// Select or deselect everything on the current page.
    pub fn toggle_page_selection(&mut self) {
        let ids: Vec<BusinessId> = self.visible_page().iter().map(|b| b.id.clone()).collect();
        self.selection.toggle_page(&ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: &BusinessId) -> bool {
        self.selection.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn selected_ids(&self) -> Vec<BusinessId> {
        self.selection.ids()
    }

    // ========================================================================
    // COLUMN PREFERENCES
    // ========================================================================

    pub fn columns(&self) -> &[Column] {
        self.columns.visible()
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns.set(self.settings.as_mut(), columns);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettings;
    use chrono::Utc;
    use prospect_core::{CompanyId, CreatedBy, Role, UserId};
    use prospect_remote::MockCrmApi;

    fn engine() -> LeadEngine {
        LeadEngine::new(
            Arc::new(MockCrmApi::new()),
            Box::new(MemorySettings::new()),
            10,
        )
    }

    fn caller() -> Caller {
        Caller::new(UserId::from("u1"), Role::Admin, CompanyId::from("c1"))
    }

    fn business(id: &str, name: &str) -> Business {
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
                id: UserId::from("u1"),
                company_id: CompanyId::from("c1"),
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_fresh_engine_is_empty() {
        let engine = engine();
        assert!(engine.businesses().is_empty());
        assert!(engine.caller().is_none());
        assert!(!engine.is_loading());
        assert_eq!(engine.total_pages(), 0);
    }

    #[test]
    fn test_complete_refresh_commits_latest_ticket() {
        let mut engine = engine();
        let ticket = engine.begin_refresh();
        assert!(engine.is_loading());

        let data = ScopedData {
            businesses: vec![business("b1", "Acme")],
            contacts: vec![],
        };
        assert!(engine.complete_refresh(ticket, caller(), data));
        assert!(!engine.is_loading());
        assert_eq!(engine.businesses().len(), 1);
        assert_eq!(engine.caller().map(|c| c.id.as_str()), Some("u1"));
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut engine = engine();
        let stale = engine.begin_refresh();
        let fresh = engine.begin_refresh();

        let old_data = ScopedData {
            businesses: vec![business("b-old", "Old")],
            contacts: vec![],
        };
        assert!(!engine.complete_refresh(stale, caller(), old_data));
        assert!(engine.businesses().is_empty());
        // The newer fetch is still considered in flight.
        assert!(engine.is_loading());

        let new_data = ScopedData {
            businesses: vec![business("b-new", "New")],
            contacts: vec![],
        };
        assert!(engine.complete_refresh(fresh, caller(), new_data));
        assert_eq!(engine.businesses()[0].id, BusinessId::from("b-new"));
    }

    #[test]
    fn test_fail_refresh_keeps_previous_cache() {
        let mut engine = engine();
        let ticket = engine.begin_refresh();
        let data = ScopedData {
            businesses: vec![business("b1", "Acme")],
            contacts: vec![],
        };
        engine.complete_refresh(ticket, caller(), data);

        let failed = engine.begin_refresh();
        engine.fail_refresh(failed);
        assert!(!engine.is_loading());
        assert_eq!(engine.businesses().len(), 1);
    }

    #[test]
    fn test_stale_fail_does_not_clear_loading() {
        let mut engine = engine();
        let stale = engine.begin_refresh();
        let _fresh = engine.begin_refresh();

        engine.fail_refresh(stale);
        assert!(engine.is_loading());
    }

    #[test]
    fn test_refresh_preserves_selection() {
        let mut engine = engine();
        engine.toggle_selection(&BusinessId::from("b1"));

        let ticket = engine.begin_refresh();
        let data = ScopedData {
            businesses: vec![business("b2", "Other")],
            contacts: vec![],
        };
        engine.complete_refresh(ticket, caller(), data);
        assert_eq!(engine.selected_count(), 1);
    }

    #[test]
    fn test_toggle_page_selection_covers_visible_page() {
        let mut engine = engine();
        let ticket = engine.begin_refresh();
        let data = ScopedData {
            businesses: vec![
                business("b1", "Acme"),
                business("b2", "Borealis"),
                business("b3", "Cirrus"),
            ],
            contacts: vec![],
        };
        engine.complete_refresh(ticket, caller(), data);
        engine.set_page_size(2);

        engine.toggle_page_selection();
        assert_eq!(engine.selected_count(), 2);
        assert!(engine.is_selected(&BusinessId::from("b1")));
        assert!(engine.is_selected(&BusinessId::from("b2")));
        assert!(!engine.is_selected(&BusinessId::from("b3")));
    }

    #[test]
    fn test_leads_for_unknown_business_is_empty() {
        let engine = engine();
        assert!(engine.leads_for(&BusinessId::from("nope")).is_empty());
        assert_eq!(engine.lead_count(&BusinessId::from("nope")), 0);
    }

    #[test]
    fn test_columns_load_from_injected_store() {
        let mut store = MemorySettings::new();
        store
            .put(crate::columns::COLUMNS_KEY, r#"["name","email","website"]"#)
            .unwrap();
        let engine = LeadEngine::new(Arc::new(MockCrmApi::new()), Box::new(store), 10);
        assert_eq!(
            engine.columns(),
            &[Column::Name, Column::Email, Column::Website]
        );
    }
}
