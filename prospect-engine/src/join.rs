//! Business-to-contact join
//!
//! The CRM returns the two collections flat; list views want contacts
//! grouped under their business. The index is rebuilt from scratch on
//! every refresh rather than patched, so it can never drift from the
//! collections it was derived from.

use prospect_core::{Business, BusinessId, Contact, ContactSummary};
use std::collections::{HashMap, HashSet};

/// Group contacts under the business each one references.
///
/// Contacts with no business reference, or referencing a business
/// outside `businesses`, are left out: a dangling reference must not
/// fabricate a key the caller would then render as a phantom row.
/// Bucket order follows the order of `contacts`.
pub fn build_contact_index(
    businesses: &[Business],
    contacts: &[Contact],
) -> HashMap<BusinessId, Vec<ContactSummary>> {
    let known: HashSet<&BusinessId> = businesses.iter().map(|b| &b.id).collect();

    let mut index: HashMap<BusinessId, Vec<ContactSummary>> = HashMap::new();
    for contact in contacts {
        let business_ref = match &contact.business {
            Some(r) => r,
            None => continue,
        };
        if !known.contains(&business_ref.id) {
            continue;
        }
        index
            .entry(business_ref.id.clone())
            .or_default()
            .push(ContactSummary::from(contact));
    }
    index
}

// =============================================================================
// TESTS
// =============================================================================
