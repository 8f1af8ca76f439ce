//! Role-scoped fetching
//!
//! One entry point, four strategies. Every role resolves to the same
//! shape (businesses plus contacts) so downstream joining and querying
//! never has to know who is asking. The two collection fetches run
//! concurrently; if either fails the whole scoped fetch fails, so the
//! caller never commits half a working set.

use crate::error::EngineResult;
use prospect_core::{Business, Caller, Contact, Role, UserId};
use prospect_remote::CrmApi;
use std::collections::HashSet;

/// The raw working set for one caller: scoped businesses and contacts.
#[derive(Debug, Clone, Default)]
pub struct ScopedData {
    pub businesses: Vec<Business>,
    pub contacts: Vec<Contact>,
}

/// Fetch the records visible to `caller` under their role.
///
/// - Admin: everything, both collections.
/// - Owner: records of the caller's company.
/// - Manager: records of the caller plus the sellers they manage.
/// - Sale: businesses the caller created, contacts assigned to them.
pub async fn scoped_fetch(api: &dyn CrmApi, caller: &Caller) -> EngineResult<ScopedData> {
    let data = match caller.role {
        Role::Admin => {
            let (businesses, contacts) =
                tokio::try_join!(api.list_businesses(), api.list_contacts())?;
            ScopedData {
                businesses,
                contacts,
            }
        }
        Role::Owner => {
            let (mut businesses, mut contacts) =
                tokio::try_join!(api.list_businesses(), api.list_contacts())?;
            businesses.retain(|b| b.created_by.company_id == caller.company_id);
            let in_scope: HashSet<&prospect_core::BusinessId> =
                businesses.iter().map(|b| &b.id).collect();
            contacts.retain(|c| {
                c.created_by.company_id == caller.company_id
                    || c.business
                        .as_ref()
                        .is_some_and(|r| in_scope.contains(&r.id))
            });
            ScopedData {
                businesses,
                contacts,
            }
        }
        Role::Manager => {
            // The team has to be known before the records can be
            // filtered, so the seller lookup happens up front.
            let sellers = api.list_users_by_role(Role::Sale).await?;
            let team = team_of(caller, &sellers);
            let (mut businesses, mut contacts) =
                tokio::try_join!(api.list_businesses(), api.list_contacts())?;
            businesses.retain(|b| team.contains(&b.created_by.id));
            let in_scope: HashSet<&prospect_core::BusinessId> =
                businesses.iter().map(|b| &b.id).collect();
            contacts.retain(|c| {
                team.contains(&c.assigned_to)
                    || c.business
                        .as_ref()
                        .is_some_and(|r| in_scope.contains(&r.id))
            });
            ScopedData {
                businesses,
                contacts,
            }
        }
        Role::Sale => {
            let (businesses, mut contacts) = tokio::try_join!(
                api.list_businesses_by_user(&caller.id),
                api.list_contacts()
            )?;
            contacts.retain(|c| c.assigned_to == caller.id);
            ScopedData {
                businesses,
                contacts,
            }
        }
    };

    tracing::debug!(
        role = %caller.role,
        businesses = data.businesses.len(),
        contacts = data.contacts.len(),
        "scoped fetch complete"
    );
    Ok(data)
}

/// The manager plus every seller whose `manager_id` names them.
fn team_of(caller: &Caller, sellers: &[prospect_core::User]) -> HashSet<UserId> {
    let mut team: HashSet<UserId> = sellers
        .iter()
        .filter(|u| u.manager_id.as_ref() == Some(&caller.id))
        .map(|u| u.id.clone())
        .collect();
    team.insert(caller.id.clone());
    team
}

// =============================================================================
// TESTS
// =============================================================================
