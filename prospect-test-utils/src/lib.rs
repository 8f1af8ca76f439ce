//! Prospect Test Utilities
//!
//! Centralized test infrastructure for the Prospect workspace:
//! - Proptest generators for the entity types
//! - Fixture builders for records and a two-company directory
//! - Seeded mock service scenarios
//! - Assertions for scoping rules

// Re-export the mock service from its source crate
pub use prospect_remote::MockCrmApi;

// Re-export core types for convenience
pub use prospect_core::{
    Business, BusinessDraft, BusinessId, BusinessRef, Caller, CompanyId, Contact, ContactDraft,
    ContactId, ContactNote, ContactSummary, CreatedBy, DndSettings, Opportunity, Role, Timestamp,
    User, UserId,
};

use chrono::Utc;

pub mod generators {
    //! Proptest strategies for generating Prospect entity types.

    use super::*;
    use proptest::prelude::*;

    // === Identity Generators ===

    /// Generate a business id from a small pool, so independently
    /// generated businesses and contact references overlap often.
    pub fn arb_business_id() -> impl Strategy<Value = BusinessId> {
        (0u8..20).prop_map(|n| BusinessId::from(format!("b-{}", n)))
    }

    pub fn arb_contact_id() -> impl Strategy<Value = ContactId> {
        (0u32..10_000).prop_map(|n| ContactId::from(format!("ct-{}", n)))
    }

    pub fn arb_user_id() -> impl Strategy<Value = UserId> {
        (0u8..10).prop_map(|n| UserId::from(format!("u-{}", n)))
    }

    pub fn arb_company_id() -> impl Strategy<Value = CompanyId> {
        (0u8..3).prop_map(|n| CompanyId::from(format!("c-{}", n)))
    }

    /// Generate a Timestamp within a plausible record range.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1_577_836_800i64..1_893_456_000i64)
            .prop_map(|secs| chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now))
    }

    // === Enum and Value Generators ===

    pub fn arb_role() -> impl Strategy<Value = Role> {
        prop_oneof![
            Just(Role::Admin),
            Just(Role::Owner),
            Just(Role::Manager),
            Just(Role::Sale),
        ]
    }

    pub fn arb_funnel_status() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("New".to_string()),
            Just("Qualified".to_string()),
            Just("In Discussion".to_string()),
            Just("Won".to_string()),
            Just("Lost".to_string()),
        ]
    }

    pub fn arb_dnd_settings() -> impl Strategy<Value = DndSettings> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(call, email, sms)| DndSettings {
            call,
            email,
            sms,
            ..DndSettings::default()
        })
    }

    pub fn arb_opportunity() -> impl Strategy<Value = Opportunity> {
        (
            prop::collection::vec("[a-z]{3,10}", 0..3),
            arb_funnel_status(),
            0.0f64..1_000_000.0,
            arb_timestamp(),
        )
            .prop_map(|(products, stage, value, at)| Opportunity {
                products,
                stage,
                value,
                description: None,
                created_at: at,
                updated_at: at,
            })
    }

    // === Record Generators ===

    /// Generate a business. Names are non-empty and ids come from the
    /// shared pool, so generated sets carry duplicates and overlaps
    /// the way real fetches do.
    pub fn arb_business() -> impl Strategy<Value = Business> {
        (
            arb_business_id(),
            "[A-Za-z][A-Za-z ]{0,15}",
            prop::option::of("[a-z]{2,8}@[a-z]{2,8}\\.test"),
            prop::option::of("[0-9]{7,11}"),
            prop::option::of("[A-Za-z]{3,12}"),
            arb_user_id(),
            arb_company_id(),
            arb_timestamp(),
        )
            .prop_map(
                |(id, name, email, phone, city, creator, company, created_at)| Business {
                    id,
                    name,
                    email,
                    phone,
                    address: None,
                    city,
                    state: None,
                    postal_code: None,
                    country: None,
                    website: None,
                    description: None,
                    created_by: CreatedBy {
                        id: creator,
                        company_id: company,
                    },
                    created_at,
                },
            )
    }

    /// Generate a contact whose business reference, when present, is
    /// drawn from the same id pool as [`arb_business`].
    pub fn arb_contact() -> impl Strategy<Value = Contact> {
        (
            arb_contact_id(),
            "[A-Z][a-z]{2,10}",
            prop::option::of("[A-Z][a-z]{2,10}"),
            arb_funnel_status(),
            arb_user_id(),
            arb_company_id(),
            prop::option::of(arb_business_id()),
            prop::collection::vec(arb_opportunity(), 0..3),
            arb_timestamp(),
        )
            .prop_map(
                |(
                    id,
                    first_name,
                    last_name,
                    status,
                    assigned_to,
                    company,
                    business_id,
                    opportunities,
                    created_at,
                )| Contact {
                    id,
                    first_name,
                    last_name,
                    email: None,
                    phone: None,
                    address: None,
                    city: None,
                    state: None,
                    postal_code: None,
                    country: None,
                    website: None,
                    status,
                    assigned_to: assigned_to.clone(),
                    created_by: CreatedBy {
                        id: assigned_to,
                        company_id: company,
                    },
                    business: business_id.map(|id| BusinessRef {
                        name: format!("business-{}", id),
                        id,
                    }),
                    dnd_settings: DndSettings::default(),
                    opportunities,
                    notes: vec![],
                    created_at,
                },
            )
    }

    pub fn arb_businesses(max: usize) -> impl Strategy<Value = Vec<Business>> {
        prop::collection::vec(arb_business(), 0..max)
    }

    pub fn arb_contacts(max: usize) -> impl Strategy<Value = Vec<Contact>> {
        prop::collection::vec(arb_contact(), 0..max)
    }
}

pub mod fixtures {
    //! Pre-built records and scenarios for deterministic tests.

    use super::*;

    /// Build a business created by `creator` of `company`.
    pub fn business(id: &str, name: &str, creator: &str, company: &str) -> Business {
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
                company_id: CompanyId::from(company),
            },
            created_at: Utc::now(),
        }
    }

    /// Build a contact assigned to `assigned`, optionally linked to a
    /// business by `(id, name)`.
    pub fn contact(
        id: &str,
        first_name: &str,
        assigned: &str,
        company: &str,
        business: Option<(&str, &str)>,
    ) -> Contact {
        Contact {
            id: ContactId::from(id),
            first_name: first_name.to_string(),
            last_name: None,
            email: None,
            phone: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            website: None,
            status: "New".to_string(),
            assigned_to: UserId::from(assigned),
            created_by: CreatedBy {
                id: UserId::from(assigned),
                company_id: CompanyId::from(company),
            },
            business: business.map(|(id, name)| BusinessRef {
                id: BusinessId::from(id),
                name: name.to_string(),
            }),
            dnd_settings: DndSettings::default(),
            opportunities: vec![],
            notes: vec![],
            created_at: Utc::now(),
        }
    }

    /// Build a directory user.
    pub fn user(id: &str, role: Role, company: &str, manager: Option<&str>) -> User {
        User {
            id: UserId::from(id),
            name: format!("user-{}", id),
            email: Some(format!("{}@prospect.test", id)),
            role,
            company_id: CompanyId::from(company),
            manager_id: manager.map(UserId::from),
        }
    }

    /// Build a caller identity.
    pub fn caller(id: &str, role: Role, company: &str) -> Caller {
        Caller::new(UserId::from(id), role, CompanyId::from(company))
    }

    /// The standard two-company directory used across scoping tests.
    ///
    /// Company c1: owner `own1`, manager `m1` with sellers `s1` and
    /// `s2`, manager `m2` with seller `s3`. Company c2: owner `own2`
    /// with seller `s9`. One platform admin outside both.
    pub fn company_directory() -> Vec<User> {
        vec![
            user("adm", Role::Admin, "c0", None),
            user("own1", Role::Owner, "c1", None),
            user("m1", Role::Manager, "c1", None),
            user("m2", Role::Manager, "c1", None),
            user("s1", Role::Sale, "c1", Some("m1")),
            user("s2", Role::Sale, "c1", Some("m1")),
            user("s3", Role::Sale, "c1", Some("m2")),
            user("own2", Role::Owner, "c2", None),
            user("s9", Role::Sale, "c2", Some("m9")),
        ]
    }

    /// A mock service seeded with the two-company scenario:
    /// one business per seller plus one per owner, and a contact on
    /// each seller business.
    pub fn seeded_mock() -> MockCrmApi {
        let mock = MockCrmApi::new();
        for u in company_directory() {
            mock.seed_user(u);
        }

        mock.seed_business(business("b-s1", "Cascade Bikes", "s1", "c1"));
        mock.seed_business(business("b-s2", "Juniper Cafe", "s2", "c1"));
        mock.seed_business(business("b-s3", "Lumen Print", "s3", "c1"));
        mock.seed_business(business("b-own1", "Summit HQ", "own1", "c1"));
        mock.seed_business(business("b-s9", "Harbor Foods", "s9", "c2"));

        mock.seed_contact(contact(
            "ct-s1",
            "Ana",
            "s1",
            "c1",
            Some(("b-s1", "Cascade Bikes")),
        ));
        mock.seed_contact(contact(
            "ct-s2",
            "Ben",
            "s2",
            "c1",
            Some(("b-s2", "Juniper Cafe")),
        ));
        mock.seed_contact(contact(
            "ct-s3",
            "Cleo",
            "s3",
            "c1",
            Some(("b-s3", "Lumen Print")),
        ));
        mock.seed_contact(contact(
            "ct-s9",
            "Dora",
            "s9",
            "c2",
            Some(("b-s9", "Harbor Foods")),
        ));
        mock.seed_contact(contact("ct-free", "Eli", "s1", "c1", None));
        mock
    }
}

pub mod assertions {
    //! Assertions for the scoping rules.

    use super::*;
    use std::collections::HashSet;

    /// Panic unless every business was created by one of `creators`.
    pub fn assert_all_created_by(businesses: &[Business], creators: &[&str]) {
        let allowed: HashSet<&str> = creators.iter().copied().collect();
        for b in businesses {
            assert!(
                allowed.contains(b.created_by.id.as_str()),
                "business {} created by {}, expected one of {:?}",
                b.id,
                b.created_by.id,
                creators
            );
        }
    }

    /// Panic unless every contact is assigned to one of `assignees`.
    pub fn assert_all_assigned_to(contacts: &[Contact], assignees: &[&str]) {
        let allowed: HashSet<&str> = assignees.iter().copied().collect();
        for c in contacts {
            assert!(
                allowed.contains(c.assigned_to.as_str()),
                "contact {} assigned to {}, expected one of {:?}",
                c.id,
                c.assigned_to,
                assignees
            );
        }
    }

    /// Panic unless every business belongs to `company`.
    pub fn assert_all_in_company(businesses: &[Business], company: &str) {
        for b in businesses {
            assert_eq!(
                b.created_by.company_id.as_str(),
                company,
                "business {} belongs to {}",
                b.id,
                b.created_by.company_id
            );
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
