//! Visible-column preferences for the business list
//!
//! Which columns a user shows is a per-user preference that outlives
//! the session. Name and email can never be hidden; every other
//! column, including the derived lead count, is optional.

use crate::settings::SettingsStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Settings key the column list is stored under.
pub const COLUMNS_KEY: &str = "prospect.business_columns";

/// Columns that stay visible no matter what the stored preference says.
pub const REQUIRED_COLUMNS: &[Column] = &[Column::Name, Column::Email];

/// Columns shown before the user has saved any preference.
pub const DEFAULT_COLUMNS: &[Column] = &[
    Column::Name,
    Column::Email,
    Column::Phone,
    Column::City,
    Column::Leads,
];

/// A column of the business list. `Leads` is derived from the contact
/// index rather than stored on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Email,
    Phone,
    Address,
    City,
    State,
    PostalCode,
    Country,
    Website,
    Description,
    Leads,
}

/// The user's visible-column choice, kept in sync with a settings store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPrefs {
    visible: Vec<Column>,
}

impl ColumnPrefs {
    /// Load the stored preference, falling back to the defaults when
    /// nothing is stored or the stored value no longer parses.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let stored = store.get(COLUMNS_KEY).and_then(|raw| {
            match serde_json::from_str::<Vec<Column>>(&raw) {
                Ok(columns) => Some(columns),
                Err(err) => {
                    tracing::warn!(error = %err, "stored column preference unreadable, using defaults");
                    None
                }
            }
        });
        let visible = match stored {
            Some(columns) => normalize(columns),
            None => DEFAULT_COLUMNS.to_vec(),
        };
        Self { visible }
    }

    pub fn visible(&self) -> &[Column] {
        &self.visible
    }

    pub fn is_visible(&self, column: Column) -> bool {
        self.visible.contains(&column)
    }

    /// Apply a new column choice and persist it. The in-memory choice
    /// always takes effect; a store that cannot be written only costs
    /// the preference its durability.
    pub fn set(&mut self, store: &mut dyn SettingsStore, columns: Vec<Column>) {
        self.visible = normalize(columns);
        match serde_json::to_string(&self.visible) {
            Ok(raw) => {
                if let Err(err) = store.put(COLUMNS_KEY, &raw) {
                    tracing::warn!(error = %err, "failed to persist column preference");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode column preference");
            }
        }
    }
}

impl Default for ColumnPrefs {
    fn default() -> Self {
        Self {
            visible: DEFAULT_COLUMNS.to_vec(),
        }
    }
}

/// Drop duplicates (keeping first occurrence) and splice any missing
/// required column back in at the front, in required order.
fn normalize(columns: Vec<Column>) -> Vec<Column> {
    let mut seen = HashSet::new();
    let mut out: Vec<Column> = columns.into_iter().filter(|c| seen.insert(*c)).collect();
    for (position, required) in REQUIRED_COLUMNS.iter().enumerate() {
        if !out.contains(required) {
            out.insert(position.min(out.len()), *required);
        }
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettings;

    #[test]
    fn test_defaults_when_nothing_stored() {
        let store = MemorySettings::new();
        let prefs = ColumnPrefs::load(&store);
        assert_eq!(prefs.visible(), DEFAULT_COLUMNS);
    }

    #[test]
    fn test_set_persists_and_reloads() {
        let mut store = MemorySettings::new();
        let mut prefs = ColumnPrefs::load(&store);
        prefs.set(
            &mut store,
            vec![Column::Name, Column::Email, Column::Website],
        );

        let reloaded = ColumnPrefs::load(&store);
        assert_eq!(
            reloaded.visible(),
            &[Column::Name, Column::Email, Column::Website]
        );
    }

    #[test]
    fn test_required_columns_cannot_be_hidden() {
        let mut store = MemorySettings::new();
        let mut prefs = ColumnPrefs::load(&store);
        prefs.set(&mut store, vec![Column::Phone, Column::Leads]);

        assert_eq!(
            prefs.visible(),
            &[Column::Name, Column::Email, Column::Phone, Column::Leads]
        );
    }

    #[test]
    fn test_duplicates_are_dropped_keeping_first() {
        let mut store = MemorySettings::new();
        let mut prefs = ColumnPrefs::load(&store);
        prefs.set(
            &mut store,
            vec![Column::Name, Column::Phone, Column::Name, Column::Email],
        );
        assert_eq!(
            prefs.visible(),
            &[Column::Name, Column::Phone, Column::Email]
        );
    }

    #[test]
    fn test_unreadable_stored_value_falls_back() {
        let mut store = MemorySettings::new();
        store.put(COLUMNS_KEY, "not valid json").unwrap();
        let prefs = ColumnPrefs::load(&store);
        assert_eq!(prefs.visible(), DEFAULT_COLUMNS);
    }

    #[test]
    fn test_snake_case_wire_format() {
        let raw = serde_json::to_string(&vec![Column::PostalCode, Column::Leads]).unwrap();
        assert_eq!(raw, r#"["postal_code","leads"]"#);
    }
}
