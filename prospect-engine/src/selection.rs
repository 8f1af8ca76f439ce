//! Multi-select state over business ids
//!
//! Selection is a bag of ids, deliberately decoupled from the query
//! view: records selected on one page stay selected while the user
//! searches, re-sorts, or pages elsewhere. Staleness is the caller's
//! concern; the set holds whatever ids it was given.

use prospect_core::BusinessId;
use std::collections::HashSet;

/// The set of currently selected businesses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: HashSet<BusinessId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one id in or out of the selection.
    pub fn toggle(&mut self, id: &BusinessId) {
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
    }

    /// Page-level toggle: if every id on the page is already selected,
    /// deselect them all; otherwise select them all. Ids outside the
    /// page are untouched either way.
    pub fn toggle_page(&mut self, page_ids: &[BusinessId]) {
        if page_ids.is_empty() {
            return;
        }
        let all_selected = page_ids.iter().all(|id| self.selected.contains(id));
        if all_selected {
            for id in page_ids {
                self.selected.remove(id);
            }
        } else {
            for id in page_ids {
                self.selected.insert(id.clone());
            }
        }
    }

    /// Drop one id from the selection. Returns whether it was present.
    pub fn remove(&mut self, id: &BusinessId) -> bool {
        self.selected.remove(id)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, id: &BusinessId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BusinessId> {
        self.selected.iter()
    }

    /// Owned snapshot of the selected ids, in no particular order.
    pub fn ids(&self) -> Vec<BusinessId> {
        self.selected.iter().cloned().collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
