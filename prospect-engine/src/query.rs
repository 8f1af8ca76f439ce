//! Search, sort, and pagination over the business working set
//!
//! The view never owns records; it derives an ordering and a window
//! over whatever slice the caller hands it. Derivation order is fixed:
//! filter, then sort, then page. Sorting is optional and tri-state per
//! column (ascending, descending, off); with sorting off, records keep
//! the order the service returned them in.

use prospect_core::Business;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Business columns the view can sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Email,
    Phone,
    City,
    State,
    Country,
    Website,
}

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// An active sort: which column, which way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Search, sort, and pagination state for the business list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryView {
    search: String,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
}

impl QueryView {
    /// A fresh view: no search, no sort, first page.
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replace the search term. Always returns to page 1, because the
    /// old page number is meaningless against a new result set.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Advance the sort state for a column: off to ascending to
    /// descending to off. Clicking a different column starts that
    /// column at ascending.
    pub fn cycle_sort(&mut self, key: SortKey) {
        self.sort = match self.sort {
            Some(SortSpec {
                key: current,
                direction: SortDirection::Ascending,
            }) if current == key => Some(SortSpec {
                key,
                direction: SortDirection::Descending,
            }),
            Some(SortSpec {
                key: current,
                direction: SortDirection::Descending,
            }) if current == key => None,
            _ => Some(SortSpec {
                key,
                direction: SortDirection::Ascending,
            }),
        };
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Jump to a page. The view does not clamp against the result set;
    /// a page past the end simply yields an empty slice.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the page size, repositioning so the record at the top of
    /// the old page stays visible on the new one.
    pub fn set_page_size(&mut self, size: usize) {
        let first_index = (self.page - 1) * self.page_size;
        self.page_size = size.max(1);
        self.page = first_index / self.page_size + 1;
    }

    /// Whether a business matches the current search term.
    ///
    /// Case-insensitive substring match over name, email, and phone;
    /// missing fields are treated as empty. An empty term matches all.
    pub fn matches(&self, business: &Business) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        let fields = [
            Some(business.name.as_str()),
            business.email.as_deref(),
            business.phone.as_deref(),
        ];
        fields
            .into_iter()
            .any(|f| f.unwrap_or("").to_lowercase().contains(&term))
    }

    /// Filter and sort, producing the full derived sequence.
    pub fn apply<'a>(&self, items: &'a [Business]) -> Vec<&'a Business> {
        let mut filtered: Vec<&Business> = items.iter().filter(|b| self.matches(b)).collect();
        if let Some(spec) = self.sort {
            // sort_by is stable: equal keys keep their fetched order.
            filtered.sort_by(|a, b| compare_businesses(a, b, spec));
        }
        filtered
    }

    /// The window of the derived sequence for the current page.
    pub fn page_slice<'a>(&self, items: &'a [Business]) -> Vec<&'a Business> {
        let filtered = self.apply(items);
        let start = (self.page - 1) * self.page_size;
        if start >= filtered.len() {
            return Vec::new();
        }
        let end = (start + self.page_size).min(filtered.len());
        filtered[start..end].to_vec()
    }

    /// How many records survive the current search.
    pub fn filtered_count(&self, items: &[Business]) -> usize {
        items.iter().filter(|b| self.matches(b)).count()
    }

    /// Page count for the current search and page size. Zero when the
    /// filtered set is empty.
    pub fn total_pages(&self, items: &[Business]) -> usize {
        let count = self.filtered_count(items);
        count.div_ceil(self.page_size)
    }
}

fn compare_businesses(a: &Business, b: &Business, spec: SortSpec) -> Ordering {
    let a_value = sort_field(a, spec.key).to_lowercase();
    let b_value = sort_field(b, spec.key).to_lowercase();
    let ordering = a_value.cmp(&b_value);
    match spec.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// The sortable text of one column; absent fields sort as empty.
fn sort_field(business: &Business, key: SortKey) -> &str {
    match key {
        SortKey::Name => &business.name,
        SortKey::Email => business.email.as_deref().unwrap_or(""),
        SortKey::Phone => business.phone.as_deref().unwrap_or(""),
        SortKey::City => business.city.as_deref().unwrap_or(""),
        SortKey::State => business.state.as_deref().unwrap_or(""),
        SortKey::Country => business.country.as_deref().unwrap_or(""),
        SortKey::Website => business.website.as_deref().unwrap_or(""),
    }
}

// =============================================================================
// TESTS
// =============================================================================
