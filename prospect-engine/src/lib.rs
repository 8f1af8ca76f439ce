//! Prospect Engine - Role-Scoped Lead Aggregation
//!
//! The engine behind the business list: fetches the records a caller's
//! role entitles them to see, joins contacts under their businesses,
//! and layers search, sort, pagination, selection, and column
//! preferences on top. Mutations go to the service first and the
//! in-memory working set is reconciled from the outcome, so the cache
//! never claims something the server has not confirmed.
//!
//! [`LeadEngine`] in [`state`] ties the pieces together; the other
//! modules are usable on their own.

pub mod columns;
pub mod config;
pub mod error;
pub mod join;
pub mod mutation;
pub mod query;
pub mod scope;
pub mod selection;
pub mod settings;
pub mod state;

pub use columns::{Column, ColumnPrefs, COLUMNS_KEY, DEFAULT_COLUMNS, REQUIRED_COLUMNS};
pub use config::{AuthConfig, ConfigError, EngineConfig};
pub use error::{EngineError, EngineResult};
pub use join::build_contact_index;
pub use mutation::{delete_businesses, BulkDeleteReport, BulkFailure};
pub use query::{QueryView, SortDirection, SortKey, SortSpec};
pub use scope::{scoped_fetch, ScopedData};
pub use selection::SelectionSet;
pub use settings::{FileSettings, MemorySettings, SettingsError, SettingsStore};
pub use state::{LeadEngine, RefreshTicket};
