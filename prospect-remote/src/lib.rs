//! Prospect Remote - CRM Service Client
//!
//! The [`CrmApi`] trait is the engine's only door to the network. The
//! HTTP implementation binds the service's REST endpoints; the mock
//! keeps everything in memory for tests and offline development.

pub mod api;
pub mod error;
pub mod http;
pub mod mock;
pub mod types;

pub use api::CrmApi;
pub use error::{RemoteError, RemoteResult};
pub use http::{CrmCredentials, HttpCrmApi};
pub use mock::MockCrmApi;
pub use types::{
    CreateBusinessRequest, CreateContactRequest, ErrorBody, UpdateBusinessRequest,
    UpdateContactRequest,
};
