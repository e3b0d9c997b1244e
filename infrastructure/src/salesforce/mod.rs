//! Salesforce adapter
//!
//! [`SalesforceConnector`] logs in (OAuth2 or SOAP, see [`auth`]) and hands
//! out a [`RestConnection`] that implements the application's
//! `CrmConnection` port over the REST and Tooling APIs.

pub mod auth;
pub mod connection;
pub mod connector;
pub mod error;
pub mod tooling;

pub use auth::Session;
pub use connection::{BATCH_SIZE, RestConnection};
pub use connector::SalesforceConnector;
