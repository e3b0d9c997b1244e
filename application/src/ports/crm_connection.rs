//! CRM connection port
//!
//! Defines the capability through which every tool handler reaches the
//! remote org. Handlers depend on this trait only; the REST adapter lives in
//! the infrastructure layer and tests substitute in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;
use sfmcp_domain::{
    DescribeGlobalResult, DescribeResult, DmlResult, MetadataKind, QueryResult, Record,
    SaveResult, SearchResult,
};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a connection or its factory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// The org rejected the request; `code` is the remote error class
    #[error("{code}: {message}")]
    Api { code: String, message: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConnectionError {
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Operations the tool handlers need from the org
///
/// Bulk mutations return one [`DmlResult`] per submitted record, in
/// submission order.
#[async_trait]
pub trait CrmConnection: Send + Sync {
    /// Full schema of one object
    async fn describe(&self, object_name: &str) -> Result<DescribeResult, ConnectionError>;

    /// Every object visible to the connected user
    async fn describe_global(&self) -> Result<DescribeGlobalResult, ConnectionError>;

    async fn query(&self, soql: &str) -> Result<QueryResult, ConnectionError>;

    async fn search(&self, sosl: &str) -> Result<SearchResult, ConnectionError>;

    async fn create(
        &self,
        object_name: &str,
        records: &[Record],
    ) -> Result<Vec<DmlResult>, ConnectionError>;

    async fn update(
        &self,
        object_name: &str,
        records: &[Record],
    ) -> Result<Vec<DmlResult>, ConnectionError>;

    async fn destroy(
        &self,
        object_name: &str,
        ids: &[String],
    ) -> Result<Vec<DmlResult>, ConnectionError>;

    async fn upsert(
        &self,
        object_name: &str,
        records: &[Record],
        external_id_field: &str,
    ) -> Result<Vec<DmlResult>, ConnectionError>;

    async fn metadata_create(
        &self,
        kind: MetadataKind,
        document: &Value,
    ) -> Result<SaveResult, ConnectionError>;

    /// Existing document, or `None` when nothing has that full name
    async fn metadata_read(
        &self,
        kind: MetadataKind,
        full_name: &str,
    ) -> Result<Option<Value>, ConnectionError>;

    async fn metadata_update(
        &self,
        kind: MetadataKind,
        document: &Value,
    ) -> Result<SaveResult, ConnectionError>;
}

/// Produces a connection for a single tool call
///
/// The dispatcher asks for a connection only after a call's arguments have
/// been validated.
#[async_trait]
pub trait ConnectionFactory: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn CrmConnection>, ConnectionError>;
}
