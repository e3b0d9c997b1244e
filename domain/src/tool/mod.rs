//! Tool domain module
//!
//! This module defines the core abstractions of the **Tool System**: how a
//! protocol client reaches the Salesforce org through a fixed, schema-described
//! set of operations.
//!
//! # Overview
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (catalog)    │    │ (invocation) │    │ (envelope)   │
//! └──────┬───────┘    └──────────────┘    └──────────────┘
//!        │
//!        ├─ aliases: "query_records" → "salesforce_query_records"
//!        └─ tools:   "salesforce_query_records" → ToolDefinition
//! ```
//!
//! # Tool Name Alias System
//!
//! Canonical names carry the `salesforce_` prefix. Clients that were written
//! against the short names (`query_records`, `search_all`, ...) are served
//! through the alias table in [`ToolSpec`]:
//!
//! - [`ToolSpec::resolve_alias`]: resolves alias → canonical name (aliases only)
//! - [`ToolSpec::resolve`]: resolves any name (canonical or alias)
//! - [`ToolSpec::get_resolved`]: looks up a [`ToolDefinition`] by canonical or alias name
//!
//! # Risk Levels
//!
//! | Risk | Tools | Read-only mode |
//! |------|-------|----------------|
//! | **Low** | `search_objects`, `describe_object`, `query_records`, `search_all` | exposed |
//! | **High** | `dml_records`, `manage_object`, `manage_field` | hidden |
//!
//! # Key Types
//!
//! - [`ToolSpec`]: Ordered catalog of tools + alias mappings
//! - [`ToolDefinition`]: Schema for a single tool (name, params, risk level)
//! - [`ToolCall`]: An invocation request with its raw argument bag
//! - [`ToolResult`]: The `{content, isError}` envelope
//! - [`ToolValidator`]: Pure argument validation against a definition

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult};
