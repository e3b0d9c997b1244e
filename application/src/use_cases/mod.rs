//! Use cases
//!
//! One module per tool, each exposing its `NAME`, `ALIAS`, `definition()`
//! and an `execute` handler that talks to the org through
//! [`CrmConnection`](crate::ports::crm_connection::CrmConnection).
//! [`dispatch::ToolDispatcher`] ties them together.

pub mod args;
pub mod catalog;
pub mod describe_object;
pub mod dispatch;
pub mod dml_records;
pub mod manage_field;
pub mod manage_object;
pub mod query_records;
pub mod search_all;
pub mod search_objects;

#[cfg(test)]
pub(crate) mod testing;
