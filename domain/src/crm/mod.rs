//! Remote CRM result shapes
//!
//! Typed views of what the connection capability returns: global and
//! per-object describes, query and search results, per-record mutation
//! outcomes and metadata save results.

pub mod entities;

pub use entities::*;
