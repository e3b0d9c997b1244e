//! Multi-object search (SOSL) building
//!
//! [`SearchRequest`] is the caller's shape for `search_all`; converting it
//! into a [`SearchSpec`] rejects blank terms and renders the modifier
//! clauses, after which [`SearchSpec::to_sosl`] cannot fail.

pub mod sosl;

pub use sosl::{SearchIn, SearchObject, SearchRequest, SearchSpec, WithClause, WithClauseKind};
