//! Record query (SOQL) building
//!
//! A [`QueryRequest`] is the raw shape accepted from the caller; it becomes a
//! [`QuerySpec`] only after every field expression has been classified and
//! validated, so a spec can always be rendered without further checks.

pub mod soql;

pub use soql::{FieldExpr, MAX_RELATIONSHIP_DEPTH, QueryRequest, QuerySpec};
