//! Tool catalog rendering for the protocol surface

mod schema;

pub use schema::JsonSchemaToolConverter;
