//! The tool catalog
//!
//! Tools are listed in a fixed order. Every canonical `salesforce_*` name
//! also answers to its bare alias (`query_records` → `salesforce_query_records`).

use super::{
    describe_object, dml_records, manage_field, manage_object, query_records, search_all,
    search_objects,
};
use sfmcp_domain::ToolSpec;

/// `(alias, canonical)` pairs
const ALIASES: [(&str, &str); 7] = [
    (search_objects::ALIAS, search_objects::NAME),
    (describe_object::ALIAS, describe_object::NAME),
    (query_records::ALIAS, query_records::NAME),
    (dml_records::ALIAS, dml_records::NAME),
    (manage_object::ALIAS, manage_object::NAME),
    (manage_field::ALIAS, manage_field::NAME),
    (search_all::ALIAS, search_all::NAME),
];

/// All seven tools with their aliases
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(search_objects::definition())
        .register(describe_object::definition())
        .register(query_records::definition())
        .register(dml_records::definition())
        .register(manage_object::definition())
        .register(manage_field::definition())
        .register(search_all::definition())
        .register_aliases(ALIASES)
}

/// Only the tools that never change the org
pub fn read_only_tool_spec() -> ToolSpec {
    default_tool_spec().read_only()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let spec = default_tool_spec();
        let names: Vec<&str> = spec.names().collect();
        assert_eq!(
            names,
            vec![
                "salesforce_search_objects",
                "salesforce_describe_object",
                "salesforce_query_records",
                "salesforce_dml_records",
                "salesforce_manage_object",
                "salesforce_manage_field",
                "salesforce_search_all",
            ]
        );
    }

    #[test]
    fn test_aliases_resolve() {
        let spec = default_tool_spec();
        for (alias, canonical) in ALIASES {
            assert_eq!(spec.resolve(alias), Some(canonical));
            assert_eq!(spec.resolve(canonical), Some(canonical));
        }
        assert_eq!(spec.resolve("drop_org"), None);
    }

    #[test]
    fn test_risk_levels() {
        let spec = default_tool_spec();
        let high: Vec<&str> = spec.high_risk_tools().map(|t| t.name.as_str()).collect();
        assert_eq!(
            high,
            vec![
                "salesforce_dml_records",
                "salesforce_manage_object",
                "salesforce_manage_field",
            ]
        );
    }

    #[test]
    fn test_read_only_catalog() {
        let spec = read_only_tool_spec();
        assert_eq!(spec.len(), 4);
        assert!(spec.get_resolved("dml_records").is_none());
        assert!(spec.get_resolved("search_all").is_some());
    }

    #[test]
    fn test_enum_values_come_from_domain() {
        let spec = default_tool_spec();
        let dml = spec.get("salesforce_dml_records").unwrap();
        assert_eq!(
            dml.parameter("operation").unwrap().enum_values,
            vec!["insert", "update", "delete", "upsert"]
        );
        let field = spec.get("salesforce_manage_field").unwrap();
        assert_eq!(field.parameter("type").unwrap().enum_values.len(), 17);
    }
}
