//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the
//! `{name, description, inputSchema}` objects a `tools/list` response carries.

use serde_json::{Map, Value, json};
use sfmcp_application::ports::tool_schema::ToolSchemaPort;
use sfmcp_domain::tool::entities::{ParamItems, ToolDefinition, ToolParameter};

/// Default implementation producing JSON Schema.
///
/// Handles the parameter kinds like this:
/// - primitive kinds map to the JSON Schema type of the same name
/// - enum-constrained parameters carry an `enum` list
/// - arrays carry `items`, either a primitive type or a nested object
///   schema with its own `properties` and `required`
pub struct JsonSchemaToolConverter;

impl JsonSchemaToolConverter {
    fn object_schema(params: &[ToolParameter]) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in params {
            properties.insert(param.name.clone(), Self::param_schema(param));
            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    fn param_schema(param: &ToolParameter) -> Value {
        let mut prop = Map::new();
        prop.insert("type".to_string(), json!(param.kind.as_str()));
        prop.insert("description".to_string(), json!(param.description));
        if !param.enum_values.is_empty() {
            prop.insert("enum".to_string(), json!(param.enum_values));
        }
        match &param.items {
            Some(ParamItems::Scalar(kind)) => {
                prop.insert("items".to_string(), json!({ "type": kind.as_str() }));
            }
            Some(ParamItems::Object(fields)) => {
                prop.insert("items".to_string(), Self::object_schema(fields));
            }
            None => {}
        }
        Value::Object(prop)
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        json!({
            "name": tool.name,
            "description": tool.description,
            "inputSchema": Self::object_schema(&tool.parameters),
        })
    }
}
