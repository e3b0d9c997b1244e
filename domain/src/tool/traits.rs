//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::entities::{ParamItems, ToolCall, ToolDefinition, ToolParameter};
use super::value_objects::ToolError;
use serde_json::Value;

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ToolError>;
}

/// Default implementation of ToolValidator
///
/// Checks, in order: required parameters are present and non-null, no
/// undeclared parameters are passed, every supplied value has its declared
/// kind, enum-constrained values are members of their enum, and array
/// elements match the declared item schema.
///
/// Enum constraints on nested object fields are not enforced; those values
/// are interpreted by the builders, which ignore unknown entries.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ToolError> {
        // Check that all required parameters are present
        for param in &definition.parameters {
            let present = call.arguments.get(&param.name).is_some_and(|v| !v.is_null());
            if param.required && !present {
                return Err(ToolError::InvalidArguments(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                )));
            }
        }

        // Check that all provided arguments are valid parameters
        for (arg_name, value) in &call.arguments {
            let Some(param) = definition.parameter(arg_name) else {
                return Err(ToolError::InvalidArguments(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                )));
            };
            if value.is_null() {
                continue;
            }
            check_value(&param.name, param, value)?;
            check_enum(param, value)?;
        }

        Ok(())
    }
}

fn check_value(path: &str, param: &ToolParameter, value: &Value) -> Result<(), ToolError> {
    if !param.kind.matches(value) {
        return Err(ToolError::InvalidArguments(format!(
            "Parameter '{}' must be of type {}",
            path, param.kind
        )));
    }

    let (Some(items), Some(elements)) = (&param.items, value.as_array()) else {
        return Ok(());
    };

    for (index, element) in elements.iter().enumerate() {
        let element_path = format!("{}[{}]", path, index);
        match items {
            ParamItems::Scalar(kind) => {
                if !kind.matches(element) {
                    return Err(ToolError::InvalidArguments(format!(
                        "Parameter '{}' must be of type {}",
                        element_path, kind
                    )));
                }
            }
            ParamItems::Object(fields) => check_object(&element_path, fields, element)?,
        }
    }

    Ok(())
}

fn check_object(path: &str, fields: &[ToolParameter], value: &Value) -> Result<(), ToolError> {
    let Some(object) = value.as_object() else {
        return Err(ToolError::InvalidArguments(format!(
            "Parameter '{}' must be of type object",
            path
        )));
    };

    for field in fields {
        let field_path = format!("{}.{}", path, field.name);
        match object.get(&field.name) {
            None | Some(Value::Null) if field.required => {
                return Err(ToolError::InvalidArguments(format!(
                    "Missing required parameter '{}'",
                    field_path
                )));
            }
            None | Some(Value::Null) => {}
            Some(nested) => check_value(&field_path, field, nested)?,
        }
    }

    Ok(())
}

fn check_enum(param: &ToolParameter, value: &Value) -> Result<(), ToolError> {
    if param.enum_values.is_empty() {
        return Ok(());
    }
    let allowed = value
        .as_str()
        .is_some_and(|s| param.enum_values.iter().any(|e| e == s));
    if allowed {
        Ok(())
    } else {
        Err(ToolError::InvalidArguments(format!(
            "Parameter '{}' must be one of: {}",
            param.name,
            param.enum_values.join(", ")
        )))
    }
}
