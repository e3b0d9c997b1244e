//! Tool domain entities

use super::value_objects::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Risk level of a tool operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low risk - read-only operations (e.g., query_records, describe_object)
    Low,
    /// High risk - operations that modify records or schema (e.g., dml_records)
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::High => "high",
        }
    }

    /// Whether tools of this level change state in the remote org
    pub fn is_mutating(&self) -> bool {
        matches!(self, RiskLevel::High)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Primitive kind of a tool parameter, as declared in the input schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParamKind {
    pub fn as_str(&self) -> &str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
            ParamKind::Array => "array",
            ParamKind::Object => "object",
        }
    }

    /// Whether a JSON value has this kind
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Number => value.is_number(),
            ParamKind::Boolean => value.is_boolean(),
            ParamKind::Array => value.is_array(),
            ParamKind::Object => value.is_object(),
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Element schema of an array parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamItems {
    /// Array of a primitive kind (e.g. `fields: string[]`)
    Scalar(ParamKind),
    /// Array of objects with their own field schema (e.g. `objects[{name, fields}]`)
    Object(Vec<ToolParameter>),
}

/// Definition of a tool exposed to the protocol client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "salesforce_query_records")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Risk level of this tool
    pub risk_level: RiskLevel,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Declared primitive kind
    pub kind: ParamKind,
    /// Allowed values, empty when unconstrained
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    /// Element schema for array parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ParamItems>,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            risk_level,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn is_high_risk(&self) -> bool {
        self.risk_level.is_mutating()
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            kind: ParamKind::String,
            enum_values: Vec::new(),
            items: None,
        }
    }

    pub fn with_kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Array of a primitive kind
    pub fn with_items(mut self, kind: ParamKind) -> Self {
        self.kind = ParamKind::Array;
        self.items = Some(ParamItems::Scalar(kind));
        self
    }

    /// Array of objects described by `fields`
    pub fn with_object_items(mut self, fields: Vec<ToolParameter>) -> Self {
        self.kind = ParamKind::Array;
        self.items = Some(ParamItems::Object(fields));
        self
    }
}

/// Ordered catalog of available tools
///
/// Catalog order is registration order; `tools/list` reports tools in the
/// order they were registered.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: Vec<ToolDefinition>,
    /// Alias → canonical name mapping (e.g. "query_records" → "salesforce_query_records")
    aliases: HashMap<String, String>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            aliases: HashMap::new(),
        }
    }

    /// Register a tool, replacing any previous tool with the same name
    pub fn register(mut self, tool: ToolDefinition) -> Self {
        match self.tools.iter_mut().find(|t| t.name == tool.name) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
        self
    }

    /// Register a single alias mapping (builder pattern)
    pub fn register_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), canonical.into());
        self
    }

    /// Register multiple aliases at once (builder pattern)
    pub fn register_aliases(
        mut self,
        mappings: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        for (alias, canonical) in mappings {
            self.aliases.insert(alias.into(), canonical.into());
        }
        self
    }

    /// Resolve an alias to its canonical name (aliases only, not canonical names)
    pub fn resolve_alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(|s| s.as_str())
    }

    /// Resolve a name: returns canonical name if it's a registered tool,
    /// or resolves alias, or None if unknown
    pub fn resolve<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.get(name).is_some() {
            Some(name)
        } else {
            self.resolve_alias(name)
                .filter(|canonical| self.get(canonical).is_some())
        }
    }

    /// Get tool definition by canonical name or alias
    pub fn get_resolved(&self, name: &str) -> Option<&ToolDefinition> {
        self.resolve(name).and_then(|canonical| self.get(canonical))
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn high_risk_tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter().filter(|t| t.is_high_risk())
    }

    pub fn low_risk_tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter().filter(|t| !t.is_high_risk())
    }

    /// Catalog restricted to low-risk tools
    ///
    /// Aliases pointing at a dropped tool are dropped with it.
    pub fn read_only(&self) -> Self {
        let tools: Vec<ToolDefinition> = self.low_risk_tools().cloned().collect();
        let aliases = self
            .aliases
            .iter()
            .filter(|(_, canonical)| tools.iter().any(|t| &t.name == *canonical))
            .map(|(alias, canonical)| (alias.clone(), canonical.clone()))
            .collect();
        Self { tools, aliases }
    }

    /// Catalog without alias mappings
    pub fn without_aliases(mut self) -> Self {
        self.aliases.clear();
        self
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call, canonical or alias
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
        }
    }

    /// Build a call from the raw argument bag of a protocol request
    ///
    /// The bag must be a JSON object; absent or non-object arguments are
    /// rejected before any tool lookup happens.
    pub fn from_arguments(tool_name: impl Into<String>, arguments: Option<Value>) -> Result<Self, ToolError> {
        match arguments {
            Some(Value::Object(map)) => Ok(Self {
                tool_name: tool_name.into(),
                arguments: map.into_iter().collect(),
            }),
            _ => Err(ToolError::InvalidArguments("Arguments are required".to_string())),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// The argument bag as a JSON object, for typed deserialization
    pub fn arguments_value(&self) -> Value {
        Value::Object(
            self.arguments
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}
