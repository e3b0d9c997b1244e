//! Tool domain value objects: immutable result and error types
//!
//! These types form the **output side** of the Tool System pipeline.
//! Every tool invocation produces exactly one [`ToolResult`] envelope,
//! whether the handler succeeded or failed.
//!
//! [`ToolError`] is the failure taxonomy shared by the validator, the
//! builders and the handlers. Partial bulk failures are not errors; they are
//! reported inline by the DML formatter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a tool invocation.
///
/// | Variant | Code | Raised by |
/// |---------|------|-----------|
/// | `UnknownTool` | `UNKNOWN_TOOL` | catalog lookup |
/// | `InvalidArguments` | `INVALID_ARGUMENT` | validator, argument coercion, builders |
/// | `InvalidRelationshipField` | `INVALID_RELATIONSHIP_FIELD` | SOQL builder |
/// | `EmptySearchTerm` | `EMPTY_SEARCH_TERM` | SOSL builder |
/// | `NotFound` | `NOT_FOUND` | metadata update (baseline absent) |
/// | `Upstream` | `UPSTREAM_FAILURE` | remote call rejected or falsy success flag |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("{0}")]
    InvalidArguments(String),

    #[error("{0}")]
    InvalidRelationshipField(String),

    #[error("Search term cannot be empty")]
    EmptySearchTerm,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),
}

impl ToolError {
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::UnknownTool(_) => "UNKNOWN_TOOL",
            ToolError::InvalidArguments(_) => "INVALID_ARGUMENT",
            ToolError::InvalidRelationshipField(_) => "INVALID_RELATIONSHIP_FIELD",
            ToolError::EmptySearchTerm => "EMPTY_SEARCH_TERM",
            ToolError::NotFound(_) => "NOT_FOUND",
            ToolError::Upstream(_) => "UPSTREAM_FAILURE",
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    /// Reject a required string argument that is empty or only whitespace
    pub fn require_non_blank(key: &str, value: &str) -> Result<(), Self> {
        if value.trim().is_empty() {
            return Err(Self::invalid_argument(format!("{} is required", key)));
        }
        Ok(())
    }
}

/// One block of envelope content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(&self) -> &str {
        match self {
            ContentBlock::Text { text } => text,
        }
    }
}

/// The `{content, isError}` envelope returned for every tool call.
///
/// Serialized exactly as the protocol's `tools/call` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ContentBlock>,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Create a failed result
    ///
    /// Unknown tools carry their own message; every other failure is
    /// prefixed with `Error: `.
    pub fn failure(error: &ToolError) -> Self {
        let text = match error {
            ToolError::UnknownTool(_) => error.to_string(),
            other => format!("Error: {}", other),
        };
        Self {
            content: vec![ContentBlock::Text { text }],
            is_error: true,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.is_error
    }

    /// All text blocks joined with newlines
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(ContentBlock::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Result<String, ToolError>> for ToolResult {
    fn from(result: Result<String, ToolError>) -> Self {
        match result {
            Ok(text) => ToolResult::success(text),
            Err(e) => ToolResult::failure(&e),
        }
    }
}
