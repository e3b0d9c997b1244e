//! SOQL builder

use crate::tool::ToolError;
use serde::{Deserialize, Serialize};

/// Deepest parent-relationship path the platform accepts
pub const MAX_RELATIONSHIP_DEPTH: usize = 5;

/// Arguments of `query_records`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub object_name: String,
    pub fields: Vec<String>,
    #[serde(default)]
    pub where_clause: Option<String>,
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub limit: Option<u64>,
}

impl QueryRequest {
    pub fn new<I, S>(object_name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            object_name: object_name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            where_clause: None,
            order_by: None,
            limit: None,
        }
    }

    pub fn with_where(mut self, clause: impl Into<String>) -> Self {
        self.where_clause = Some(clause.into());
        self
    }

    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Validate every field expression and produce a renderable spec
    pub fn into_spec(self) -> Result<QuerySpec, ToolError> {
        ToolError::require_non_blank("objectName", &self.object_name)?;
        if self.fields.is_empty() {
            return Err(ToolError::invalid_argument(
                "At least one field is required for query",
            ));
        }
        let fields = self
            .fields
            .iter()
            .map(|f| FieldExpr::parse(f))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QuerySpec {
            object_name: self.object_name,
            fields,
            where_clause: self.where_clause.filter(|s| !s.is_empty()),
            order_by: self.order_by.filter(|s| !s.is_empty()),
            limit: self.limit.filter(|n| *n > 0),
        })
    }
}

/// One entry of a SELECT list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldExpr {
    /// `Name`
    Plain(String),
    /// `Account.Owner.Name`, split into segments
    ParentPath(Vec<String>),
    /// `(SELECT Id FROM Contacts)`
    SubQuery {
        text: String,
        /// Child relationship named after `FROM`
        relationship: Option<String>,
    },
}

impl FieldExpr {
    /// Classify and validate a raw field expression
    ///
    /// Anything mentioning `SELECT` must be a whole parenthesized
    /// `(SELECT ... FROM ...)`. Dotted paths must have no empty segment and
    /// at most [`MAX_RELATIONSHIP_DEPTH`] segments.
    pub fn parse(field: &str) -> Result<Self, ToolError> {
        if field.contains("SELECT") {
            if !is_subquery_shape(field) {
                return Err(ToolError::InvalidRelationshipField(format!(
                    "Invalid subquery format: \"{}\". Child relationship queries should be wrapped in parentheses",
                    field
                )));
            }
            return Ok(FieldExpr::SubQuery {
                text: field.to_string(),
                relationship: child_relationship(field),
            });
        }

        if !field.contains('.') {
            return Ok(FieldExpr::Plain(field.to_string()));
        }

        let segments: Vec<String> = field.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ToolError::InvalidRelationshipField(format!(
                "Invalid relationship field format: \"{}\". Relationship fields should use proper dot notation (e.g., \"Account.Name\")",
                field
            )));
        }
        if segments.len() > MAX_RELATIONSHIP_DEPTH {
            return Err(ToolError::InvalidRelationshipField(format!(
                "Relationship field \"{}\" exceeds maximum depth of {} levels",
                field, MAX_RELATIONSHIP_DEPTH
            )));
        }
        Ok(FieldExpr::ParentPath(segments))
    }

    /// The expression as it appears in the SELECT list
    pub fn as_soql(&self) -> String {
        match self {
            FieldExpr::Plain(name) => name.clone(),
            FieldExpr::ParentPath(segments) => segments.join("."),
            FieldExpr::SubQuery { text, .. } => text.clone(),
        }
    }
}

impl std::fmt::Display for FieldExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_soql())
    }
}

/// `(SELECT` ... `FROM` ... `)` on a single line
fn is_subquery_shape(field: &str) -> bool {
    !field.contains('\n')
        && field
            .strip_prefix("(SELECT")
            .and_then(|rest| rest.strip_suffix(')'))
            .is_some_and(|inner| inner.contains("FROM"))
}

/// First identifier following `FROM` and at least one whitespace character
fn child_relationship(field: &str) -> Option<String> {
    field.match_indices("FROM").find_map(|(idx, token)| {
        let rest = &field[idx + token.len()..];
        let trimmed = rest.trim_start();
        if trimmed.len() == rest.len() {
            return None;
        }
        let name: String = trimmed
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        (!name.is_empty()).then_some(name)
    })
}

/// A validated record query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub object_name: String,
    pub fields: Vec<FieldExpr>,
    pub where_clause: Option<String>,
    pub order_by: Option<String>,
    pub limit: Option<u64>,
}

impl QuerySpec {
    /// `SELECT <fields> FROM <object> [WHERE ...] [ORDER BY ...] [LIMIT n]`
    pub fn to_soql(&self) -> String {
        let fields: Vec<String> = self.fields.iter().map(FieldExpr::as_soql).collect();
        let mut soql = format!("SELECT {} FROM {}", fields.join(", "), self.object_name);
        if let Some(clause) = &self.where_clause {
            soql.push_str(&format!(" WHERE {}", clause));
        }
        if let Some(order_by) = &self.order_by {
            soql.push_str(&format!(" ORDER BY {}", order_by));
        }
        if let Some(limit) = self.limit {
            soql.push_str(&format!(" LIMIT {}", limit));
        }
        soql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_query() {
        let spec = QueryRequest::new("Account", ["Id", "Name"]).into_spec().unwrap();
        assert_eq!(spec.to_soql(), "SELECT Id, Name FROM Account");
    }

    #[test]
    fn test_full_query() {
        let spec = QueryRequest::new("Contact", ["Name", "Account.Name"])
            .with_where("Account.Industry = 'Technology'")
            .with_order_by("Name ASC")
            .with_limit(10)
            .into_spec()
            .unwrap();
        assert_eq!(
            spec.to_soql(),
            "SELECT Name, Account.Name FROM Contact WHERE Account.Industry = 'Technology' ORDER BY Name ASC LIMIT 10"
        );
    }

    #[test]
    fn test_blank_object_name_rejected() {
        for name in ["", "   "] {
            let err = QueryRequest::new(name, ["Id"]).into_spec().unwrap_err();
            assert_eq!(err, ToolError::invalid_argument("objectName is required"));
        }
    }

    #[test]
    fn test_zero_limit_and_empty_clauses_are_omitted() {
        let spec = QueryRequest::new("Account", ["Id"])
            .with_where("")
            .with_limit(0)
            .into_spec()
            .unwrap();
        assert_eq!(spec.to_soql(), "SELECT Id FROM Account");
    }

    #[test]
    fn test_empty_segment_rejected() {
        for field in ["Account.", ".Name", "Account..Name"] {
            let err = FieldExpr::parse(field).unwrap_err();
            assert!(matches!(err, ToolError::InvalidRelationshipField(_)));
            assert_eq!(
                err.to_string(),
                format!(
                    "Invalid relationship field format: \"{}\". Relationship fields should use proper dot notation (e.g., \"Account.Name\")",
                    field
                )
            );
        }
    }

    #[test]
    fn test_depth_limit() {
        assert!(FieldExpr::parse("A.B.C.D.E").is_ok());
        let err = FieldExpr::parse("A.B.C.D.E.F").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Relationship field \"A.B.C.D.E.F\" exceeds maximum depth of 5 levels"
        );
    }

    #[test]
    fn test_malformed_subquery_rejected() {
        for field in [
            "SELECT Id FROM Contacts",
            "(SELECT Id FROM Contacts",
            "(SELECT Id)",
            "Id, (SELECT Id FROM Contacts)",
        ] {
            let err = FieldExpr::parse(field).unwrap_err();
            assert!(
                err.to_string().starts_with("Invalid subquery format:"),
                "{field}"
            );
        }
    }

    #[test]
    fn test_subquery_classification() {
        let expr = FieldExpr::parse("(SELECT Id, FirstName FROM Contacts)").unwrap();
        assert_eq!(
            expr,
            FieldExpr::SubQuery {
                text: "(SELECT Id, FirstName FROM Contacts)".to_string(),
                relationship: Some("Contacts".to_string()),
            }
        );
    }

    #[test]
    fn test_subquery_with_dotted_inner_fields_is_accepted() {
        let expr = FieldExpr::parse("(SELECT Id, Owner.Name FROM Opportunities WHERE Amount > 1)").unwrap();
        assert!(matches!(
            expr,
            FieldExpr::SubQuery { relationship: Some(ref r), .. } if r == "Opportunities"
        ));
    }

    #[test]
    fn test_child_relationship_requires_whitespace() {
        assert_eq!(child_relationship("(SELECT Id FROMContacts)"), None);
        assert_eq!(
            child_relationship("(SELECT Id FROM  Cases__r)"),
            Some("Cases__r".to_string())
        );
    }

    #[test]
    fn test_parent_path_segments() {
        let expr = FieldExpr::parse("Account.Owner.Name").unwrap();
        assert_eq!(
            expr,
            FieldExpr::ParentPath(vec!["Account".into(), "Owner".into(), "Name".into()])
        );
        assert_eq!(expr.to_string(), "Account.Owner.Name");
    }

    #[test]
    fn test_empty_field_list_rejected() {
        let err = QueryRequest::new("Account", Vec::<String>::new())
            .into_spec()
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: QueryRequest = serde_json::from_value(serde_json::json!({
            "objectName": "Account",
            "fields": ["Id"],
            "whereClause": "Name != null",
            "orderBy": "Name",
            "limit": 3
        }))
        .unwrap();
        assert_eq!(
            request.into_spec().unwrap().to_soql(),
            "SELECT Id FROM Account WHERE Name != null ORDER BY Name LIMIT 3"
        );
    }
}
