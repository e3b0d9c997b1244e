//! SOSL builder

use crate::tool::ToolError;
use serde::{Deserialize, Serialize};

/// Field group a search term is matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchIn {
    #[default]
    #[serde(rename = "ALL FIELDS")]
    AllFields,
    #[serde(rename = "NAME FIELDS")]
    NameFields,
    #[serde(rename = "EMAIL FIELDS")]
    EmailFields,
    #[serde(rename = "PHONE FIELDS")]
    PhoneFields,
    #[serde(rename = "SIDEBAR FIELDS")]
    SidebarFields,
}

impl SearchIn {
    pub const ALL: [SearchIn; 5] = [
        SearchIn::AllFields,
        SearchIn::NameFields,
        SearchIn::EmailFields,
        SearchIn::PhoneFields,
        SearchIn::SidebarFields,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchIn::AllFields => "ALL FIELDS",
            SearchIn::NameFields => "NAME FIELDS",
            SearchIn::EmailFields => "EMAIL FIELDS",
            SearchIn::PhoneFields => "PHONE FIELDS",
            SearchIn::SidebarFields => "SIDEBAR FIELDS",
        }
    }
}

/// One object in the RETURNING clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchObject {
    pub name: String,
    pub fields: Vec<String>,
    #[serde(default, rename = "where")]
    pub filter: Option<String>,
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub limit: Option<u64>,
}

impl SearchObject {
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            filter: None,
            order_by: None,
            limit: None,
        }
    }

    /// `Name(f1,f2[ WHERE ..][ ORDER BY ..][ LIMIT n])`
    fn returning_clause(&self) -> String {
        let mut modifiers = String::new();
        if let Some(filter) = self.filter.as_deref().filter(|s| !s.is_empty()) {
            modifiers.push_str(&format!(" WHERE {}", filter));
        }
        if let Some(order_by) = self.order_by.as_deref().filter(|s| !s.is_empty()) {
            modifiers.push_str(&format!(" ORDER BY {}", order_by));
        }
        if let Some(limit) = self.limit.filter(|n| *n > 0) {
            modifiers.push_str(&format!(" LIMIT {}", limit));
        }
        if self.fields.is_empty() && modifiers.is_empty() {
            return self.name.clone();
        }
        format!("{}({}{})", self.name, self.fields.join(","), modifiers)
    }
}

/// Type of a WITH modifier clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WithClauseKind {
    DataCategory,
    Division,
    Metadata,
    Network,
    PricebookId,
    Snippet,
    SecurityEnforced,
    /// Unrecognized type, rendered as nothing
    Other(String),
}

impl WithClauseKind {
    pub const KNOWN: [&'static str; 7] = [
        "DATA CATEGORY",
        "DIVISION",
        "METADATA",
        "NETWORK",
        "PRICEBOOKID",
        "SNIPPET",
        "SECURITY_ENFORCED",
    ];

    pub fn as_str(&self) -> &str {
        match self {
            WithClauseKind::DataCategory => "DATA CATEGORY",
            WithClauseKind::Division => "DIVISION",
            WithClauseKind::Metadata => "METADATA",
            WithClauseKind::Network => "NETWORK",
            WithClauseKind::PricebookId => "PRICEBOOKID",
            WithClauseKind::Snippet => "SNIPPET",
            WithClauseKind::SecurityEnforced => "SECURITY_ENFORCED",
            WithClauseKind::Other(raw) => raw,
        }
    }
}

impl From<String> for WithClauseKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DATA CATEGORY" => WithClauseKind::DataCategory,
            "DIVISION" => WithClauseKind::Division,
            "METADATA" => WithClauseKind::Metadata,
            "NETWORK" => WithClauseKind::Network,
            "PRICEBOOKID" => WithClauseKind::PricebookId,
            "SNIPPET" => WithClauseKind::Snippet,
            "SECURITY_ENFORCED" => WithClauseKind::SecurityEnforced,
            _ => WithClauseKind::Other(raw),
        }
    }
}

impl From<WithClauseKind> for String {
    fn from(kind: WithClauseKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A WITH modifier: type plus value or field list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithClause {
    #[serde(rename = "type")]
    pub kind: WithClauseKind,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

impl WithClause {
    pub fn new(kind: WithClauseKind) -> Self {
        Self {
            kind,
            value: None,
            fields: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Render the clause; `None` for unrecognized types. A value-taking
    /// clause without a value is `InvalidArguments`, never rendered bare.
    pub fn render(&self) -> Result<Option<String>, ToolError> {
        let kind = self.kind.as_str();
        let rendered = match &self.kind {
            WithClauseKind::Snippet => match self.fields.as_deref() {
                Some(fields) if !fields.is_empty() => {
                    format!("WITH SNIPPET ({})", fields.join(", "))
                }
                _ => "WITH SNIPPET".to_string(),
            },
            WithClauseKind::DataCategory
            | WithClauseKind::Division
            | WithClauseKind::Network
            | WithClauseKind::PricebookId => {
                let value = self
                    .value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| {
                        ToolError::invalid_argument(format!("WITH {} clause requires a value", kind))
                    })?;
                format!("WITH {} = {}", kind, value)
            }
            WithClauseKind::Metadata | WithClauseKind::SecurityEnforced => format!("WITH {}", kind),
            WithClauseKind::Other(_) => return Ok(None),
        };
        Ok(Some(rendered))
    }
}

/// Arguments of `search_all`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_term: String,
    #[serde(default)]
    pub search_in: SearchIn,
    pub objects: Vec<SearchObject>,
    #[serde(default)]
    pub with_clauses: Vec<WithClause>,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub viewable: bool,
}

impl SearchRequest {
    pub fn new(search_term: impl Into<String>, objects: Vec<SearchObject>) -> Self {
        Self {
            search_term: search_term.into(),
            search_in: SearchIn::default(),
            objects,
            with_clauses: Vec::new(),
            updateable: false,
            viewable: false,
        }
    }

    pub fn with_clause(mut self, clause: WithClause) -> Self {
        self.with_clauses.push(clause);
        self
    }

    pub fn into_spec(self) -> Result<SearchSpec, ToolError> {
        if self.search_term.trim().is_empty() {
            return Err(ToolError::EmptySearchTerm);
        }
        if self.objects.is_empty() {
            return Err(ToolError::invalid_argument(
                "At least one object is required for search",
            ));
        }
        for object in &self.objects {
            ToolError::require_non_blank("Object name", &object.name)?;
        }

        let mut with_parts = Vec::new();
        for clause in &self.with_clauses {
            if let Some(rendered) = clause.render()? {
                with_parts.push(rendered);
            }
        }

        let wants = |kind: WithClauseKind| self.with_clauses.iter().any(|c| c.kind == kind);
        let include_metadata = wants(WithClauseKind::Metadata);
        let include_snippets = wants(WithClauseKind::Snippet);

        Ok(SearchSpec {
            search_term: self.search_term,
            search_in: self.search_in,
            objects: self.objects,
            with_parts,
            include_metadata,
            include_snippets,
            updateable: self.updateable,
            viewable: self.viewable,
        })
    }
}

/// A validated multi-object search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    pub search_term: String,
    pub search_in: SearchIn,
    pub objects: Vec<SearchObject>,
    /// Rendered WITH clauses, in request order
    pub with_parts: Vec<String>,
    pub include_metadata: bool,
    pub include_snippets: bool,
    pub updateable: bool,
    pub viewable: bool,
}

impl SearchSpec {
    /// `FIND {term} IN <group> [WITH ...] RETURNING <objects> [RETURNING <flags>]`
    pub fn to_sosl(&self) -> String {
        let mut sosl = format!("FIND {{{}}} IN {}", self.search_term, self.search_in.as_str());
        if !self.with_parts.is_empty() {
            sosl.push(' ');
            sosl.push_str(&self.with_parts.join(" "));
        }

        let returning: Vec<String> = self.objects.iter().map(SearchObject::returning_clause).collect();
        sosl.push_str(&format!(" RETURNING {}", returning.join(", ")));

        let mut access = Vec::new();
        if self.updateable {
            access.push("UPDATEABLE");
        }
        if self.viewable {
            access.push("VIEWABLE");
        }
        if !access.is_empty() {
            sosl.push_str(&format!(" RETURNING {}", access.join(",")));
        }
        sosl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contacts() -> SearchObject {
        SearchObject::new("Contact", ["FirstName", "LastName"])
    }

    #[test]
    fn test_basic_search() {
        let spec = SearchRequest::new("John", vec![contacts()]).into_spec().unwrap();
        assert_eq!(
            spec.to_sosl(),
            "FIND {John} IN ALL FIELDS RETURNING Contact(FirstName,LastName)"
        );
    }

    #[test]
    fn test_blank_term_rejected() {
        for term in ["", "   ", "\t\n"] {
            let err = SearchRequest::new(term, vec![contacts()]).into_spec().unwrap_err();
            assert_eq!(err, ToolError::EmptySearchTerm);
        }
    }

    #[test]
    fn test_no_objects_rejected() {
        let err = SearchRequest::new("John", vec![]).into_spec().unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_blank_object_name_rejected() {
        let err = SearchRequest::new("John", vec![contacts(), SearchObject::new(" ", ["Name"])])
            .into_spec()
            .unwrap_err();
        assert_eq!(err, ToolError::invalid_argument("Object name is required"));
    }

    #[test]
    fn test_per_object_modifiers() {
        let mut account = SearchObject::new("Account", ["Name", "Industry"]);
        account.filter = Some("Industry = 'Technology'".into());
        account.order_by = Some("Name DESC".into());
        account.limit = Some(5);

        let spec = SearchRequest::new("Cloud*", vec![account, contacts()])
            .into_spec()
            .unwrap();
        assert_eq!(
            spec.to_sosl(),
            "FIND {Cloud*} IN ALL FIELDS RETURNING Account(Name,Industry WHERE Industry = 'Technology' ORDER BY Name DESC LIMIT 5), Contact(FirstName,LastName)"
        );
    }

    #[test]
    fn test_with_clauses_and_access_flags() {
        let mut request = SearchRequest::new("Acme", vec![contacts()])
            .with_clause(WithClause::new(WithClauseKind::Network).with_value("ALL NETWORKS"))
            .with_clause(WithClause::new(WithClauseKind::Snippet).with_fields(["Description", "Title"]))
            .with_clause(WithClause::new(WithClauseKind::Metadata));
        request.search_in = SearchIn::NameFields;
        request.updateable = true;
        request.viewable = true;

        let spec = request.into_spec().unwrap();
        assert!(spec.include_metadata);
        assert!(spec.include_snippets);
        assert_eq!(
            spec.to_sosl(),
            "FIND {Acme} IN NAME FIELDS WITH NETWORK = ALL NETWORKS WITH SNIPPET (Description, Title) WITH METADATA RETURNING Contact(FirstName,LastName) RETURNING UPDATEABLE,VIEWABLE"
        );
    }

    #[test]
    fn test_unknown_with_clause_is_ignored() {
        let request: SearchRequest = serde_json::from_value(json!({
            "searchTerm": "Acme",
            "objects": [{"name": "Account", "fields": ["Name"]}],
            "withClauses": [{"type": "HIGHLIGHT"}, {"type": "SECURITY_ENFORCED"}]
        }))
        .unwrap();
        assert_eq!(
            request.with_clauses[0].kind,
            WithClauseKind::Other("HIGHLIGHT".into())
        );
        assert_eq!(
            request.into_spec().unwrap().to_sosl(),
            "FIND {Acme} IN ALL FIELDS WITH SECURITY_ENFORCED RETURNING Account(Name)"
        );
    }

    #[test]
    fn test_value_clause_without_value_rejected() {
        let err = WithClause::new(WithClauseKind::Division).render().unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert_eq!(err.to_string(), "WITH DIVISION clause requires a value");
    }

    #[test]
    fn test_snippet_without_fields_renders_bare() {
        let rendered = WithClause::new(WithClauseKind::Snippet).render().unwrap();
        assert_eq!(rendered.as_deref(), Some("WITH SNIPPET"));
    }

    #[test]
    fn test_object_without_fields_renders_name_only() {
        let spec = SearchRequest::new("x", vec![SearchObject::new("Lead", Vec::<String>::new())])
            .into_spec()
            .unwrap();
        assert_eq!(spec.to_sosl(), "FIND {x} IN ALL FIELDS RETURNING Lead");
    }

    #[test]
    fn test_search_in_deserialization() {
        let parsed: SearchIn = serde_json::from_value(json!("PHONE FIELDS")).unwrap();
        assert_eq!(parsed, SearchIn::PhoneFields);
        assert!(serde_json::from_value::<SearchIn>(json!("ANY FIELDS")).is_err());
    }
}
