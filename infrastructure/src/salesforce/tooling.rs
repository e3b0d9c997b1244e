//! Tooling API shapes for metadata documents
//!
//! The Tooling API stores a metadata document under `Metadata` with its name
//! in a separate `FullName` column, and spells a picklist value's name
//! `valueName` rather than `fullName`. These helpers convert between that
//! shape and the documents the domain builds.

use serde_json::{Map, Value, json};
use sfmcp_domain::MetadataKind;

/// Body for `POST /tooling/sobjects/{kind}`
pub fn create_body(kind: MetadataKind, document: &Value) -> Value {
    json!({
        "FullName": full_name_of(document),
        "Metadata": to_tooling(kind, document),
    })
}

/// Body for `PATCH /tooling/sobjects/{kind}/{id}`
pub fn update_body(kind: MetadataKind, document: &Value) -> Value {
    json!({ "Metadata": to_tooling(kind, document) })
}

pub fn full_name_of(document: &Value) -> &str {
    document
        .get("fullName")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// Domain document → Tooling `Metadata`
fn to_tooling(kind: MetadataKind, document: &Value) -> Value {
    let mut metadata = document.clone();
    if let Some(map) = metadata.as_object_mut() {
        map.remove("fullName");
    }
    if kind == MetadataKind::CustomField {
        rename_picklist_names(&mut metadata, "fullName", "valueName");
    }
    metadata
}

/// Tooling `Metadata` → domain document named `full_name`
pub fn from_tooling(kind: MetadataKind, full_name: &str, metadata: Value) -> Value {
    let mut document = match metadata {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    document.insert("fullName".to_string(), Value::String(full_name.to_string()));
    let mut document = Value::Object(document);
    if kind == MetadataKind::CustomField {
        rename_picklist_names(&mut document, "valueName", "fullName");
    }
    document
}

fn rename_picklist_names(document: &mut Value, from: &str, to: &str) {
    let Some(values) = document
        .pointer_mut("/valueSet/valueSetDefinition/value")
        .and_then(Value::as_array_mut)
    else {
        return;
    };
    for value in values.iter_mut().filter_map(Value::as_object_mut) {
        if let Some(name) = value.remove(from) {
            value.insert(to.to_string(), name);
        }
    }
}

/// `Account.Tier__c` → (`Account`, `Tier`)
pub fn split_field_name(full_name: &str) -> Option<(&str, &str)> {
    let (object, field) = full_name.split_once('.')?;
    Some((object, developer_name(field)))
}

/// API name without the `__c` suffix
pub fn developer_name(api_name: &str) -> &str {
    api_name.strip_suffix("__c").unwrap_or(api_name)
}

/// Quote a value for a SOQL string literal
pub fn soql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
