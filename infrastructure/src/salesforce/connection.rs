//! REST adapter implementing [`CrmConnection`]
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | describe | `GET /sobjects/{object}/describe` |
//! | describe_global | `GET /sobjects` |
//! | query | `GET /query?q=` |
//! | search | `GET /search?q=` |
//! | create / update | `POST` / `PATCH /composite/sobjects` |
//! | destroy | `DELETE /composite/sobjects?ids=` |
//! | upsert | `PATCH /composite/sobjects/{object}/{externalIdField}` |
//! | metadata | Tooling API `/tooling/sobjects/{CustomObject,CustomField}` |
//!
//! Collection calls accept at most [`BATCH_SIZE`] records, so larger
//! requests are split and the per-record results concatenated in order.

use super::auth::Session;
use super::error::{api_error, decode, record_errors, transport};
use super::tooling;
use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use sfmcp_application::{ConnectionError, CrmConnection};
use sfmcp_domain::{
    DescribeGlobalResult, DescribeResult, DmlResult, MetadataKind, QueryResult, Record,
    RecordError, SaveResult, SearchResult,
};
use tracing::{debug, trace};

/// Largest record count one sObject Collections request accepts
pub const BATCH_SIZE: usize = 200;

pub struct RestConnection {
    http: reqwest::Client,
    session: Session,
    api_version: String,
}

impl RestConnection {
    pub fn new(http: reqwest::Client, session: Session, api_version: impl Into<String>) -> Self {
        Self {
            http,
            session,
            api_version: api_version.into(),
        }
    }

    fn data_url(&self, path: &str) -> String {
        format!(
            "{}/services/data/v{}{}",
            self.session.instance_url.trim_end_matches('/'),
            self.api_version,
            path
        )
    }

    fn tooling_url(&self, path: &str) -> String {
        self.data_url(&format!("/tooling{}", path))
    }

    /// Send with the session token; status and raw body
    async fn fetch(&self, request: RequestBuilder) -> Result<(StatusCode, String), ConnectionError> {
        let response = request
            .bearer_auth(&self.session.access_token)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        trace!(status = status.as_u16(), bytes = body.len(), "Response received");
        Ok((status, body))
    }

    /// Send and parse a JSON body; an empty body (204) is `Null`
    async fn send(&self, request: RequestBuilder) -> Result<Value, ConnectionError> {
        let (status, body) = self.fetch(request).await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| decode("response body", e))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, ConnectionError> {
        let value = self.send(self.http.get(&url).query(query)).await?;
        serde_json::from_value(value).map_err(|e| decode(&url, e))
    }

    /// Run one sObject Collections request per batch, results in record order
    async fn collection(
        &self,
        method: Method,
        url: String,
        object_name: &str,
        records: &[Record],
    ) -> Result<Vec<DmlResult>, ConnectionError> {
        let batches = records.chunks(BATCH_SIZE).map(|chunk| {
            let body = json!({
                "allOrNone": false,
                "records": typed_records(object_name, chunk),
            });
            self.dml_results(self.http.request(method.clone(), &url).json(&body))
        });
        let results = try_join_all(batches).await?;
        Ok(results.into_iter().flatten().collect())
    }

    async fn dml_results(&self, request: RequestBuilder) -> Result<Vec<DmlResult>, ConnectionError> {
        let value = self.send(request).await?;
        serde_json::from_value(value).map_err(|e| decode("save results", e))
    }

    /// Metadata writes report rejected documents as a failed [`SaveResult`]
    async fn save(&self, request: RequestBuilder, full_name: &str) -> Result<SaveResult, ConnectionError> {
        let (status, body) = self.fetch(request).await?;
        if status.is_success() {
            return Ok(SaveResult::ok(full_name));
        }
        let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
        let errors = record_errors(&parsed);
        if errors.is_empty() {
            Err(api_error(status.as_u16(), &body))
        } else {
            Ok(SaveResult::failed(errors))
        }
    }

    async fn tooling_query(&self, soql: &str) -> Result<Vec<Value>, ConnectionError> {
        let result: QueryResult = self.get(self.tooling_url("/query"), &[("q", soql)]).await?;
        Ok(result.records)
    }

    /// `TableEnumOrId` of an object: its name if standard, its id if custom
    async fn table_enum_or_id(&self, object_name: &str) -> Result<Option<String>, ConnectionError> {
        if !object_name.ends_with("__c") {
            return Ok(Some(object_name.to_string()));
        }
        let soql = format!(
            "SELECT Id FROM CustomObject WHERE DeveloperName = {}",
            tooling::soql_literal(tooling::developer_name(object_name))
        );
        Ok(self
            .tooling_query(&soql)
            .await?
            .first()
            .and_then(|r| r.get("Id"))
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// Tooling record (`Id`, `Metadata`) for a full name
    async fn tooling_record(
        &self,
        kind: MetadataKind,
        full_name: &str,
    ) -> Result<Option<(String, Value)>, ConnectionError> {
        let soql = match kind {
            MetadataKind::CustomObject => format!(
                "SELECT Id, Metadata FROM CustomObject WHERE DeveloperName = {}",
                tooling::soql_literal(tooling::developer_name(full_name))
            ),
            MetadataKind::CustomField => {
                let Some((object_name, developer_name)) = tooling::split_field_name(full_name) else {
                    return Ok(None);
                };
                let Some(table) = self.table_enum_or_id(object_name).await? else {
                    return Ok(None);
                };
                format!(
                    "SELECT Id, Metadata FROM CustomField WHERE DeveloperName = {} AND TableEnumOrId = {}",
                    tooling::soql_literal(developer_name),
                    tooling::soql_literal(&table)
                )
            }
        };

        let record = self.tooling_query(&soql).await?.into_iter().next();
        Ok(record.and_then(|mut r| {
            let id = r.get("Id").and_then(Value::as_str)?.to_string();
            let metadata = r.get_mut("Metadata").map(Value::take).unwrap_or(Value::Null);
            Some((id, metadata))
        }))
    }
}

/// Tag each record with its object type, as the collections API requires
fn typed_records(object_name: &str, records: &[Record]) -> Vec<Value> {
    records
        .iter()
        .map(|record| {
            let mut typed = record.clone();
            typed.insert("attributes".to_string(), json!({ "type": object_name }));
            Value::Object(typed)
        })
        .collect()
}

#[async_trait]
impl CrmConnection for RestConnection {
    async fn describe(&self, object_name: &str) -> Result<DescribeResult, ConnectionError> {
        debug!(object = %object_name, "Describing object");
        self.get(self.data_url(&format!("/sobjects/{}/describe", object_name)), &[])
            .await
    }

    async fn describe_global(&self) -> Result<DescribeGlobalResult, ConnectionError> {
        self.get(self.data_url("/sobjects"), &[]).await
    }

    async fn query(&self, soql: &str) -> Result<QueryResult, ConnectionError> {
        self.get(self.data_url("/query"), &[("q", soql)]).await
    }

    async fn search(&self, sosl: &str) -> Result<SearchResult, ConnectionError> {
        self.get(self.data_url("/search"), &[("q", sosl)]).await
    }

    async fn create(
        &self,
        object_name: &str,
        records: &[Record],
    ) -> Result<Vec<DmlResult>, ConnectionError> {
        self.collection(Method::POST, self.data_url("/composite/sobjects"), object_name, records)
            .await
    }

    async fn update(
        &self,
        object_name: &str,
        records: &[Record],
    ) -> Result<Vec<DmlResult>, ConnectionError> {
        self.collection(Method::PATCH, self.data_url("/composite/sobjects"), object_name, records)
            .await
    }

    async fn destroy(
        &self,
        _object_name: &str,
        ids: &[String],
    ) -> Result<Vec<DmlResult>, ConnectionError> {
        let url = self.data_url("/composite/sobjects");
        let batches = ids.chunks(BATCH_SIZE).map(|chunk| {
            let joined = chunk.join(",");
            let request = self
                .http
                .delete(&url)
                .query(&[("ids", joined.as_str()), ("allOrNone", "false")]);
            self.dml_results(request)
        });
        let results = try_join_all(batches).await?;
        Ok(results.into_iter().flatten().collect())
    }

    async fn upsert(
        &self,
        object_name: &str,
        records: &[Record],
        external_id_field: &str,
    ) -> Result<Vec<DmlResult>, ConnectionError> {
        let url = self.data_url(&format!(
            "/composite/sobjects/{}/{}",
            object_name, external_id_field
        ));
        self.collection(Method::PATCH, url, object_name, records).await
    }

    async fn metadata_create(
        &self,
        kind: MetadataKind,
        document: &Value,
    ) -> Result<SaveResult, ConnectionError> {
        let full_name = tooling::full_name_of(document);
        debug!(kind = %kind, full_name = %full_name, "Creating metadata");
        let request = self
            .http
            .post(self.tooling_url(&format!("/sobjects/{}", kind)))
            .json(&tooling::create_body(kind, document));
        self.save(request, full_name).await
    }

    async fn metadata_read(
        &self,
        kind: MetadataKind,
        full_name: &str,
    ) -> Result<Option<Value>, ConnectionError> {
        Ok(self
            .tooling_record(kind, full_name)
            .await?
            .map(|(_, metadata)| tooling::from_tooling(kind, full_name, metadata)))
    }

    async fn metadata_update(
        &self,
        kind: MetadataKind,
        document: &Value,
    ) -> Result<SaveResult, ConnectionError> {
        let full_name = tooling::full_name_of(document);
        let Some((id, _)) = self.tooling_record(kind, full_name).await? else {
            return Ok(SaveResult::failed(vec![
                RecordError::new(format!("{} {} not found", kind, full_name))
                    .with_status_code("NOT_FOUND"),
            ]));
        };
        debug!(kind = %kind, full_name = %full_name, id = %id, "Updating metadata");
        let request = self
            .http
            .patch(self.tooling_url(&format!("/sobjects/{}/{}", kind, id)))
            .json(&tooling::update_body(kind, document));
        self.save(request, full_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> RestConnection {
        RestConnection::new(
            reqwest::Client::new(),
            Session {
                access_token: "token".into(),
                instance_url: "https://acme.my.salesforce.com/".into(),
            },
            "59.0",
        )
    }

    #[test]
    fn test_urls() {
        let conn = connection();
        assert_eq!(
            conn.data_url("/query"),
            "https://acme.my.salesforce.com/services/data/v59.0/query"
        );
        assert_eq!(
            conn.tooling_url("/sobjects/CustomField"),
            "https://acme.my.salesforce.com/services/data/v59.0/tooling/sobjects/CustomField"
        );
    }

    #[test]
    fn test_typed_records() {
        let record: Record = json!({"Name": "Acme"}).as_object().cloned().unwrap();
        let typed = typed_records("Account", &[record]);
        assert_eq!(typed[0], json!({"Name": "Acme", "attributes": {"type": "Account"}}));
    }

    #[test]
    fn test_collection_results_parse() {
        let body = json!([
            {"id": "001A", "success": true, "errors": []},
            {"success": false, "errors": [{"statusCode": "REQUIRED_FIELD_MISSING", "message": "Required fields are missing: [Name]", "fields": ["Name"]}]}
        ]);
        let results: Vec<DmlResult> = serde_json::from_value(body).unwrap();
        assert!(results[0].success);
        assert!(!results[1].success);
        let errors = results[1].errors.as_ref().unwrap().as_slice();
        assert_eq!(errors[0].status_code.as_deref(), Some("REQUIRED_FIELD_MISSING"));
    }

    #[test]
    fn test_batches_respect_limit() {
        let records: Vec<Record> = (0..450).map(|_| Record::new()).collect();
        let sizes: Vec<usize> = records.chunks(BATCH_SIZE).map(|c| c.len()).collect();
        assert_eq!(sizes, vec![200, 200, 50]);
    }
}
