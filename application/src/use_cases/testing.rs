//! In-memory connection fakes shared by the use case tests

use crate::ports::crm_connection::{ConnectionError, ConnectionFactory, CrmConnection};
use async_trait::async_trait;
use serde_json::Value;
use sfmcp_domain::{
    DescribeGlobalResult, DescribeResult, DmlResult, MetadataKind, QueryResult, Record,
    SObjectSummary, SaveResult, SearchResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Canned responses plus a log of every call made
#[derive(Default)]
pub struct MockConnection {
    objects: Vec<SObjectSummary>,
    describe: Option<DescribeResult>,
    query_result: Option<QueryResult>,
    search_result: Option<SearchResult>,
    dml_results: Vec<DmlResult>,
    save_result: Option<SaveResult>,
    metadata: Option<Value>,
    failure: Option<ConnectionError>,
    panics: bool,
    calls: Mutex<Vec<String>>,
    writes: Mutex<Vec<Value>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_objects(mut self, objects: Vec<SObjectSummary>) -> Self {
        self.objects = objects;
        self
    }

    pub fn with_describe(mut self, describe: DescribeResult) -> Self {
        self.describe = Some(describe);
        self
    }

    pub fn with_query_result(mut self, result: QueryResult) -> Self {
        self.query_result = Some(result);
        self
    }

    pub fn with_search_result(mut self, result: SearchResult) -> Self {
        self.search_result = Some(result);
        self
    }

    pub fn with_dml_results(mut self, results: Vec<DmlResult>) -> Self {
        self.dml_results = results;
        self
    }

    pub fn with_save_result(mut self, result: SaveResult) -> Self {
        self.save_result = Some(result);
        self
    }

    /// Document returned by `metadata_read`
    pub fn with_metadata(mut self, document: Value) -> Self {
        self.metadata = Some(document);
        self
    }

    /// Every operation fails with this remote error
    pub fn failing_with(mut self, code: &str, message: &str) -> Self {
        self.failure = Some(ConnectionError::api(code, message));
        self
    }

    /// Every operation panics
    pub fn panicking(mut self) -> Self {
        self.panics = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Documents sent through `metadata_create` / `metadata_update`
    pub fn metadata_writes(&self) -> Vec<Value> {
        self.writes.lock().unwrap().clone()
    }

    fn enter(&self, call: String) -> Result<(), ConnectionError> {
        self.calls.lock().unwrap().push(call);
        if self.panics {
            panic!("connection exploded");
        }
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn save(&self, document: &Value) -> SaveResult {
        self.writes.lock().unwrap().push(document.clone());
        self.save_result.clone().unwrap_or_else(|| {
            SaveResult::ok(document["fullName"].as_str().unwrap_or_default())
        })
    }

    fn dml(&self, count: usize) -> Vec<DmlResult> {
        if self.dml_results.is_empty() {
            (0..count).map(|i| DmlResult::ok(format!("001{:03}", i))).collect()
        } else {
            self.dml_results.clone()
        }
    }
}

#[async_trait]
impl CrmConnection for MockConnection {
    async fn describe(&self, object_name: &str) -> Result<DescribeResult, ConnectionError> {
        self.enter(format!("describe {}", object_name))?;
        self.describe
            .clone()
            .ok_or_else(|| ConnectionError::api("NOT_FOUND", "The requested resource does not exist"))
    }

    async fn describe_global(&self) -> Result<DescribeGlobalResult, ConnectionError> {
        self.enter("describe_global".to_string())?;
        Ok(DescribeGlobalResult {
            sobjects: self.objects.clone(),
        })
    }

    async fn query(&self, soql: &str) -> Result<QueryResult, ConnectionError> {
        self.enter(format!("query {}", soql))?;
        Ok(self.query_result.clone().unwrap_or(QueryResult {
            total_size: 0,
            done: true,
            records: vec![],
        }))
    }

    async fn search(&self, sosl: &str) -> Result<SearchResult, ConnectionError> {
        self.enter(format!("search {}", sosl))?;
        Ok(self.search_result.clone().unwrap_or(SearchResult {
            search_records: vec![],
        }))
    }

    async fn create(
        &self,
        object_name: &str,
        records: &[Record],
    ) -> Result<Vec<DmlResult>, ConnectionError> {
        self.enter(format!("create {} {}", object_name, records.len()))?;
        Ok(self.dml(records.len()))
    }

    async fn update(
        &self,
        object_name: &str,
        records: &[Record],
    ) -> Result<Vec<DmlResult>, ConnectionError> {
        self.enter(format!("update {} {}", object_name, records.len()))?;
        Ok(self.dml(records.len()))
    }

    async fn destroy(
        &self,
        object_name: &str,
        ids: &[String],
    ) -> Result<Vec<DmlResult>, ConnectionError> {
        self.enter(format!("destroy {} {}", object_name, ids.join(",")))?;
        Ok(self.dml(ids.len()))
    }

    async fn upsert(
        &self,
        object_name: &str,
        records: &[Record],
        external_id_field: &str,
    ) -> Result<Vec<DmlResult>, ConnectionError> {
        self.enter(format!(
            "upsert {} {} {}",
            object_name,
            records.len(),
            external_id_field
        ))?;
        Ok(self.dml(records.len()))
    }

    async fn metadata_create(
        &self,
        kind: MetadataKind,
        document: &Value,
    ) -> Result<SaveResult, ConnectionError> {
        self.enter(format!("metadata_create {}", kind))?;
        Ok(self.save(document))
    }

    async fn metadata_read(
        &self,
        kind: MetadataKind,
        full_name: &str,
    ) -> Result<Option<Value>, ConnectionError> {
        self.enter(format!("metadata_read {} {}", kind, full_name))?;
        Ok(self.metadata.clone())
    }

    async fn metadata_update(
        &self,
        kind: MetadataKind,
        document: &Value,
    ) -> Result<SaveResult, ConnectionError> {
        self.enter(format!("metadata_update {}", kind))?;
        Ok(self.save(document))
    }
}

/// Hands out one shared [`MockConnection`] and counts how often it was asked
pub struct MockFactory {
    connection: Arc<MockConnection>,
    connects: AtomicUsize,
    refuse: bool,
}

impl MockFactory {
    pub fn new(connection: MockConnection) -> Self {
        Self {
            connection: Arc::new(connection),
            connects: AtomicUsize::new(0),
            refuse: false,
        }
    }

    /// Every connect attempt fails authentication
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new(MockConnection::new())
        }
    }

    pub fn connection(&self) -> &MockConnection {
        &self.connection
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionFactory for MockFactory {
    async fn connect(&self) -> Result<Arc<dyn CrmConnection>, ConnectionError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.refuse {
            return Err(ConnectionError::Auth("INVALID_LOGIN: bad password".into()));
        }
        Ok(self.connection.clone())
    }
}
