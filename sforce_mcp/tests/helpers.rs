//! Shared test helpers for sforce_mcp tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, RawContent};
use serde_json::Value;
use sforce_core::{
    ExecuteAnonymousResult, QueryResult, Record, RecordUpdate, SalesforceError,
    SalesforceResult, SaveResult, SessionClient,
};

/// Extract the text content from a CallToolResult.
pub fn get_text(result: &CallToolResult) -> String {
    assert_eq!(result.content.len(), 1, "Expected exactly one content item");
    match &result.content[0].raw {
        RawContent::Text(text_content) => text_content.text.clone(),
        _ => panic!("Expected text content"),
    }
}

/// Check if the result is a success.
pub fn is_success(result: &CallToolResult) -> bool {
    result.is_error == Some(false)
}

/// Check if the result is an error.
pub fn is_error(result: &CallToolResult) -> bool {
    result.is_error == Some(true)
}

/// Convert a `json!` object literal into a record or argument map.
pub fn object(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        _ => panic!("Expected a JSON object"),
    }
}

/// A query page that is complete.
pub fn done(records: Vec<Record>) -> QueryResult {
    QueryResult::complete(records)
}

/// A query page with more pages behind it.
pub fn not_done(total_size: u64) -> QueryResult {
    QueryResult {
        total_size,
        done: false,
        records: Vec::new(),
        next_records_url: Some("/services/data/v59.0/query/01g-2000".to_string()),
    }
}

/// A call made against the fake session.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Retrieve { sobject: String, id: String },
    Update { sobject: String, records: Vec<RecordUpdate> },
    Query(String),
    ExecuteAnonymous(String),
    ToolingCreate { sobject: String, metadata: Value },
    ToolingFind {
        sobject: String,
        filter: Vec<(String, String)>,
        fields: Vec<String>,
    },
}

/// In-memory session that records calls and returns canned responses.
///
/// A response left unset makes the matching call fail. Updates echo a
/// successful result per record unless results are set or `fail_updates` is on.
#[derive(Default)]
pub struct FakeSession {
    calls: Mutex<Vec<Call>>,
    pub record: Option<Record>,
    pub query_result: Option<QueryResult>,
    pub save_results: Option<Vec<SaveResult>>,
    pub fail_updates: bool,
    pub apex_result: Option<ExecuteAnonymousResult>,
    pub create_result: Option<SaveResult>,
    pub found: Option<Vec<Record>>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, record: Value) -> Self {
        self.record = Some(object(record));
        self
    }

    pub fn with_query_result(mut self, result: QueryResult) -> Self {
        self.query_result = Some(result);
        self
    }

    pub fn with_save_results(mut self, results: Vec<SaveResult>) -> Self {
        self.save_results = Some(results);
        self
    }

    pub fn failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    pub fn with_apex_result(mut self, result: ExecuteAnonymousResult) -> Self {
        self.apex_result = Some(result);
        self
    }

    pub fn with_create_result(mut self, result: SaveResult) -> Self {
        self.create_result = Some(result);
        self
    }

    pub fn with_found(mut self, records: Vec<Record>) -> Self {
        self.found = Some(records);
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unavailable<T>() -> SalesforceResult<T> {
    Err(SalesforceError::Http("connection refused".to_string()))
}

#[async_trait]
impl SessionClient for FakeSession {
    async fn retrieve(&self, sobject: &str, id: &str) -> SalesforceResult<Record> {
        self.record_call(Call::Retrieve {
            sobject: sobject.to_string(),
            id: id.to_string(),
        });
        match &self.record {
            Some(record) => Ok(record.clone()),
            None => Err(SalesforceError::NotFound(format!("{}/{}", sobject, id))),
        }
    }

    async fn update(
        &self,
        sobject: &str,
        records: &[RecordUpdate],
    ) -> SalesforceResult<Vec<SaveResult>> {
        self.record_call(Call::Update {
            sobject: sobject.to_string(),
            records: records.to_vec(),
        });
        if self.fail_updates {
            return unavailable();
        }
        match &self.save_results {
            Some(results) => Ok(results.clone()),
            None => Ok(records
                .iter()
                .map(|record| SaveResult::succeeded(record.id.clone()))
                .collect()),
        }
    }

    async fn query(&self, soql: &str) -> SalesforceResult<QueryResult> {
        self.record_call(Call::Query(soql.to_string()));
        match &self.query_result {
            Some(result) => Ok(result.clone()),
            None => unavailable(),
        }
    }

    async fn tooling_execute_anonymous(
        &self,
        body: &str,
    ) -> SalesforceResult<ExecuteAnonymousResult> {
        self.record_call(Call::ExecuteAnonymous(body.to_string()));
        match &self.apex_result {
            Some(result) => Ok(result.clone()),
            None => unavailable(),
        }
    }

    async fn tooling_create(&self, sobject: &str, metadata: &Value) -> SalesforceResult<SaveResult> {
        self.record_call(Call::ToolingCreate {
            sobject: sobject.to_string(),
            metadata: metadata.clone(),
        });
        match &self.create_result {
            Some(result) => Ok(result.clone()),
            None => unavailable(),
        }
    }

    async fn tooling_find(
        &self,
        sobject: &str,
        filter: &[(&str, &str)],
        fields: &[&str],
    ) -> SalesforceResult<Vec<Record>> {
        self.record_call(Call::ToolingFind {
            sobject: sobject.to_string(),
            filter: filter
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        });
        match &self.found {
            Some(records) => Ok(records.clone()),
            None => unavailable(),
        }
    }
}
