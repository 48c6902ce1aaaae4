use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ApiErrorDetail;

/// A record as returned by Salesforce: field name to scalar or nested value.
///
/// Records are owned by the remote service and passed through opaquely.
pub type Record = Map<String, Value>;

/// A record to update: its ID plus any fields to overwrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RecordUpdate {
    /// Record ID
    #[serde(rename = "Id")]
    pub id: String,

    /// Fields to overwrite, forwarded as given.
    #[serde(flatten)]
    pub fields: Record,
}

impl RecordUpdate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Record::new(),
        }
    }

    /// Adds a field to overwrite.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// Outcome of saving one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResult {
    #[serde(default)]
    pub id: Option<String>,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

impl SaveResult {
    pub fn succeeded(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            success: true,
            errors: Vec::new(),
        }
    }
}

/// One page of a SOQL query.
///
/// `done` is false when more pages remain behind `next_records_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub total_size: u64,
    pub done: bool,
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_records_url: Option<String>,
}

impl QueryResult {
    /// A completed result holding `records`.
    pub fn complete(records: Vec<Record>) -> Self {
        Self {
            total_size: records.len() as u64,
            done: true,
            records,
            next_records_url: None,
        }
    }
}
