//! Query records tool implementation.

use std::sync::Arc;

use log::{debug, warn};
use rmcp::schemars;
use sforce_core::{SessionClient, soql};

use super::CatalogEntry;
use crate::format::format_records;
use crate::outcome::{ToolFailure, ToolOutcome};
use crate::registry::{ToolHandler, typed_handler};
use crate::schema::input_schema;

pub const NAME: &str = "query-records";

pub const DEFAULT_FIELDS: &str = "Id, Name";
pub const DEFAULT_LIMIT: u32 = 10;

/// Parameters for the query records tool.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct QueryRecordsParams {
    /// SObject Name
    pub sobject: String,
    /// Comma separated list of fields
    #[serde(default = "default_fields")]
    pub list_of_fields: String,
    /// Limit of records
    #[serde(default = "default_limit")]
    #[schemars(range(max = 50000))]
    pub limit: u32,
}

impl QueryRecordsParams {
    /// Params for `sobject` with the default field list and limit.
    pub fn new(sobject: impl Into<String>) -> Self {
        Self {
            sobject: sobject.into(),
            list_of_fields: default_fields(),
            limit: default_limit(),
        }
    }
}

fn default_fields() -> String {
    DEFAULT_FIELDS.to_string()
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Execute the query records tool.
///
/// Runs a bounded projection and shows at most `limit` records, scalar fields only.
pub async fn execute(session: &dyn SessionClient, params: &QueryRecordsParams) -> ToolOutcome {
    let query = soql::projection(&params.list_of_fields, &params.sobject, params.limit);
    debug!("Querying records with: {}", query);

    let result = match session.query(&query).await {
        Ok(result) if result.done => result,
        Ok(_) => {
            warn!("Query for {} returned more than one page", params.sobject);
            return Err(ToolFailure::RetrieveRecords);
        }
        Err(e) => {
            warn!("Query for {} failed: {}", params.sobject, e);
            return Err(ToolFailure::RetrieveRecords);
        }
    };

    if result.records.is_empty() {
        return Ok(format!("No records found for the {} SObject.", params.sobject));
    }

    Ok(format!(
        "Records found for the {} SObject:\n\n{}",
        params.sobject,
        format_records(&result.records, params.limit as usize)
    ))
}

pub(super) fn entry() -> CatalogEntry {
    CatalogEntry {
        name: NAME,
        description: "Search Salesforce records",
        input_schema: input_schema::<QueryRecordsParams>,
        bind,
    }
}

fn bind(session: Arc<dyn SessionClient>) -> Arc<dyn ToolHandler> {
    typed_handler(move |params: QueryRecordsParams| {
        let session = Arc::clone(&session);
        async move { execute(session.as_ref(), &params).await }
    })
}
