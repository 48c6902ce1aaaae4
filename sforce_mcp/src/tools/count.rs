//! Count tool implementation.

use std::sync::Arc;

use log::{debug, warn};
use rmcp::schemars;
use sforce_core::{SessionClient, soql};

use super::CatalogEntry;
use crate::outcome::{ToolFailure, ToolOutcome};
use crate::registry::{ToolHandler, typed_handler};
use crate::schema::input_schema;

pub const NAME: &str = "count";

/// Parameters for the count tool.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct CountParams {
    /// SObject Name
    pub sobject: String,
}

/// Execute the count tool.
///
/// Never reports a partial total: an unfinished query counts as a failure.
pub async fn execute(session: &dyn SessionClient, params: &CountParams) -> ToolOutcome {
    let query = soql::count(&params.sobject);
    debug!("Counting with: {}", query);

    match session.query(&query).await {
        Ok(result) if result.done => Ok(format!(
            "Count for SObject {}: {}",
            params.sobject, result.total_size
        )),
        Ok(_) => {
            warn!("Count query for {} did not complete", params.sobject);
            Err(ToolFailure::CountRecords)
        }
        Err(e) => {
            warn!("Count query for {} failed: {}", params.sobject, e);
            Err(ToolFailure::CountRecords)
        }
    }
}

pub(super) fn entry() -> CatalogEntry {
    CatalogEntry {
        name: NAME,
        description: "Count Salesforce records",
        input_schema: input_schema::<CountParams>,
        bind,
    }
}

fn bind(session: Arc<dyn SessionClient>) -> Arc<dyn ToolHandler> {
    typed_handler(move |params: CountParams| {
        let session = Arc::clone(&session);
        async move { execute(session.as_ref(), &params).await }
    })
}
