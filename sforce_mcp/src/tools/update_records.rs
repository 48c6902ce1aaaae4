//! Update records tool implementation.

use std::sync::Arc;

use log::{debug, warn};
use rmcp::schemars;
use sforce_core::{RecordUpdate, SessionClient};

use super::CatalogEntry;
use crate::format::pretty_json;
use crate::outcome::{ToolFailure, ToolOutcome};
use crate::registry::{ToolHandler, typed_handler};
use crate::schema::input_schema;

pub const NAME: &str = "update-records";

/// Parameters for the update records tool.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct UpdateRecordsParams {
    /// Records containing the ID and any other fields to update.
    pub records: Vec<RecordUpdate>,
    /// SObject Name
    pub sobject: String,
}

/// Execute the update records tool.
///
/// Per-record results are returned as JSON in input order, failures included.
pub async fn execute(session: &dyn SessionClient, params: &UpdateRecordsParams) -> ToolOutcome {
    debug!(
        "Updating {} {} record(s)",
        params.records.len(),
        params.sobject
    );

    match session.update(&params.sobject, &params.records).await {
        Ok(results) => Ok(format!("Result of update(s):\n\n{}", pretty_json(&results))),
        Err(e) => {
            warn!("Update of {} records failed: {}", params.sobject, e);
            Err(ToolFailure::UpdateRecords)
        }
    }
}

pub(super) fn entry() -> CatalogEntry {
    CatalogEntry {
        name: NAME,
        description: "Update records",
        input_schema: input_schema::<UpdateRecordsParams>,
        bind,
    }
}

fn bind(session: Arc<dyn SessionClient>) -> Arc<dyn ToolHandler> {
    typed_handler(move |params: UpdateRecordsParams| {
        let session = Arc::clone(&session);
        async move { execute(session.as_ref(), &params).await }
    })
}
