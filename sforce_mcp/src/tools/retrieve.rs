//! Retrieve tool implementation.

use std::sync::Arc;

use log::{debug, warn};
use rmcp::schemars;
use sforce_core::SessionClient;

use super::CatalogEntry;
use crate::format::format_record;
use crate::outcome::{ToolFailure, ToolOutcome};
use crate::registry::{ToolHandler, typed_handler};
use crate::schema::input_schema;

pub const NAME: &str = "retrieve";

/// Parameters for the retrieve tool.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct RetrieveParams {
    /// Record ID
    pub id: String,
    /// SObject Name
    pub sobject: String,
}

/// Execute the retrieve tool.
///
/// Fetches one record and lists its scalar fields as `field: value` lines.
pub async fn execute(session: &dyn SessionClient, params: &RetrieveParams) -> ToolOutcome {
    debug!("Retrieving {} {}", params.sobject, params.id);

    match session.retrieve(&params.sobject, &params.id).await {
        Ok(record) => Ok(format!(
            "One record was retrieved:\n\n{}",
            format_record(&record)
        )),
        Err(e) => {
            warn!("Retrieve of {} {} failed: {}", params.sobject, params.id, e);
            Err(ToolFailure::RetrieveRecord)
        }
    }
}

pub(super) fn entry() -> CatalogEntry {
    CatalogEntry {
        name: NAME,
        description: "Retrieve a record by Salesforce ID",
        input_schema: input_schema::<RetrieveParams>,
        bind,
    }
}

fn bind(session: Arc<dyn SessionClient>) -> Arc<dyn ToolHandler> {
    typed_handler(move |params: RetrieveParams| {
        let session = Arc::clone(&session);
        async move { execute(session.as_ref(), &params).await }
    })
}
