//! Triggers by SObject tool implementation.

use std::sync::Arc;

use log::{debug, warn};
use rmcp::schemars;
use sforce_core::SessionClient;

use super::CatalogEntry;
use crate::format::pretty_json;
use crate::outcome::{ToolFailure, ToolOutcome};
use crate::registry::{ToolHandler, typed_handler};
use crate::schema::input_schema;

pub const NAME: &str = "triggers-by-sobject";

const TOOLING_SOBJECT: &str = "ApexTrigger";

/// Trigger fields returned to the caller.
pub const TRIGGER_FIELDS: &[&str] = &[
    "Id",
    "Name",
    "TableEnumOrId",
    "Status",
    "IsValid",
    "ApiVersion",
    "Body",
];

/// Parameters for the triggers by SObject tool.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct TriggersBySobjectParams {
    /// SObject Name
    pub sobject: String,
}

/// Execute the triggers by SObject tool.
pub async fn execute(session: &dyn SessionClient, params: &TriggersBySobjectParams) -> ToolOutcome {
    debug!("Getting Apex triggers on {}", params.sobject);

    let filter = [("TableEnumOrId", params.sobject.as_str())];
    match session
        .tooling_find(TOOLING_SOBJECT, &filter, TRIGGER_FIELDS)
        .await
    {
        Ok(records) => Ok(format!(
            "{} Apex Triggers were found on {}:\n\n{}",
            records.len(),
            params.sobject,
            pretty_json(&records)
        )),
        Err(e) => {
            warn!("Trigger lookup for {} failed: {}", params.sobject, e);
            Err(ToolFailure::RetrieveTriggers)
        }
    }
}

pub(super) fn entry() -> CatalogEntry {
    CatalogEntry {
        name: NAME,
        description: "Get Apex Triggers by SObject",
        input_schema: input_schema::<TriggersBySobjectParams>,
        bind,
    }
}

fn bind(session: Arc<dyn SessionClient>) -> Arc<dyn ToolHandler> {
    typed_handler(move |params: TriggersBySobjectParams| {
        let session = Arc::clone(&session);
        async move { execute(session.as_ref(), &params).await }
    })
}
