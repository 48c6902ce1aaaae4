//! SOQL query tool implementation.

use std::sync::Arc;

use log::{debug, warn};
use rmcp::schemars;
use sforce_core::SessionClient;

use super::CatalogEntry;
use crate::format::pretty_json;
use crate::outcome::{ToolFailure, ToolOutcome};
use crate::registry::{ToolHandler, typed_handler};
use crate::schema::input_schema;

pub const NAME: &str = "soql-query";

/// Parameters for the SOQL query tool.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct SoqlQueryParams {
    /// SOQL query string
    #[serde(rename = "soqlQueryString")]
    pub soql_query_string: String,
}

/// Execute the SOQL query tool.
///
/// The query is sent as given. The whole first page is returned as JSON.
pub async fn execute(session: &dyn SessionClient, params: &SoqlQueryParams) -> ToolOutcome {
    debug!("Running SOQL: {}", params.soql_query_string);

    match session.query(&params.soql_query_string).await {
        Ok(result) if result.done => Ok(pretty_json(&result)),
        Ok(_) => {
            warn!("SOQL query returned more than one page");
            Err(ToolFailure::RetrieveRecords)
        }
        Err(e) => {
            warn!("SOQL query failed: {}", e);
            Err(ToolFailure::RetrieveRecords)
        }
    }
}

pub(super) fn entry() -> CatalogEntry {
    CatalogEntry {
        name: NAME,
        description: "Execute a SOQL query",
        input_schema: input_schema::<SoqlQueryParams>,
        bind,
    }
}

fn bind(session: Arc<dyn SessionClient>) -> Arc<dyn ToolHandler> {
    typed_handler(move |params: SoqlQueryParams| {
        let session = Arc::clone(&session);
        async move { execute(session.as_ref(), &params).await }
    })
}
