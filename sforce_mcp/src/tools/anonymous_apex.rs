//! Anonymous Apex tool implementation.

use std::sync::Arc;

use log::{info, warn};
use rmcp::schemars;
use sforce_core::SessionClient;

use super::CatalogEntry;
use crate::format::pretty_json;
use crate::outcome::{ToolFailure, ToolOutcome};
use crate::registry::{ToolHandler, typed_handler};
use crate::schema::input_schema;

pub const NAME: &str = "anonymous-apex";

/// Parameters for the anonymous Apex tool.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct AnonymousApexParams {
    /// Anonymous Apex Body
    #[serde(rename = "apexBody")]
    pub apex_body: String,
}

/// Execute the anonymous Apex tool.
///
/// A body that fails to compile or throws still succeeds here; the flags and
/// the raw result tell the caller what happened.
pub async fn execute(session: &dyn SessionClient, params: &AnonymousApexParams) -> ToolOutcome {
    let result = match session.tooling_execute_anonymous(&params.apex_body).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Anonymous Apex request failed: {}", e);
            return Err(ToolFailure::ExecuteApex);
        }
    };

    info!("compiled?: {}", result.compiled);
    info!("executed?: {}", result.success);

    Ok(format!(
        "compiled?: {}, executed?: {}, result:\n\n{}",
        result.compiled,
        result.success,
        pretty_json(&result)
    ))
}

pub(super) fn entry() -> CatalogEntry {
    CatalogEntry {
        name: NAME,
        description: "Execute Anonymous Apex",
        input_schema: input_schema::<AnonymousApexParams>,
        bind,
    }
}

fn bind(session: Arc<dyn SessionClient>) -> Arc<dyn ToolHandler> {
    typed_handler(move |params: AnonymousApexParams| {
        let session = Arc::clone(&session);
        async move { execute(session.as_ref(), &params).await }
    })
}
