//! Create custom field tool implementation.

use std::sync::Arc;

use log::{debug, warn};
use rmcp::schemars;
use sforce_core::{CustomField, SessionClient};

use super::CatalogEntry;
use crate::format::pretty_json;
use crate::outcome::{ToolFailure, ToolOutcome};
use crate::registry::{ToolHandler, typed_handler};
use crate::schema::input_schema;

pub const NAME: &str = "create-custom-field";

const TOOLING_SOBJECT: &str = "CustomField";

/// Parameters for the create custom field tool.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct CreateCustomFieldParams {
    #[serde(rename = "customField")]
    pub custom_field: CustomField,
}

/// Execute the create custom field tool.
///
/// The save result is returned as JSON, including any per-field errors.
pub async fn execute(
    session: &dyn SessionClient,
    params: &CreateCustomFieldParams,
) -> ToolOutcome {
    debug!("Creating custom field {}", params.custom_field.full_name);

    let metadata = match serde_json::to_value(&params.custom_field) {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Could not serialize custom field: {}", e);
            return Err(ToolFailure::CreateCustomField);
        }
    };

    match session.tooling_create(TOOLING_SOBJECT, &metadata).await {
        Ok(result) => Ok(format!("Result:\n\n{}", pretty_json(&result))),
        Err(e) => {
            warn!(
                "Creating custom field {} failed: {}",
                params.custom_field.full_name, e
            );
            Err(ToolFailure::CreateCustomField)
        }
    }
}

pub(super) fn entry() -> CatalogEntry {
    CatalogEntry {
        name: NAME,
        description: "Create a Custom Field",
        input_schema: input_schema::<CreateCustomFieldParams>,
        bind,
    }
}

fn bind(session: Arc<dyn SessionClient>) -> Arc<dyn ToolHandler> {
    typed_handler(move |params: CreateCustomFieldParams| {
        let session = Arc::clone(&session);
        async move { execute(session.as_ref(), &params).await }
    })
}
