//! Uniform tool outcomes and their rendering into MCP results.

use std::fmt;

use rmcp::model::{CallToolResult, Content};

/// What a tool handler produces: display text, or a fixed failure.
pub type ToolOutcome = Result<String, ToolFailure>;

/// Failures reported back to the calling agent.
///
/// Each renders as a short fixed sentence. The remote error behind it is
/// logged, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFailure {
    RetrieveRecord,
    RetrieveRecords,
    CountRecords,
    UpdateRecords,
    ExecuteApex,
    CreateCustomField,
    RetrieveTriggers,
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ToolFailure::RetrieveRecord => "Failed to retrieve record",
            ToolFailure::RetrieveRecords => "Failed to retrieve records",
            ToolFailure::CountRecords => "Failed to count records",
            ToolFailure::UpdateRecords => "Failed to update records",
            ToolFailure::ExecuteApex => "Failed to execute anonymous Apex",
            ToolFailure::CreateCustomField => "Failed to create custom field",
            ToolFailure::RetrieveTriggers => "Failed to retrieve Apex triggers",
        };
        f.write_str(text)
    }
}

impl std::error::Error for ToolFailure {}

/// Renders an outcome as a single text block, flagged as an error on failure.
pub fn into_call_result(outcome: ToolOutcome) -> CallToolResult {
    match outcome {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(failure) => CallToolResult::error(vec![Content::text(failure.to_string())]),
    }
}
