//! Tool catalog command implementation.

use sforce_mcp::definitions;

use crate::cli::SelectionArgs;
use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

/// Print the selected tools without connecting to Salesforce.
pub fn list_tools(selection: &SelectionArgs, output_format: OutputFormat) -> Result<(), CliError> {
    let definitions = definitions(&selection.to_selection()).map_err(|e| {
        ui::error_with_details("Invalid tool selection", &e.to_string());
        CliError::ConfigError
    })?;

    ui::success(&format!("{} tools enabled", definitions.len()));

    match output_format {
        OutputFormat::Pretty => {
            ui::pretty_output_tool_list(&definitions);
            Ok(())
        }
        OutputFormat::Json => ui::json_output_tool_list(&definitions),
    }
}
