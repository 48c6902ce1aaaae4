//! Terminal output. Status lines go to stderr so stdout stays free for data
//! and for the MCP transport.

use std::fmt;

use clap::ValueEnum;
use console::style;
use serde_json::Value;
use sforce_mcp::ToolDefinition;

use crate::errors::CliError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn success(msg: &str) {
    eprintln!("{} {}", style("✓").green(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red(), style(msg).red());
}

pub fn error_with_details(msg: &str, details: &str) {
    error(msg);
    eprintln!("  {}", style(details).dim());
}

/// Tool names with their descriptions, one per line.
pub fn pretty_output_tool_list(definitions: &[ToolDefinition]) {
    let width = definitions
        .iter()
        .map(|definition| definition.name.len())
        .max()
        .unwrap_or(0);

    for definition in definitions {
        println!(
            "{:width$}  {}",
            style(&definition.name).cyan(),
            definition.description,
            width = width
        );
    }
}

/// Tool definitions as a JSON array on stdout, as `tools/list` would return them.
pub fn json_output_tool_list(definitions: &[ToolDefinition]) -> Result<(), CliError> {
    let tools: Vec<Value> = definitions
        .iter()
        .map(|definition| {
            serde_json::json!({
                "name": definition.name,
                "description": definition.description,
                "inputSchema": definition.input_schema,
            })
        })
        .collect();

    let output = serde_json::to_string_pretty(&tools).map_err(|e| {
        error_with_details("Failed to serialize tool list", &e.to_string());
        CliError::OutputError
    })?;
    println!("{}", output);
    Ok(())
}
