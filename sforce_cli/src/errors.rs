use std::fmt;
use std::process::ExitCode;

/// Failure categories for the CLI. Details are reported through `ui` when they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliError {
    /// Invalid connection settings or tool selection
    ConfigError,
    /// Salesforce rejected the login or could not be reached
    LoginError,
    /// The MCP server failed to start or stopped with an error
    ServerError,
    /// Output could not be written
    OutputError,
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(match self {
            CliError::ConfigError => 2,
            CliError::LoginError => 3,
            CliError::ServerError => 4,
            CliError::OutputError => 5,
        })
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigError => write!(f, "Invalid configuration"),
            CliError::LoginError => write!(f, "Login failed"),
            CliError::ServerError => write!(f, "MCP server failed"),
            CliError::OutputError => write!(f, "Failed to write output"),
        }
    }
}

impl std::error::Error for CliError {}
