use std::fmt;

use clap::{Args, Parser, Subcommand};
use sforce_mcp::ToolSelection;
use sforce_rest::{DEFAULT_API_VERSION, DEFAULT_LOGIN_URL};

use super::ui::OutputFormat;

/// Defines the top-level interface for the sforce CLI with clap.
#[derive(Parser, Debug)]
#[command(name = "sforce")]
#[command(version, about = "Salesforce records, SOQL and Apex as MCP tools.")]
pub struct SforceCli {
    /// Enable verbose output?
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: SforceCliCommand,
}

/// Defines the available subcommands of the sforce CLI.
#[derive(Subcommand, Debug, PartialEq)]
pub enum SforceCliCommand {
    /// Log in to Salesforce and serve MCP tools over stdio.
    Serve {
        #[command(flatten)]
        connection: ConnectionArgs,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// List the tools the server would expose, without logging in.
    Tools {
        #[command(flatten)]
        selection: SelectionArgs,
    },
}

/// Salesforce login settings.
#[derive(Args, PartialEq)]
pub struct ConnectionArgs {
    /// Salesforce username
    #[arg(long, env = "SALESFORCE_USERNAME")]
    pub username: String,

    /// Salesforce password, optionally with the security token appended
    #[arg(long, env = "SALESFORCE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Security token appended to the password
    #[arg(long, env = "SALESFORCE_SECURITY_TOKEN", hide_env_values = true)]
    pub security_token: Option<String>,

    /// Login endpoint (use https://test.salesforce.com for sandboxes)
    #[arg(long, env = "SALESFORCE_LOGIN_URL", default_value = DEFAULT_LOGIN_URL)]
    pub login_url: String,

    /// REST API version
    #[arg(long, env = "SALESFORCE_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "SALESFORCE_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,
}

impl ConnectionArgs {
    /// The password sent at login: the password followed by the security token, if any.
    pub fn login_password(&self) -> String {
        match &self.security_token {
            Some(token) => format!("{}{}", self.password, token.trim()),
            None => self.password.clone(),
        }
    }
}

impl fmt::Debug for ConnectionArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionArgs")
            .field("username", &self.username)
            .field("login_url", &self.login_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

/// Which tools to expose.
#[derive(Args, Debug, Default, PartialEq)]
pub struct SelectionArgs {
    /// Comma separated tools to enable; all tools when omitted
    #[arg(long, env = "SALESFORCE_MCP_TOOLS", value_delimiter = ',')]
    pub tools: Option<Vec<String>>,

    /// Comma separated tools to disable
    #[arg(long, env = "SALESFORCE_MCP_DISABLED_TOOLS", value_delimiter = ',')]
    pub disable_tools: Vec<String>,
}

impl SelectionArgs {
    pub fn to_selection(&self) -> ToolSelection {
        ToolSelection {
            enabled: self.tools.clone(),
            disabled: self.disable_tools.clone(),
        }
    }
}
