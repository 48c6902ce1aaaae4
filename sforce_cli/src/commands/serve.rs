//! MCP server command implementation.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use sforce_mcp::{SalesforceMcpServer, build_registry, definitions};
use sforce_rest::{RestSession, SessionConfig};

use crate::cli::{ConnectionArgs, SelectionArgs};
use crate::errors::CliError;
use crate::ui;

/// Log in and serve the selected tools on stdio.
pub fn serve(connection: &ConnectionArgs, selection: &SelectionArgs) -> Result<(), CliError> {
    let config = session_config(connection)?;
    let selection = selection.to_selection();

    // Reject a bad selection before spending a login on it.
    definitions(&selection).map_err(|e| {
        ui::error_with_details("Invalid tool selection", &e.to_string());
        CliError::ConfigError
    })?;

    // Create a tokio runtime for the async MCP server
    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        ui::error_with_details("Failed to create async runtime", &e.to_string());
        CliError::ServerError
    })?;

    rt.block_on(async {
        info!(
            "Logging in to {} as {}",
            config.login_url, config.username
        );
        let session = RestSession::login(&config).await.map_err(|e| {
            ui::error_with_details("Failed to log in to Salesforce", &e.to_string());
            CliError::LoginError
        })?;
        info!("Connected to {}", session.instance_url());

        let registry = build_registry(Arc::new(session), &selection).map_err(|e| {
            ui::error_with_details("Failed to register tools", &e.to_string());
            CliError::ConfigError
        })?;

        // Serve over stdio (blocks until connection closes)
        SalesforceMcpServer::new(registry)
            .serve_stdio()
            .await
            .map_err(|e| {
                ui::error_with_details("MCP server error", &e.to_string());
                CliError::ServerError
            })
    })
}

fn session_config(connection: &ConnectionArgs) -> Result<SessionConfig, CliError> {
    SessionConfig::new(&connection.username, connection.login_password())
        .and_then(|config| config.with_login_url(&connection.login_url))
        .map(|config| {
            config
                .with_api_version(&connection.api_version)
                .with_timeout(Duration::from_secs(connection.timeout_secs))
        })
        .map_err(|e| {
            ui::error_with_details("Invalid connection settings", &e.to_string());
            CliError::ConfigError
        })
}
