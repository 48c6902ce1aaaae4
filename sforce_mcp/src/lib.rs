//! MCP server for Salesforce.
//!
//! This crate exposes Salesforce record, query and tooling operations as MCP
//! tools. Each tool validates its arguments at the registry boundary, makes
//! exactly one call through a [`sforce_core::SessionClient`], and renders the
//! outcome as a single text block.

pub mod format;
pub mod outcome;
pub mod registry;
pub mod schema;
mod server;
pub mod tools;

pub use outcome::{ToolFailure, ToolOutcome};
pub use registry::{RegistryError, ToolDefinition, ToolHandler, ToolRegistry};
pub use server::{SalesforceMcpServer, ServerError};
pub use tools::{ToolSelection, build_registry, catalog, definitions};
