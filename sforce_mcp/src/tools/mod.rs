//! MCP tool implementations for Salesforce.

pub mod anonymous_apex;
pub mod count;
pub mod create_custom_field;
pub mod query_records;
pub mod retrieve;
mod selection;
pub mod soql_query;
pub mod triggers_by_sobject;
pub mod update_records;

use std::sync::Arc;

use rmcp::model::JsonObject;
use sforce_core::SessionClient;

use crate::registry::{RegistryError, ToolDefinition, ToolHandler, ToolRegistry};

pub use selection::ToolSelection;

/// Static description of a tool and how to bind it to a session.
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    input_schema: fn() -> JsonObject,
    bind: fn(Arc<dyn SessionClient>) -> Arc<dyn ToolHandler>,
}

impl CatalogEntry {
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: (self.input_schema)(),
        }
    }
}

/// Every tool this server knows, in listing order.
pub fn catalog() -> Vec<CatalogEntry> {
    vec![
        update_records::entry(),
        retrieve::entry(),
        anonymous_apex::entry(),
        triggers_by_sobject::entry(),
        create_custom_field::entry(),
        count::entry(),
        query_records::entry(),
        soql_query::entry(),
    ]
}

/// Definitions of the tools `selection` enables, without binding a session.
pub fn definitions(selection: &ToolSelection) -> Result<Vec<ToolDefinition>, RegistryError> {
    let catalog = catalog();
    let selected = selection.resolve(&names(&catalog))?;

    Ok(catalog
        .iter()
        .filter(|entry| selected.contains(&entry.name))
        .map(CatalogEntry::definition)
        .collect())
}

/// Builds a registry of the selected tools, all sharing one session.
pub fn build_registry(
    session: Arc<dyn SessionClient>,
    selection: &ToolSelection,
) -> Result<ToolRegistry, RegistryError> {
    let catalog = catalog();
    let selected = selection.resolve(&names(&catalog))?;

    let mut registry = ToolRegistry::new();
    for entry in catalog.iter().filter(|entry| selected.contains(&entry.name)) {
        registry.register(
            entry.name,
            entry.description,
            (entry.input_schema)(),
            (entry.bind)(Arc::clone(&session)),
        )?;
    }
    Ok(registry)
}

fn names(catalog: &[CatalogEntry]) -> Vec<&'static str> {
    catalog.iter().map(|entry| entry.name).collect()
}
