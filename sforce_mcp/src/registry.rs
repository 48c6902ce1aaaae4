//! The tool registry: named tools, their input schemas and handlers.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rmcp::model::{JsonObject, Tool};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::outcome::ToolOutcome;
use crate::schema::{ArgumentValidator, FieldIssue};

/// Errors raised while building the registry or dispatching a call.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// A tool with this name is already registered.
    DuplicateTool(String),
    /// A tool's input schema failed to compile.
    InvalidSchema { tool: String, reason: String },
    /// No tool with this name is registered.
    UnknownTool(String),
    /// Arguments did not satisfy the tool's input schema.
    InvalidArguments {
        tool: String,
        fields: Vec<String>,
        reason: String,
    },
    /// A tool selection named a tool that doesn't exist.
    UnknownSelection(String),
    /// A tool selection left no tools enabled.
    EmptySelection,
}

impl RegistryError {
    fn invalid_arguments(tool: &str, issues: Vec<FieldIssue>) -> Self {
        let reason = issues
            .iter()
            .map(|issue| format!("{}: {}", issue.field, issue.problem))
            .collect::<Vec<_>>()
            .join("; ");
        RegistryError::InvalidArguments {
            tool: tool.to_string(),
            fields: issues.into_iter().map(|issue| issue.field).collect(),
            reason,
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateTool(name) => {
                write!(f, "Tool '{}' is registered more than once", name)
            }
            RegistryError::InvalidSchema { tool, reason } => {
                write!(f, "Input schema for '{}' is invalid: {}", tool, reason)
            }
            RegistryError::UnknownTool(name) => write!(f, "Unknown tool '{}'", name),
            RegistryError::InvalidArguments { tool, reason, .. } => {
                write!(f, "Invalid arguments for '{}': {}", tool, reason)
            }
            RegistryError::UnknownSelection(name) => write!(
                f,
                "Tool '{}' does not exist and cannot be enabled or disabled",
                name
            ),
            RegistryError::EmptySelection => write!(f, "Tool selection leaves no tools enabled"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Name, description and input schema of a registered tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: JsonObject,
}

impl ToolDefinition {
    /// The MCP `tools/list` entry for this definition.
    pub fn to_tool(&self) -> Tool {
        Tool::new(
            self.name.clone(),
            self.description.clone(),
            Arc::new(self.input_schema.clone()),
        )
    }
}

/// Runs one tool call on already validated arguments.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Returns `Err` with a reason when the arguments can't be read into the
    /// handler's params type.
    async fn call(&self, args: JsonObject) -> Result<ToolOutcome, String>;
}

/// A handler that deserializes arguments into `P` before running.
pub struct TypedHandler<P, F> {
    run: F,
    _params: PhantomData<fn() -> P>,
}

/// Wraps an async function over a params type as a [`ToolHandler`].
pub fn typed_handler<P, F, Fut>(run: F) -> Arc<dyn ToolHandler>
where
    P: DeserializeOwned + Send + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ToolOutcome> + Send + 'static,
{
    Arc::new(TypedHandler {
        run,
        _params: PhantomData,
    })
}

#[async_trait]
impl<P, F, Fut> ToolHandler for TypedHandler<P, F>
where
    P: DeserializeOwned + Send + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ToolOutcome> + Send + 'static,
{
    async fn call(&self, args: JsonObject) -> Result<ToolOutcome, String> {
        let params: P = serde_json::from_value(Value::Object(args)).map_err(|e| e.to_string())?;
        Ok((self.run)(params).await)
    }
}

struct RegisteredTool {
    definition: ToolDefinition,
    validator: ArgumentValidator,
    handler: Arc<dyn ToolHandler>,
}

/// A fixed table of tools, populated at startup and read-only afterwards.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tool, compiling its input schema. Fails if the name is already
    /// taken or the schema doesn't compile.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: JsonObject,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateTool(name));
        }

        let validator =
            ArgumentValidator::compile(&input_schema).map_err(|reason| {
                RegistryError::InvalidSchema {
                    tool: name.clone(),
                    reason,
                }
            })?;

        debug!("Registering tool: {}", name);
        self.by_name.insert(name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            definition: ToolDefinition {
                name,
                description: description.into(),
                input_schema,
            },
            validator,
            handler,
        });
        Ok(())
    }

    /// Validates `args` against the named tool's schema and runs its handler.
    ///
    /// Unknown tools and invalid arguments are rejected before the handler
    /// (and so any remote call) runs.
    pub async fn dispatch(
        &self,
        name: &str,
        args: Option<JsonObject>,
    ) -> Result<ToolOutcome, RegistryError> {
        let tool = self
            .by_name
            .get(name)
            .map(|&index| &self.tools[index])
            .ok_or_else(|| RegistryError::UnknownTool(name.to_string()))?;

        let mut args = args.unwrap_or_default();
        let issues = tool.validator.validate(&mut args);
        if !issues.is_empty() {
            return Err(RegistryError::invalid_arguments(name, issues));
        }

        debug!("Tool: {}", name);
        tool.handler
            .call(args)
            .await
            .map_err(|reason| RegistryError::InvalidArguments {
                tool: name.to_string(),
                fields: Vec::new(),
                reason,
            })
    }

    /// Definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter().map(|tool| &tool.definition)
    }

    pub fn definition(&self, name: &str) -> Option<&ToolDefinition> {
        self.by_name
            .get(name)
            .map(|&index| &self.tools[index].definition)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
