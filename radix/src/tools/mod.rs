//! Tool layer: named, schema-described operations over a shared [`Resolver`].
//!
//! Each library contributes three tools (list, component, getting started).
//! Tool results are pretty-printed JSON text, the shape MCP clients expect in
//! `tools/call` content.

mod library_tools;
mod registry;
mod results;

pub use library_tools::{ComponentTool, GettingStartedTool, ListTool};
pub use registry::ToolRegistry;
pub use results::{ComponentInfo, ComponentResult, GettingStartedResult, ListComponentsResult};

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::FetchError;
use crate::key::MAX_IDENTIFIER_LEN;
use crate::library::LibrarySelection;
use crate::resolver::Resolver;

/// Name, description and JSON Schema of a tool, as listed by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub input_schema: Value,
}

/// Text result of one tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallContent {
    pub text: String,
}

impl ToolCallContent {
    /// Pretty JSON rendering of `value`.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ToolError> {
        Ok(Self {
            text: serde_json::to_string_pretty(value)?,
        })
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("{context}: {source}")]
    Fetch {
        context: String,
        #[source]
        source: FetchError,
    },
    #[error("serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ToolError {
    pub fn fetch(context: impl Into<String>, source: FetchError) -> Self {
        ToolError::Fetch {
            context: context.into(),
            source,
        }
    }
}

/// A callable tool. Registered in a [`ToolRegistry`] under [`Tool::name`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique within a registry.
    fn name(&self) -> &str;

    fn spec(&self) -> ToolSpec;

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolError>;
}

/// Registers the tools of every library in `selection`, in library order.
pub fn register_tools(
    registry: &mut ToolRegistry,
    resolver: Arc<Resolver>,
    selection: LibrarySelection,
) {
    for library in selection.libraries() {
        registry.register(Box::new(ListTool::new(library, resolver.clone())));
        registry.register(Box::new(ComponentTool::new(library, resolver.clone())));
        registry.register(Box::new(GettingStartedTool::new(library, resolver.clone())));
    }
}

/// Required, trimmed string argument of 1 to [`MAX_IDENTIFIER_LEN`] characters.
pub(crate) fn required_name(args: &Value, key: &str) -> Result<String, ToolError> {
    let raw = args
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::InvalidInput(format!("missing {}", key)))?;
    let name = raw.trim();
    if name.is_empty() {
        return Err(ToolError::InvalidInput(format!("{} must not be empty", key)));
    }
    if name.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(ToolError::InvalidInput(format!(
            "{} must be at most {} characters",
            key, MAX_IDENTIFIER_LEN
        )));
    }
    Ok(name.to_string())
}
