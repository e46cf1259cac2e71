use indexmap::IndexMap;
use serde_json::Value;

use super::{Tool, ToolCallContent, ToolError, ToolSpec};

/// Tools by name, in registration order.
///
/// Registering a name twice replaces the earlier tool but keeps its position.
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Specs of all registered tools, for `tools/list`.
    pub fn list(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|tool| tool.spec()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Calls `name` with `args`. Unknown names are [`ToolError::NotFound`].
    pub async fn call(&self, name: &str, args: Value) -> Result<ToolCallContent, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tracing::debug!(tool = name, "calling tool");
        tool.call(args).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct Echo(&'static str);

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            self.0
        }

        fn spec(&self) -> ToolSpec {
            ToolSpec {
                name: self.0.to_string(),
                description: Some("echo".into()),
                input_schema: json!({"type": "object"}),
            }
        }

        async fn call(&self, args: Value) -> Result<ToolCallContent, ToolError> {
            Ok(ToolCallContent {
                text: format!("{}:{}", self.0, args),
            })
        }
    }

    #[tokio::test]
    async fn lists_in_registration_order_and_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(Echo("b")));
        registry.register(Box::new(Echo("a")));

        assert_eq!(registry.names(), vec!["b", "a"]);
        assert_eq!(registry.list()[1].name, "a");

        let out = registry.call("a", json!({"x": 1})).await.unwrap();
        assert_eq!(out.text, r#"a:{"x":1}"#);
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let registry = ToolRegistry::default();
        assert!(registry.is_empty());
        let err = registry.call("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(ref n) if n == "missing"));
    }
}
