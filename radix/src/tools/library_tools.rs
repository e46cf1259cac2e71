//! The three tools each library exposes.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{required_name, Tool, ToolCallContent, ToolError, ToolSpec};
use super::{ComponentResult, GettingStartedResult, ListComponentsResult};
use crate::key::TextKind;
use crate::library::{Library, WEBSITE_REPO};
use crate::resolver::Resolver;

const LIST_NOTE: &str =
    "Use the get-component tool with a specific component name to get its source and usage";
const SCALES_NOTE: &str =
    "Use colors_get_scale with a specific scale name to get its light, dark and alpha values";
const DOCS_NOTE: &str = "This content is fetched directly from the official Radix UI \
documentation to ensure it stays up-to-date.";

fn no_arguments() -> Value {
    json!({ "type": "object", "properties": {}, "required": [] })
}

fn one_name_argument(key: &str, what: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            key: {
                "type": "string",
                "description": format!("The name of the {} to get information about", what),
                "minLength": 1,
                "maxLength": crate::key::MAX_IDENTIFIER_LEN
            }
        },
        "required": [key]
    })
}

/// Argument key naming the resource: `scaleName` for colors, `componentName` otherwise.
fn name_key(library: Library) -> &'static str {
    match library {
        Library::Colors => "scaleName",
        _ => "componentName",
    }
}

fn noun(library: Library) -> &'static str {
    match library {
        Library::Colors => "color scale",
        _ => "component",
    }
}

/// `<lib>_list_components`, or `colors_list_scales`.
pub struct ListTool {
    library: Library,
    resolver: Arc<Resolver>,
    name: String,
}

impl ListTool {
    pub fn new(library: Library, resolver: Arc<Resolver>) -> Self {
        let name = match library {
            Library::Colors => "colors_list_scales".to_string(),
            lib => format!("{}_list_components", lib),
        };
        Self {
            library,
            resolver,
            name,
        }
    }
}

#[async_trait]
impl Tool for ListTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn spec(&self) -> ToolSpec {
        let what = match self.library {
            Library::Colors => "color scales",
            _ => "components",
        };
        ToolSpec {
            name: self.name.clone(),
            description: Some(format!(
                "List all available Radix {} {}",
                self.library.display_name(),
                what
            )),
            input_schema: no_arguments(),
        }
    }

    async fn call(&self, _args: Value) -> Result<ToolCallContent, ToolError> {
        let (names, note) = match self.library {
            Library::Colors => (self.resolver.scale_names().await, SCALES_NOTE),
            lib => (self.resolver.list(lib).await, LIST_NOTE),
        };
        let names = names.map_err(|e| {
            ToolError::fetch(format!("Failed to fetch {} components", self.library), e)
        })?;
        tracing::info!(library = %self.library, count = names.len(), "listed components");
        ToolCallContent::json(&ListComponentsResult::new(self.library, names, note))
    }
}

/// `<lib>_get_component`, or `colors_get_scale`: source and usage fetched together.
///
/// For colors the source is the assembled scale record and the usage is the colors
/// documentation bundle, both as pretty JSON.
pub struct ComponentTool {
    library: Library,
    resolver: Arc<Resolver>,
    name: String,
}

impl ComponentTool {
    pub fn new(library: Library, resolver: Arc<Resolver>) -> Self {
        let name = match library {
            Library::Colors => "colors_get_scale".to_string(),
            lib => format!("{}_get_component", lib),
        };
        Self {
            library,
            resolver,
            name,
        }
    }
}

#[async_trait]
impl Tool for ComponentTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name.clone(),
            description: Some(format!(
                "Get detailed information about a specific Radix {} {}",
                self.library.display_name(),
                noun(self.library)
            )),
            input_schema: one_name_argument(name_key(self.library), noun(self.library)),
        }
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolError> {
        let name = required_name(&args, name_key(self.library))?;
        let (source, usage) = futures::try_join!(
            self.resolver.get_text(TextKind::Source, self.library, &name),
            self.resolver.get_text(TextKind::Usage, self.library, &name),
        )
        .map_err(|e| {
            ToolError::fetch(
                format!("Failed to fetch {} {} \"{}\"", self.library, noun(self.library), name),
                e,
            )
        })?;
        tracing::info!(library = %self.library, name = %name, "fetched component");
        let mut result = ComponentResult::new(self.library, Some(&name));
        result.source = Some(source);
        result.usage = Some(usage);
        ToolCallContent::json(&result)
    }
}

/// `<lib>_get_getting_started`.
pub struct GettingStartedTool {
    library: Library,
    resolver: Arc<Resolver>,
    name: String,
}

impl GettingStartedTool {
    pub fn new(library: Library, resolver: Arc<Resolver>) -> Self {
        Self {
            name: format!("{}_get_getting_started", library),
            library,
            resolver,
        }
    }
}

#[async_trait]
impl Tool for GettingStartedTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name.clone(),
            description: Some(format!(
                "Get the official getting started guide for Radix {}",
                self.library.display_name()
            )),
            input_schema: no_arguments(),
        }
    }

    async fn call(&self, _args: Value) -> Result<ToolCallContent, ToolError> {
        let content = self
            .resolver
            .getting_started(self.library)
            .await
            .map_err(|e| {
                ToolError::fetch(
                    format!("Failed to fetch {} getting started guide", self.library),
                    e,
                )
            })?;
        let settings = self.resolver.settings();
        let display = self.library.display_name();
        ToolCallContent::json(&GettingStartedResult {
            library: self.library,
            title: format!("Radix {} - Getting Started", display),
            description: format!("Official getting started guide for Radix {}", display),
            source: format!(
                "https://github.com/{}/{}/blob/{}/{}",
                settings.owner,
                WEBSITE_REPO,
                settings.branch,
                self.library.getting_started_path()
            ),
            content,
            note: DOCS_NOTE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockHttpClient;
    use crate::library::LibrarySelection;
    use crate::settings::ResolverSettings;
    use crate::tools::{register_tools, ToolRegistry};

    const RAW: &str = "https://raw.githubusercontent.com/radix-ui";
    const API: &str = "https://api.github.com/repos/radix-ui";

    fn registry(mock: MockHttpClient, selection: LibrarySelection) -> ToolRegistry {
        let resolver = Arc::new(Resolver::with_client(
            ResolverSettings::default(),
            Arc::new(mock),
        ));
        let mut registry = ToolRegistry::new();
        register_tools(&mut registry, resolver, selection);
        registry
    }

    #[test]
    fn selection_controls_registered_tools() {
        let all = registry(MockHttpClient::new(), LibrarySelection::All);
        assert_eq!(all.len(), 9);
        assert!(all.contains("themes_get_component"));
        assert!(all.contains("primitives_get_component"));

        let colors = registry(
            MockHttpClient::new(),
            LibrarySelection::Only(Library::Colors),
        );
        assert_eq!(
            colors.names(),
            vec![
                "colors_list_scales",
                "colors_get_scale",
                "colors_get_getting_started"
            ]
        );
    }

    #[test]
    fn name_argument_schema_is_required_and_bounded() {
        let tool = ComponentTool::new(
            Library::Colors,
            Arc::new(Resolver::with_client(
                ResolverSettings::default(),
                Arc::new(MockHttpClient::new()),
            )),
        );
        let schema = tool.spec().input_schema;
        assert_eq!(schema["required"], json!(["scaleName"]));
        assert_eq!(schema["properties"]["scaleName"]["maxLength"], 100);
    }

    #[tokio::test]
    async fn list_tool_reports_fallback_catalog_when_rate_limited() {
        let mock = MockHttpClient::new().with_status(
            format!("{}/primitives/contents/packages/react", API),
            403,
        );
        let tools = registry(mock, LibrarySelection::All);
        let out = tools
            .call("primitives_list_components", json!({}))
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&out.text).unwrap();
        assert_eq!(value["library"], "primitives");
        assert_eq!(value["total"], 28);
        assert_eq!(value["components"][0]["packageName"], "@radix-ui/react-accordion");
    }

    #[tokio::test]
    async fn component_tool_returns_source_and_usage() {
        let mock = MockHttpClient::new()
            .with_text(
                format!(
                    "{}/themes/main/packages/radix-ui-themes/src/components/button.tsx",
                    RAW
                ),
                "export const Button = () => null;",
            )
            .with_text(
                format!("{}/website/main/data/themes/docs/components/button.mdx", RAW),
                "# Button",
            );
        let tools = registry(mock, LibrarySelection::Only(Library::Themes));
        let out = tools
            .call("themes_get_component", json!({"componentName": "button"}))
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&out.text).unwrap();
        assert_eq!(value["componentName"], "button");
        assert_eq!(value["packageName"], "@radix-ui/themes");
        assert_eq!(value["type"], "styled");
        assert_eq!(value["source"], "export const Button = () => null;");
        assert_eq!(value["usage"], "# Button");
    }

    #[tokio::test]
    async fn missing_usage_fails_the_whole_component() {
        let mock = MockHttpClient::new().with_text(
            format!("{}/primitives/main/packages/react/dialog/src/dialog.tsx", RAW),
            "export const Dialog = 1;",
        );
        let tools = registry(mock, LibrarySelection::Only(Library::Primitives));
        let err = tools
            .call("primitives_get_component", json!({"componentName": "dialog"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Fetch { .. }));
        assert!(err.to_string().contains("dialog"), "{}", err);
    }

    #[tokio::test]
    async fn missing_component_surfaces_as_fetch_error() {
        let tools = registry(MockHttpClient::new(), LibrarySelection::All);
        let err = tools
            .call("themes_get_component", json!({"componentName": "nonexistent-xyz"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Fetch { .. }));
        assert!(err.to_string().contains("nonexistent-xyz"), "{}", err);

        let err = tools
            .call("themes_get_component", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn scale_tool_embeds_record_and_documentation() {
        let mut mock = MockHttpClient::new().with_text(
            format!("{}/colors/main/src/whiteA.ts", RAW),
            r#"export const whiteA = { whiteA1: "rgba(255, 255, 255, 0)" };"#,
        );
        for page in crate::library::COLORS_DOCUMENTATION_PAGES {
            mock = mock.with_text(format!("{}/website/main/data/colors/docs/{}", RAW, page), "# page");
        }
        let tools = registry(mock, LibrarySelection::Only(Library::Colors));
        let out = tools
            .call("colors_get_scale", json!({"scaleName": "whiteA"}))
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&out.text).unwrap();
        assert_eq!(value["type"], "color-scale");
        let record: Value = serde_json::from_str(value["source"].as_str().unwrap()).unwrap();
        assert_eq!(record["scaleName"], "whiteA");
        assert_eq!(record["overlay"]["whiteA"]["whiteA1"], "rgba(255, 255, 255, 0)");
        let usage: Value = serde_json::from_str(value["usage"].as_str().unwrap()).unwrap();
        assert_eq!(usage.as_object().map(|m| m.len()), Some(6));
    }

    #[tokio::test]
    async fn getting_started_links_to_website_source() {
        let mock = MockHttpClient::new().with_text(
            format!(
                "{}/website/main/data/themes/docs/overview/getting-started.mdx",
                RAW
            ),
            "# Getting started",
        );
        let tools = registry(mock, LibrarySelection::Only(Library::Themes));
        let out = tools
            .call("themes_get_getting_started", json!({}))
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&out.text).unwrap();
        assert_eq!(value["title"], "Radix Themes - Getting Started");
        assert_eq!(value["content"], "# Getting started");
        assert_eq!(
            value["source"],
            "https://github.com/radix-ui/website/blob/main/data/themes/docs/overview/getting-started.mdx"
        );
    }
}
