//! JSON shapes returned by the tools.

use serde::Serialize;

use crate::library::{ComponentType, Library};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInfo {
    pub name: String,
    pub package_name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListComponentsResult {
    pub library: Library,
    pub total: usize,
    pub components: Vec<ComponentInfo>,
    pub note: String,
}

impl ListComponentsResult {
    pub fn new(library: Library, names: Vec<String>, note: impl Into<String>) -> Self {
        let components: Vec<ComponentInfo> = names
            .into_iter()
            .map(|name| ComponentInfo {
                package_name: library.package_name(&name),
                component_type: library.component_type(),
                name,
            })
            .collect();
        Self {
            library,
            total: components.len(),
            components,
            note: note.into(),
        }
    }
}

/// Source or usage of one component (or color scale).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentResult {
    pub library: Library,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    pub package_name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

impl ComponentResult {
    pub fn new(library: Library, component_name: Option<&str>) -> Self {
        Self {
            library,
            component_name: component_name.map(str::to_string),
            package_name: library.package_name(component_name.unwrap_or_default()),
            component_type: library.component_type(),
            source: None,
            usage: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GettingStartedResult {
    pub library: Library,
    pub title: String,
    pub description: String,
    pub source: String,
    pub content: String,
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_result_carries_package_and_type_per_entry() {
        let result = ListComponentsResult::new(
            Library::Primitives,
            vec!["dialog".into(), "tabs".into()],
            "hint",
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["library"], "primitives");
        assert_eq!(json["total"], 2);
        assert_eq!(
            json["components"][0],
            json!({"name": "dialog", "packageName": "@radix-ui/react-dialog", "type": "unstyled"})
        );
    }

    #[test]
    fn component_result_omits_absent_fields() {
        let mut result = ComponentResult::new(Library::Colors, Some("blue"));
        result.source = Some("{}".into());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            json!({
                "library": "colors",
                "componentName": "blue",
                "packageName": "@radix-ui/colors",
                "type": "color-scale",
                "source": "{}"
            })
        );
    }
}
