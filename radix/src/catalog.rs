//! Static identifier lists served when a live directory listing is unavailable.

use crate::library::Library;

const THEMES: &[&str] = &[
    "avatar",
    "badge",
    "button",
    "card",
    "checkbox",
    "dialog",
    "dropdown-menu",
    "flex",
    "grid",
    "heading",
    "icon-button",
    "link",
    "popover",
    "progress",
    "radio-group",
    "select",
    "separator",
    "slider",
    "switch",
    "table",
    "tabs",
    "text",
    "text-area",
    "text-field",
    "tooltip",
];

const PRIMITIVES: &[&str] = &[
    "accordion",
    "alert-dialog",
    "aspect-ratio",
    "avatar",
    "checkbox",
    "collapsible",
    "context-menu",
    "dialog",
    "dropdown-menu",
    "form",
    "hover-card",
    "label",
    "menubar",
    "navigation-menu",
    "popover",
    "progress",
    "radio-group",
    "scroll-area",
    "select",
    "separator",
    "slider",
    "switch",
    "tabs",
    "toast",
    "toggle",
    "toggle-group",
    "toolbar",
    "tooltip",
];

const COLORS: &[&str] = &[
    "amber", "blue", "bronze", "brown", "crimson", "cyan", "grass", "gray", "green", "indigo",
    "lime", "mauve", "mint", "orange", "pink", "plum", "purple", "red", "sage", "sky", "slate",
    "teal", "tomato", "violet", "yellow",
];

/// Fixed, version-pinned identifiers per library. Never fetched, never cached.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackCatalog;

impl FallbackCatalog {
    pub fn entries(&self, library: Library) -> &'static [&'static str] {
        match library {
            Library::Themes => THEMES,
            Library::Primitives => PRIMITIVES,
            Library::Colors => COLORS,
        }
    }

    pub fn identifiers(&self, library: Library) -> Vec<String> {
        self.entries(library).iter().map(|s| s.to_string()).collect()
    }
}
