//! The three Radix libraries and where their resources live in the upstream repositories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Repository holding the documentation site (usage and getting-started pages).
pub const WEBSITE_REPO: &str = "website";

/// Colors documentation pages, relative to `data/colors/docs/`, in bundle order.
pub const COLORS_DOCUMENTATION_PAGES: [&str; 6] = [
    "overview/usage.mdx",
    "overview/custom-palettes.mdx",
    "overview/aliasing.mdx",
    "palette-composition/scales.mdx",
    "palette-composition/understanding-the-scale.mdx",
    "palette-composition/composing-a-palette.mdx",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Library {
    Themes,
    Primitives,
    Colors,
}

/// What a library's resources are, as reported in tool results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    Styled,
    Unstyled,
    ColorScale,
}

/// One entry of a contents-API directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

impl ContentEntry {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    fn is_file(&self) -> bool {
        self.kind == "file"
    }

    fn is_dir(&self) -> bool {
        self.kind == "dir"
    }
}

impl Library {
    pub const ALL: [Library; 3] = [Library::Themes, Library::Primitives, Library::Colors];

    pub fn as_str(&self) -> &'static str {
        match self {
            Library::Themes => "themes",
            Library::Primitives => "primitives",
            Library::Colors => "colors",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Library::Themes => "Themes",
            Library::Primitives => "Primitives",
            Library::Colors => "Colors",
        }
    }

    /// Upstream repository name under the organisation.
    pub fn repo(&self) -> &'static str {
        self.as_str()
    }

    /// Directory whose listing enumerates the library's resources.
    pub fn listing_path(&self) -> &'static str {
        match self {
            Library::Themes => "packages/radix-ui-themes/src/components",
            Library::Primitives => "packages/react",
            Library::Colors => "src",
        }
    }

    /// Path prefix to which source candidates are appended. `None` for colors, whose
    /// "source" is the assembled scale.
    pub fn source_base(&self, name: &str) -> Option<String> {
        match self {
            Library::Colors => None,
            lib => Some(format!("{}/{}", lib.listing_path(), name)),
        }
    }

    /// Ordered candidate suffixes for a component's source file.
    pub fn source_candidates(&self, name: &str) -> Vec<String> {
        match self {
            Library::Themes => vec![
                ".tsx".into(),
                ".ts".into(),
                "/index.tsx".into(),
                "/index.ts".into(),
            ],
            Library::Primitives => vec![
                format!("/src/{}.tsx", name),
                "/index.tsx".into(),
                "/src/index.ts".into(),
                "/index.ts".into(),
            ],
            Library::Colors => Vec::new(),
        }
    }

    /// Usage page path (without extension) in [`WEBSITE_REPO`].
    pub fn usage_base(&self, name: &str) -> String {
        format!("data/{}/docs/components/{}", self.as_str(), name)
    }

    /// Getting-started page in [`WEBSITE_REPO`]; colors has an installation page instead.
    pub fn getting_started_path(&self) -> &'static str {
        match self {
            Library::Themes => "data/themes/docs/overview/getting-started.mdx",
            Library::Primitives => "data/primitives/docs/overview/getting-started.mdx",
            Library::Colors => "data/colors/docs/overview/installation.mdx",
        }
    }

    pub fn package_name(&self, name: &str) -> String {
        match self {
            Library::Themes => "@radix-ui/themes".to_string(),
            Library::Primitives => format!("@radix-ui/react-{}", name),
            Library::Colors => "@radix-ui/colors".to_string(),
        }
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            Library::Themes => ComponentType::Styled,
            Library::Primitives => ComponentType::Unstyled,
            Library::Colors => ComponentType::ColorScale,
        }
    }

    /// Applies the library's listing filter and returns the identifier, extension stripped.
    pub fn listing_identifier(&self, entry: &ContentEntry) -> Option<String> {
        let name = entry.name.as_str();
        let keep = match self {
            Library::Themes => {
                entry.is_file()
                    && !name.starts_with('.')
                    && !name.ends_with("props.tsx")
                    && !name.ends_with(".css")
            }
            Library::Primitives => entry.is_dir() && !name.starts_with('.'),
            Library::Colors => entry.is_file() && name.ends_with(".ts") && !name.contains("index"),
        };
        if !keep {
            return None;
        }
        let stem = name
            .strip_suffix(".tsx")
            .or_else(|| name.strip_suffix(".ts"))
            .unwrap_or(name);
        (!stem.is_empty()).then(|| stem.to_string())
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown library \"{0}\" (expected themes, primitives, colors or all)")]
pub struct UnknownLibrary(pub String);

impl FromStr for Library {
    type Err = UnknownLibrary;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "themes" => Ok(Library::Themes),
            "primitives" => Ok(Library::Primitives),
            "colors" => Ok(Library::Colors),
            other => Err(UnknownLibrary(other.to_string())),
        }
    }
}

/// Which libraries a server instance exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LibrarySelection {
    #[default]
    All,
    Only(Library),
}

impl LibrarySelection {
    pub fn libraries(&self) -> Vec<Library> {
        match self {
            LibrarySelection::All => Library::ALL.to_vec(),
            LibrarySelection::Only(lib) => vec![*lib],
        }
    }

    pub fn includes(&self, library: Library) -> bool {
        match self {
            LibrarySelection::All => true,
            LibrarySelection::Only(lib) => *lib == library,
        }
    }
}

impl FromStr for LibrarySelection {
    type Err = UnknownLibrary;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(LibrarySelection::All);
        }
        s.parse().map(LibrarySelection::Only)
    }
}

impl fmt::Display for LibrarySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibrarySelection::All => f.write_str("all"),
            LibrarySelection::Only(lib) => lib.fmt(f),
        }
    }
}
