//! Color scale tokens: parsed blocks, scale-name classification, and the assembled record.
//!
//! A Radix Colors source file declares one export per scale variant, e.g. `blue`, `blueA`,
//! `blueP3`, `blueP3A` in `light.ts` and `blueDark`, `blueDarkA`, ... in `dark.ts`. The two
//! overlay scales `blackA` and `whiteA` live in their own files and have no light/dark pair.

mod assembler;
mod parser;

pub use assembler::ScaleAssembler;
pub use parser::{declared_names, BlockExtractor, ExportParser};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::error::{FetchError, FetchResult};

/// Overlay scales: base names that happen to end in `A`.
pub const OVERLAY_SCALES: [&str; 2] = ["blackA", "whiteA"];

/// Longest first so `P3A` is not read as `A`.
const VARIANT_SUFFIXES: [&str; 7] = ["DarkP3A", "DarkP3", "DarkA", "Dark", "P3A", "P3", "A"];

/// Ordered token key → value pairs from one declaration.
pub type TokenMap = IndexMap<String, String>;

/// Variant name (e.g. `blueP3`) → its block.
pub type VariantMap = IndexMap<String, TokenBlock>;

/// One `export const <name> = { ... }` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBlock {
    pub name: String,
    pub tokens: TokenMap,
}

impl TokenBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tokens: TokenMap::new(),
        }
    }

    pub fn with_token(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tokens.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Serialized as its token map; the name is already the key in a [`VariantMap`].
impl Serialize for TokenBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tokens.serialize(serializer)
    }
}

/// Everything known about one scale. Either `overlay` is set, or some of `light`/`dark`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScaleRecord {
    pub scale_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light: Option<VariantMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark: Option<VariantMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<VariantMap>,
}

impl ColorScaleRecord {
    pub fn new(scale_name: impl Into<String>) -> Self {
        Self {
            scale_name: scale_name.into(),
            light: None,
            dark: None,
            overlay: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.light.is_none() && self.dark.is_none() && self.overlay.is_none()
    }
}

/// How a declared export name relates to a scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleName {
    Overlay(&'static str),
    Base(String),
    Variant { base: String, suffix: &'static str },
}

impl ScaleName {
    pub fn is_base(&self) -> bool {
        !matches!(self, ScaleName::Variant { .. })
    }

    /// Name of the scale this declaration belongs to.
    pub fn scale(&self) -> &str {
        match self {
            ScaleName::Overlay(name) => name,
            ScaleName::Base(name) => name,
            ScaleName::Variant { base, .. } => base,
        }
    }
}

/// Classifies a declared export name (case-sensitive, as written in source).
pub fn classify(name: &str) -> ScaleName {
    if let Some(overlay) = OVERLAY_SCALES.iter().find(|o| **o == name) {
        return ScaleName::Overlay(overlay);
    }
    for suffix in VARIANT_SUFFIXES {
        if let Some(base) = name.strip_suffix(suffix) {
            if !base.is_empty() {
                return ScaleName::Variant {
                    base: base.to_string(),
                    suffix,
                };
            }
        }
    }
    ScaleName::Base(name.to_string())
}

/// Maps a user-supplied scale name to the scale to assemble: overlay names match
/// case-insensitively, variant spellings reduce to their base, bases are lower-cased.
pub fn canonical_scale(requested: &str) -> FetchResult<ScaleName> {
    let requested = requested.trim();
    if requested.is_empty() {
        return Err(FetchError::InvalidRequest("scale name is required".into()));
    }
    if let Some(overlay) = OVERLAY_SCALES
        .iter()
        .find(|o| o.eq_ignore_ascii_case(requested))
    {
        return Ok(ScaleName::Overlay(overlay));
    }
    let base = match classify(requested) {
        ScaleName::Variant { base, .. } => base,
        other => other.scale().to_string(),
    };
    Ok(ScaleName::Base(base.to_lowercase()))
}

/// Declaration names that may carry `base`'s tokens, in output order.
pub(crate) fn variant_names(base: &str, include_dark: bool) -> Vec<String> {
    let mut names = vec![
        base.to_string(),
        format!("{}A", base),
        format!("{}P3", base),
        format!("{}P3A", base),
    ];
    if include_dark {
        names.extend([
            format!("{}Dark", base),
            format!("{}DarkA", base),
            format!("{}DarkP3", base),
            format!("{}DarkP3A", base),
        ]);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_splits_base_variant_and_overlay() {
        assert_eq!(classify("blue"), ScaleName::Base("blue".into()));
        assert_eq!(
            classify("blueA"),
            ScaleName::Variant {
                base: "blue".into(),
                suffix: "A"
            }
        );
        assert_eq!(
            classify("blueP3A"),
            ScaleName::Variant {
                base: "blue".into(),
                suffix: "P3A"
            }
        );
        assert_eq!(
            classify("blueDarkP3"),
            ScaleName::Variant {
                base: "blue".into(),
                suffix: "DarkP3"
            }
        );
        assert_eq!(classify("blackA"), ScaleName::Overlay("blackA"));
        assert_eq!(classify("whiteA"), ScaleName::Overlay("whiteA"));
        assert!(classify("A").is_base());
    }

    #[test]
    fn canonical_scale_normalizes_user_input() {
        assert_eq!(canonical_scale("Blue").unwrap(), ScaleName::Base("blue".into()));
        assert_eq!(canonical_scale("blueP3A").unwrap(), ScaleName::Base("blue".into()));
        assert_eq!(canonical_scale("blacka").unwrap(), ScaleName::Overlay("blackA"));
        assert_eq!(canonical_scale(" WHITEA ").unwrap(), ScaleName::Overlay("whiteA"));
        assert!(matches!(
            canonical_scale("  "),
            Err(FetchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn variant_names_cover_alpha_and_p3_and_optionally_dark() {
        assert_eq!(
            variant_names("red", false),
            vec!["red", "redA", "redP3", "redP3A"]
        );
        assert_eq!(variant_names("red", true).len(), 8);
        assert_eq!(variant_names("red", true)[4], "redDark");
    }

    #[test]
    fn record_serializes_only_populated_sides_as_token_maps() {
        let mut light = VariantMap::new();
        light.insert(
            "blue".into(),
            TokenBlock::new("blue").with_token("blue1", "#fbfdff"),
        );
        let record = ColorScaleRecord {
            light: Some(light),
            ..ColorScaleRecord::new("blue")
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "scaleName": "blue",
                "light": { "blue": { "blue1": "#fbfdff" } }
            })
        );
    }
}
