//! Extraction of flat `export const name = { key: "value", ... }` declarations.
//!
//! Only flat string maps are understood. A declaration whose braces hold a nested object,
//! an array, a computed key or a template literal is reported with zero tokens instead of
//! being half-parsed.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{classify, TokenBlock};

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+const\s+([A-Za-z][A-Za-z0-9]*)\s*=\s*\{([^}]*)\}")
        .unwrap_or_else(|e| panic!("declaration pattern: {}", e))
});

static DECLARED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+const\s+([A-Za-z][A-Za-z0-9]*)\s*=")
        .unwrap_or_else(|e| panic!("declared-name pattern: {}", e))
});

static ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["']?(\w+)["']?\s*:\s*(?:"([^"]*)"|'([^']*)')"#)
        .unwrap_or_else(|e| panic!("entry pattern: {}", e))
});

/// Turns a source file into declaration blocks, in source order.
///
/// Implementations may return several blocks with the same name; consumers take the first
/// non-empty one.
pub trait BlockExtractor: Send + Sync {
    fn extract_blocks(&self, source: &str) -> Vec<TokenBlock>;
}

/// Regex-based extractor for the flat export grammar.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExportParser;

impl ExportParser {
    pub fn new() -> Self {
        Self
    }
}

fn is_flat(body: &str) -> bool {
    !body.contains(&['{', '[', '`'][..])
}

impl BlockExtractor for ExportParser {
    fn extract_blocks(&self, source: &str) -> Vec<TokenBlock> {
        DECLARATION
            .captures_iter(source)
            .map(|caps| {
                let mut block = TokenBlock::new(&caps[1]);
                let body = &caps[2];
                if is_flat(body) {
                    for entry in ENTRY.captures_iter(body) {
                        let value = entry
                            .get(2)
                            .or_else(|| entry.get(3))
                            .map(|m| m.as_str())
                            .unwrap_or_default();
                        block.tokens.insert(entry[1].to_string(), value.to_string());
                    }
                } else {
                    tracing::debug!(name = %block.name, "skipping non-flat declaration");
                }
                block
            })
            .collect()
    }
}

/// Base scale names declared in `source`: variant spellings (`blueA`, `blueDark`, ...)
/// are dropped, overlay scales are kept.
pub fn declared_names(source: &str) -> BTreeSet<String> {
    DECLARED_NAME
        .captures_iter(source)
        .map(|caps| classify(&caps[1]))
        .filter(|name| name.is_base())
        .map(|name| name.scale().to_string())
        .collect()
}
