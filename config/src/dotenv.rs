//! `.env` parsing. Values are returned, never applied here.

use std::collections::HashMap;
use std::path::Path;

/// `KEY=VALUE` lines. Blank lines and `#` comment lines are skipped, an optional `export `
/// prefix is dropped, keys and values are trimmed. Double-quoted values unescape `\"`;
/// single-quoted values are taken literally. A line without `=` or with an empty key is
/// ignored.
pub(crate) fn parse_dotenv(content: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        out.insert(key.to_string(), unquote(value.trim()));
    }
    out
}

fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return value[1..value.len() - 1].replace("\\\"", "\"");
    }
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return value[1..value.len() - 1].to_string();
    }
    value.to_string()
}

/// Pairs from `<dir>/.env`; a missing file is an empty map.
pub fn load_env_map(dir: &Path) -> std::io::Result<HashMap<String, String>> {
    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(parse_dotenv(&content))
}
