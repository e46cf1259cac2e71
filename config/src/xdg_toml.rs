//! `[env]` table of `<config home>/<app>/config.toml`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// `$XDG_CONFIG_HOME` when set and non-empty, else the platform config directory.
pub(crate) fn config_home() -> Result<PathBuf, LoadError> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .ok_or_else(|| LoadError::XdgPath("no config directory for this platform".into()))
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

/// Env pairs from the `[env]` table. A missing file or table is an empty map.
pub fn load_env_map(config_home: &Path, app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let path = config_home.join(app_name).join("config.toml");
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let config: ConfigFile = toml::from_str(&content)?;
    Ok(config.env)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(app: &str, body: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join(app);
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), body).unwrap();
        dir
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_map(dir.path(), "radix-mcp").unwrap().is_empty());
    }

    #[test]
    fn reads_env_table_only() {
        let dir = write_config(
            "radix-mcp",
            r#"
[env]
GITHUB_PERSONAL_ACCESS_TOKEN = "ghp_xdg"
LOG_LEVEL = "debug"

[other]
ignored = "yes"
"#,
        );
        let map = load_env_map(dir.path(), "radix-mcp").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("LOG_LEVEL").map(String::as_str), Some("debug"));
    }

    #[test]
    fn file_without_env_table_is_empty() {
        let dir = write_config("radix-mcp", "[other]\nkey = \"v\"\n");
        assert!(load_env_map(dir.path(), "radix-mcp").unwrap().is_empty());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let dir = write_config("radix-mcp", "not valid [[[\n");
        let result = load_env_map(dir.path(), "radix-mcp");
        assert!(matches!(result, Err(LoadError::XdgParse(_))));
    }
}
