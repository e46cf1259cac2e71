//! Configuration for radix-mcp.
//!
//! Two steps:
//! 1. [`load_and_apply`] copies values from `$XDG_CONFIG_HOME/<app>/config.toml` (`[env]`
//!    table) and the project `.env` into the process environment, with priority
//!    **existing env > .env > XDG**.
//! 2. [`Settings::from_env`] reads the server's settings from the environment.

mod dotenv;
mod xdg_toml;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Application name used for the XDG config directory.
pub const APP_NAME: &str = "radix-mcp";

pub const ENV_GITHUB_TOKEN: &str = "GITHUB_PERSONAL_ACCESS_TOKEN";
pub const ENV_LIBRARY: &str = "RADIX_LIBRARY";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "RADIX_LOG_FILE";
pub const ENV_CACHE_TTL_SECS: &str = "RADIX_CACHE_TTL_SECS";
pub const ENV_API_BASE_URL: &str = "RADIX_API_BASE_URL";
pub const ENV_RAW_BASE_URL: &str = "RADIX_RAW_BASE_URL";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LIBRARY: &str = "all";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Loads the XDG `[env]` table and `.env` (from `override_dir`, else the current
/// directory) and sets every key that is not already present in the environment.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg = xdg_toml::load_env_map(&xdg_toml::config_home()?, app_name)?;
    let dotenv_dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(LoadError::DotenvRead)?,
    };
    let dotenv = dotenv::load_env_map(&dotenv_dir).map_err(LoadError::DotenvRead)?;

    for (key, value) in merge_missing(&xdg, &dotenv, |k| std::env::var_os(k).is_some()) {
        std::env::set_var(key, value);
    }
    Ok(())
}

/// Values to set for keys not yet present: `.env` beats XDG. Sorted by key.
fn merge_missing(
    xdg: &HashMap<String, String>,
    dotenv: &HashMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = xdg
        .iter()
        .filter(|(k, _)| !dotenv.contains_key(*k))
        .chain(dotenv.iter())
        .filter(|(k, _)| !is_set(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    merged.sort();
    merged
}

/// Server settings read from the environment.
///
/// `library` is kept as text; the binary parses it into a library selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub github_token: Option<String>,
    pub library: String,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub cache_ttl: Option<Duration>,
    pub api_base_url: Option<String>,
    pub raw_base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            github_token: None,
            library: DEFAULT_LIBRARY.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
            cache_ttl: None,
            api_base_url: None,
            raw_base_url: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoadError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Settings::default();
        let cache_ttl = match get(ENV_CACHE_TTL_SECS) {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| LoadError::InvalidValue {
                    key: ENV_CACHE_TTL_SECS,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };
        Ok(Self {
            github_token: get(ENV_GITHUB_TOKEN),
            library: get(ENV_LIBRARY).unwrap_or(defaults.library),
            log_level: get(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_file: get(ENV_LOG_FILE).map(PathBuf::from),
            cache_ttl,
            api_base_url: get(ENV_API_BASE_URL),
            raw_base_url: get(ENV_RAW_BASE_URL),
        })
    }
}
