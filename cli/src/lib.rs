//! radix-mcp binary support: builds the resolver and tool registry from [`config::Settings`]
//! and serves them over stdio (see [`server`]).

pub mod server;
pub mod transport;

pub use server::{McpServer, ServeError};

use std::sync::Arc;

use radix::{register_tools, LibrarySelection, Resolver, ResolverSettings, ToolRegistry, UnknownLibrary};

/// Overrides taken from the command line; `None` keeps the value from the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub library: Option<String>,
    pub github_token: Option<String>,
}

/// Applies command-line overrides on top of settings read from the environment.
pub fn merge_overrides(mut settings: config::Settings, overrides: Overrides) -> config::Settings {
    if let Some(library) = overrides.library.filter(|l| !l.trim().is_empty()) {
        settings.library = library.trim().to_string();
    }
    if let Some(token) = overrides.github_token.filter(|t| !t.trim().is_empty()) {
        settings.github_token = Some(token.trim().to_string());
    }
    settings
}

/// Resolver settings for the configured token, TTL and base URLs.
pub fn resolver_settings(settings: &config::Settings) -> ResolverSettings {
    let mut out = ResolverSettings::default().with_token(settings.github_token.clone());
    if let Some(ttl) = settings.cache_ttl {
        out = out.with_cache_ttl(ttl);
    }
    if let Some(url) = &settings.api_base_url {
        out = out.with_api_base_url(url.as_str());
    }
    if let Some(url) = &settings.raw_base_url {
        out = out.with_raw_base_url(url.as_str());
    }
    out
}

/// Registry with the tools of the configured library selection.
pub fn build_registry(settings: &config::Settings) -> Result<ToolRegistry, UnknownLibrary> {
    let selection: LibrarySelection = settings.library.parse()?;
    let resolver = Arc::new(Resolver::new(resolver_settings(settings)));
    let mut registry = ToolRegistry::new();
    register_tools(&mut registry, resolver, selection);
    tracing::info!(library = %selection, tools = registry.len(), "tool registry ready");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn overrides_replace_env_values_unless_blank() {
        let env = config::Settings {
            github_token: Some("from_env".into()),
            ..Default::default()
        };
        let merged = merge_overrides(
            env.clone(),
            Overrides {
                library: Some("colors".into()),
                github_token: Some("  ".into()),
            },
        );
        assert_eq!(merged.library, "colors");
        assert_eq!(merged.github_token.as_deref(), Some("from_env"));

        let merged = merge_overrides(env, Overrides::default());
        assert_eq!(merged.library, "all");
    }

    #[test]
    fn resolver_settings_carry_token_ttl_and_urls() {
        let settings = config::Settings {
            github_token: Some("ghp_1".into()),
            cache_ttl: Some(Duration::from_secs(60)),
            api_base_url: Some("http://127.0.0.1:9/".into()),
            ..Default::default()
        };
        let out = resolver_settings(&settings);
        assert_eq!(out.token.as_deref(), Some("ghp_1"));
        assert_eq!(out.cache_ttl, Duration::from_secs(60));
        assert_eq!(out.api_base_url, "http://127.0.0.1:9");
        assert_eq!(out.raw_base_url, radix::settings::DEFAULT_RAW_BASE_URL);
    }

    #[test]
    fn registry_follows_library_selection() {
        let all = build_registry(&config::Settings::default()).unwrap();
        assert_eq!(all.len(), 9);

        let primitives = build_registry(&config::Settings {
            library: "primitives".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(primitives.len(), 3);
        assert!(primitives.contains("primitives_list_components"));

        let err = build_registry(&config::Settings {
            library: "icons".into(),
            ..Default::default()
        });
        assert!(err.is_err());
    }
}
