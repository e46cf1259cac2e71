//! The resolver context: cache → throttle → probe/assembler → fallback.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::join_all;
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::cache::TtlCache;
use crate::catalog::FallbackCatalog;
use crate::error::{FetchError, FetchResult};
use crate::http::{Host, HttpClient, ReqwestHttpClient, RetryingFetcher};
use crate::key::{validate_identifier, Domain, ResolutionKey, TextKind};
use crate::library::{ContentEntry, Library, COLORS_DOCUMENTATION_PAGES, WEBSITE_REPO};
use crate::probe::probe_text;
use crate::scale::{
    canonical_scale, declared_names, BlockExtractor, ColorScaleRecord, ScaleAssembler,
};
use crate::settings::ResolverSettings;
use crate::throttle::RequestThrottle;

/// Ordered documentation pages keyed like `overview_usage`.
pub type DocumentBundle = IndexMap<String, String>;

/// Owns the caches and the outbound throttle. Share it behind an `Arc`; all operations
/// take `&self`.
pub struct Resolver {
    settings: ResolverSettings,
    fetcher: RetryingFetcher,
    throttle: RequestThrottle,
    token: RwLock<Option<String>>,
    assembler: ScaleAssembler,
    catalog: FallbackCatalog,
    texts: TtlCache<ResolutionKey, String>,
    listings: TtlCache<ResolutionKey, Vec<String>>,
    scales: TtlCache<ResolutionKey, ColorScaleRecord>,
    documents: TtlCache<ResolutionKey, DocumentBundle>,
}

impl Resolver {
    /// Resolver backed by a real reqwest client.
    pub fn new(settings: ResolverSettings) -> Self {
        Self::with_client(settings, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_client(settings: ResolverSettings, client: Arc<dyn HttpClient>) -> Self {
        let fetcher = RetryingFetcher::new(client)
            .with_policy(settings.retry.clone())
            .with_timeout(settings.request_timeout);
        Self {
            token: RwLock::new(settings.token.clone()),
            settings,
            fetcher,
            throttle: RequestThrottle::new(),
            assembler: ScaleAssembler::default(),
            catalog: FallbackCatalog,
            texts: TtlCache::new(),
            listings: TtlCache::new(),
            scales: TtlCache::new(),
            documents: TtlCache::new(),
        }
    }

    /// Replaces the scale parser.
    pub fn with_parser(mut self, parser: Arc<dyn BlockExtractor>) -> Self {
        self.assembler = ScaleAssembler::new(parser);
        self
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Sets or clears the bearer token used for subsequent metadata calls.
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token.filter(|t| !t.trim().is_empty());
    }

    /// Drops every cached entry.
    pub async fn clear_cache(&self) {
        self.texts.clear().await;
        self.listings.clear().await;
        self.scales.clear().await;
        self.documents.clear().await;
    }

    /// Identifiers available in `library`. Listing failures that a static list can stand
    /// in for degrade to the [`FallbackCatalog`]; fallback results are not cached.
    pub async fn list(&self, library: Library) -> FetchResult<Vec<String>> {
        match self.list_remote(library).await {
            Ok(names) => Ok(names),
            Err(e) if e.allows_fallback() => {
                tracing::warn!(%library, error = %e, "listing unavailable, using fallback catalog");
                Ok(self.catalog.identifiers(library))
            }
            Err(e) => Err(e),
        }
    }

    /// Source or usage text for a component. Never falls back.
    ///
    /// For [`Library::Colors`] the source is the assembled scale and the usage is the
    /// documentation bundle, both as pretty JSON.
    pub async fn get_text(
        &self,
        kind: TextKind,
        library: Library,
        identifier: &str,
    ) -> FetchResult<String> {
        let identifier = validate_identifier(identifier)?;
        match (library, kind) {
            (Library::Colors, TextKind::Source) => to_json(&self.get_scale(identifier).await?),
            (Library::Colors, TextKind::Usage) => to_json(&self.colors_documentation().await?),
            (lib, TextKind::Source) => {
                let key = ResolutionKey::new(Domain::ComponentSource(lib), identifier);
                self.texts
                    .get_or_compute(key.clone(), self.settings.cache_ttl, || {
                        self.probe_source(lib, &key.identifier)
                    })
                    .await
            }
            (lib, TextKind::Usage) => {
                let key = ResolutionKey::new(Domain::ComponentUsage(lib), identifier);
                self.texts
                    .get_or_compute(key.clone(), self.settings.cache_ttl, || {
                        self.probe_usage(lib, &key.identifier)
                    })
                    .await
            }
        }
    }

    /// Light/dark (or overlay) token tables for one color scale. Never falls back.
    pub async fn get_scale(&self, identifier: &str) -> FetchResult<ColorScaleRecord> {
        let identifier = validate_identifier(identifier)?;
        let canonical = canonical_scale(identifier)?;
        let scale = canonical.scale();
        let key = ResolutionKey::new(Domain::ScaleTokens, scale);
        self.scales
            .get_or_compute(key, self.settings.cache_ttl, || {
                self.assembler.assemble(scale, |stem| async move {
                    let path = format!("src/{}.ts", stem);
                    self.raw(Library::Colors.repo(), &path).await
                })
            })
            .await
    }

    /// Base scale names declared across the colors sources, sorted. Degrades to the colors
    /// catalog when listing fails or nothing parses.
    pub async fn scale_names(&self) -> FetchResult<Vec<String>> {
        let key = ResolutionKey::new(Domain::ScaleNames, Library::Colors.as_str());
        let found = self
            .listings
            .get_or_compute(key, self.settings.cache_ttl, || self.discover_scale_names())
            .await;
        match found {
            Ok(names) => Ok(names),
            Err(e) if e.allows_fallback() => {
                tracing::warn!(error = %e, "scale discovery failed, using fallback catalog");
                Ok(self.catalog.identifiers(Library::Colors))
            }
            Err(e) => Err(e),
        }
    }

    /// Getting-started guide (installation page for colors).
    pub async fn getting_started(&self, library: Library) -> FetchResult<String> {
        let key = ResolutionKey::new(Domain::GettingStarted(library), library.as_str());
        self.texts
            .get_or_compute(key, self.settings.cache_ttl, || async move {
                self.raw(WEBSITE_REPO, library.getting_started_path())
                    .await
                    .map_err(|e| rename_not_found(e, format!("{} getting-started guide", library)))
            })
            .await
    }

    /// The colors documentation pages. A page that cannot be fetched is recorded as an
    /// error line in its slot; the bundle itself only fails validation-free. Cached once at
    /// least one page resolved.
    pub async fn colors_documentation(&self) -> FetchResult<DocumentBundle> {
        let key = ResolutionKey::new(Domain::ColorsDocumentation, Library::Colors.as_str());
        if let Some(bundle) = self.documents.get(&key, self.settings.cache_ttl).await {
            return Ok(bundle);
        }

        let mut bundle = DocumentBundle::new();
        let mut resolved = 0usize;
        for page in COLORS_DOCUMENTATION_PAGES {
            let slot = page.trim_end_matches(".mdx").replacen('/', "_", 1);
            let path = format!("data/colors/docs/{}", page);
            match self.raw(WEBSITE_REPO, &path).await {
                Ok(content) => {
                    resolved += 1;
                    bundle.insert(slot, content);
                }
                Err(e) => {
                    bundle.insert(slot, format!("Error fetching {}: {}", page, e));
                }
            }
        }
        if resolved > 0 {
            self.documents.insert(key, bundle.clone()).await;
        } else {
            tracing::warn!("no colors documentation page could be fetched");
        }
        Ok(bundle)
    }

    async fn list_remote(&self, library: Library) -> FetchResult<Vec<String>> {
        let key = ResolutionKey::new(Domain::Listing(library), library.as_str());
        self.listings
            .get_or_compute(key, self.settings.cache_ttl, || async move {
                let entries = self.contents(library.repo(), library.listing_path()).await?;
                let names: IndexSet<String> = entries
                    .iter()
                    .filter_map(|entry| library.listing_identifier(entry))
                    .collect();
                if names.is_empty() {
                    return Err(FetchError::NotFound(format!(
                        "no {} entries under {}",
                        library,
                        library.listing_path()
                    )));
                }
                tracing::debug!(%library, count = names.len(), "listing resolved");
                Ok(names.into_iter().collect())
            })
            .await
    }

    async fn probe_source(&self, library: Library, name: &str) -> FetchResult<String> {
        let base = library.source_base(name).ok_or_else(|| {
            FetchError::InvalidRequest(format!("{} has no component sources", library))
        })?;
        let candidates = library.source_candidates(name);
        probe_text(name, &base, &candidates, |path| async move {
            self.raw(library.repo(), &path).await
        })
        .await
        .map_err(|e| rename_not_found(e, format!("{} component \"{}\"", library, name)))
    }

    async fn probe_usage(&self, library: Library, name: &str) -> FetchResult<String> {
        let base = library.usage_base(name);
        probe_text(name, &base, &[".mdx".to_string()], |path| async move {
            self.raw(WEBSITE_REPO, &path).await
        })
        .await
        .map_err(|e| rename_not_found(e, format!("{} documentation for \"{}\"", library, name)))
    }

    async fn discover_scale_names(&self) -> FetchResult<Vec<String>> {
        let files = self.list_remote(Library::Colors).await?;
        let sources = join_all(files.iter().map(|file| async move {
            let path = format!("src/{}.ts", file);
            self.raw(Library::Colors.repo(), &path).await
        }))
        .await;

        let mut names = BTreeSet::new();
        for (file, source) in files.iter().zip(sources) {
            match source {
                Ok(text) => names.extend(declared_names(&text)),
                Err(e) => tracing::debug!(file = %file, error = %e, "skipping color source"),
            }
        }
        if names.is_empty() {
            return Err(FetchError::NotFound("no color scales declared".into()));
        }
        Ok(names.into_iter().collect())
    }

    /// Raw file text. Carries the user agent only; the token never leaves for this host.
    async fn raw(&self, repo: &str, path: &str) -> FetchResult<String> {
        let url = self.settings.raw_url(repo, path);
        let headers = [("User-Agent".to_string(), self.settings.user_agent.clone())];
        self.throttle
            .admit(self.fetcher.fetch(Host::Raw, &url, &headers))
            .await
    }

    /// Directory listing from the contents API.
    async fn contents(&self, repo: &str, path: &str) -> FetchResult<Vec<ContentEntry>> {
        let url = self.settings.contents_url(repo, path);
        let mut headers = vec![
            (
                "Accept".to_string(),
                "application/vnd.github+json".to_string(),
            ),
            ("User-Agent".to_string(), self.settings.user_agent.clone()),
        ];
        let token = self.token.read().await.clone();
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        let body = self
            .throttle
            .admit(self.fetcher.fetch(Host::Metadata, &url, &headers))
            .await?;
        parse_listing(&body)
    }
}

/// Entries of a contents-API response. Items that are not `{type, name}` objects are
/// skipped; a body that is not a JSON array is malformed.
fn parse_listing(body: &str) -> FetchResult<Vec<ContentEntry>> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(format!("listing is not JSON: {}", e)))?;
    let items = value
        .as_array()
        .ok_or_else(|| FetchError::MalformedResponse("listing is not a JSON array".into()))?;
    Ok(items
        .iter()
        .filter_map(|item| ContentEntry::deserialize(item).ok())
        .collect())
}

fn rename_not_found(error: FetchError, what: String) -> FetchError {
    match error {
        FetchError::NotFound(_) => FetchError::NotFound(what),
        other => other,
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> FetchResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| FetchError::MalformedResponse(format!("serialize: {}", e)))
}
