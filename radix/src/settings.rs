//! Endpoints, identity and timing used by [`crate::Resolver`].

use std::time::Duration;

use crate::cache::DEFAULT_TTL;
use crate::http::{RetryPolicy, RetryingFetcher};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_OWNER: &str = "radix-ui";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; RadixMcpServer/1.0.0)";

/// Resolver configuration. Base URLs carry no trailing slash.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub api_base_url: String,
    pub raw_base_url: String,
    pub owner: String,
    pub branch: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    pub cache_ttl: Duration,
    /// Bearer token for the metadata API. Never sent to the raw host.
    pub token: Option<String>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            raw_base_url: DEFAULT_RAW_BASE_URL.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: RetryingFetcher::DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            cache_ttl: DEFAULT_TTL,
            token: None,
        }
    }
}

impl ResolverSettings {
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_raw_base_url(mut self, url: impl Into<String>) -> Self {
        self.raw_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// `{api}/repos/{owner}/{repo}/contents/{path}`
    pub fn contents_url(&self, repo: &str, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base_url, self.owner, repo, path
        )
    }

    /// `{raw}/{owner}/{repo}/{branch}/{path}`
    pub fn raw_url(&self, repo: &str, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base_url, self.owner, repo, self.branch, path
        )
    }
}
