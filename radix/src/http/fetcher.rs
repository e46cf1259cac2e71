//! Single GET with bounded timeout and retry on transient statuses.

use std::sync::Arc;
use std::time::Duration;

use super::{HttpClient, HttpRequest, RetryPolicy, TransportError};
use crate::error::{FetchError, FetchResult};

/// Which remote host class a request targets. The metadata API also retries 413.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// `api.github.com` contents endpoint.
    Metadata,
    /// `raw.githubusercontent.com` file host.
    Raw,
}

impl Host {
    pub fn is_transient(self, status: u16) -> bool {
        match status {
            408 | 429 | 500 | 502 | 503 | 504 => true,
            413 => self == Host::Metadata,
            _ => false,
        }
    }
}

/// Performs one logical GET: the first attempt plus up to `policy` retries for transient
/// statuses. 401/403/404 and transport failures are returned immediately.
pub struct RetryingFetcher {
    client: Arc<dyn HttpClient>,
    policy: RetryPolicy,
    timeout: Duration,
}

impl RetryingFetcher {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            policy: RetryPolicy::default(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn fetch(
        &self,
        host: Host,
        url: &str,
        headers: &[(String, String)],
    ) -> FetchResult<String> {
        let request = HttpRequest {
            url: url.to_string(),
            headers: headers.to_vec(),
            timeout: self.timeout,
        };
        let mut attempt = 0;
        loop {
            let response = match self.client.get(&request).await {
                Ok(response) => response,
                Err(TransportError::Timeout) => {
                    return Err(FetchError::Timeout(format!(
                        "{} (no response within {:?})",
                        url, self.timeout
                    )))
                }
                Err(TransportError::Other(message)) => {
                    return Err(FetchError::Timeout(format!("{}: {}", url, message)))
                }
            };

            if (200..300).contains(&response.status) {
                return Ok(response.body);
            }

            if host.is_transient(response.status) && self.policy.should_retry(attempt) {
                let delay = response
                    .retry_after
                    .map(|hint| hint.min(self.policy.max_interval()))
                    .unwrap_or_else(|| self.policy.delay(attempt));
                tracing::debug!(
                    url,
                    status = response.status,
                    retry = attempt + 1,
                    ?delay,
                    "transient status, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Err(classify_status(host, url, response.status));
        }
    }
}

fn classify_status(host: Host, url: &str, status: u16) -> FetchError {
    match status {
        401 => FetchError::Unauthorized(url.to_string()),
        403 => FetchError::RateLimited(url.to_string()),
        404 => FetchError::NotFound(url.to_string()),
        s if host.is_transient(s) => {
            FetchError::Timeout(format!("{} (status {} after retries)", url, s))
        }
        s => FetchError::Upstream {
            status: Some(s),
            message: url.to_string(),
        },
    }
}
