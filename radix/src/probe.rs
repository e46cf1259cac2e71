//! Ordered candidate-path probing: first successful fetch wins.

use std::future::Future;

use crate::error::{FetchError, FetchResult};

/// Tries `base_path + candidate` for each candidate in order and returns the first body that
/// fetches successfully. Individual failures are discarded; when every candidate fails the
/// caller gets one [`FetchError::NotFound`] naming `identifier`.
///
/// An empty candidate list is a caller bug and is reported as [`FetchError::InvalidRequest`]
/// without fetching anything.
pub async fn probe_text<F, Fut>(
    identifier: &str,
    base_path: &str,
    candidates: &[String],
    mut fetch: F,
) -> FetchResult<String>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = FetchResult<String>>,
{
    if candidates.is_empty() {
        return Err(FetchError::InvalidRequest(format!(
            "no probe candidates for \"{}\"",
            identifier
        )));
    }
    for candidate in candidates {
        let path = format!("{}{}", base_path, candidate);
        match fetch(path.clone()).await {
            Ok(body) => {
                tracing::debug!(identifier, path = %path, "probe hit");
                return Ok(body);
            }
            Err(e) => {
                tracing::debug!(identifier, path = %path, error = %e, "probe miss");
            }
        }
    }
    Err(FetchError::NotFound(format!("\"{}\"", identifier)))
}
