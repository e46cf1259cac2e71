//! Normalized failure kinds for every remote call the resolver makes.

use thiserror::Error;

/// Coarse classification of a [`FetchError`], used to decide between propagating and
/// degrading (only enumeration degrades, see [`crate::Resolver::list`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    RateLimited,
    Unauthorized,
    Timeout,
    UpstreamError,
    MalformedResponse,
    InvalidRequest,
}

/// Errors surfaced by the fetch pipeline, the prober, the scale assembler and the resolver.
///
/// Raw transport and HTTP status failures are normalized into these variants by
/// [`crate::http::RetryingFetcher`]; nothing above it sees a raw status code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error(
        "GitHub API rate limit exceeded ({0}). Set GITHUB_PERSONAL_ACCESS_TOKEN for higher limits"
    )]
    RateLimited(String),
    #[error("GitHub authentication failed ({0}). Check GITHUB_PERSONAL_ACCESS_TOKEN")]
    Unauthorized(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("upstream error{}: {message}", status.map(|s| format!(" {}", s)).unwrap_or_default())]
    Upstream {
        status: Option<u16>,
        message: String,
    },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::NotFound(_) => ErrorKind::NotFound,
            FetchError::RateLimited(_) => ErrorKind::RateLimited,
            FetchError::Unauthorized(_) => ErrorKind::Unauthorized,
            FetchError::Timeout(_) => ErrorKind::Timeout,
            FetchError::Upstream { .. } => ErrorKind::UpstreamError,
            FetchError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            FetchError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// Whether enumeration may substitute the static catalog for this failure.
    pub fn allows_fallback(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NotFound
                | ErrorKind::RateLimited
                | ErrorKind::Unauthorized
                | ErrorKind::Timeout
                | ErrorKind::MalformedResponse
        )
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
