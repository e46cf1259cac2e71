//! # Radix
//!
//! Remote resource resolution and caching for Radix UI: component sources and usage docs
//! for **Themes** and **Primitives**, token tables for **Colors**, all read from the
//! upstream GitHub repositories on a fixed branch and cached in memory.
//!
//! ## Design principles
//!
//! - **One context object**: a [`Resolver`] owns its caches, its throttle and its HTTP
//!   client. There are no globals; share it behind an `Arc`.
//! - **One call on the wire**: every outbound request goes through a single
//!   [`RequestThrottle`], so at most one HTTP call is in flight per resolver.
//! - **Degrade only where a stand-in exists**: listings fall back to a static
//!   [`FallbackCatalog`]; content lookups always propagate [`FetchError`].
//!
//! ## Pipeline
//!
//! [`TtlCache`] → [`RequestThrottle`] → [`RetryingFetcher`] →
//! [`probe_text`] (text resources) or [`ScaleAssembler`] (color scales) → [`FallbackCatalog`]
//! (listings only).
//!
//! ## Main modules
//!
//! - [`resolver`]: [`Resolver`] with `list`, `get_text`, `get_scale`, `scale_names`,
//!   `getting_started`, `colors_documentation`, `set_token`.
//! - [`http`]: [`HttpClient`] seam, [`ReqwestHttpClient`], [`RetryingFetcher`], [`RetryPolicy`],
//!   and the scripted [`MockHttpClient`] used in tests.
//! - [`scale`]: [`ExportParser`] behind [`BlockExtractor`], [`ScaleAssembler`],
//!   [`ColorScaleRecord`].
//! - [`tools`]: [`Tool`], [`ToolRegistry`], [`register_tools`] for the per-library tools.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use radix::{Library, Resolver, ResolverSettings, TextKind};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), radix::FetchError> {
//! let resolver = Resolver::new(ResolverSettings::default());
//! let components = resolver.list(Library::Themes).await?;
//! let source = resolver
//!     .get_text(TextKind::Source, Library::Themes, &components[0])
//!     .await?;
//! let blue = resolver.get_scale("blue").await?;
//! println!("{} bytes, {} light variants", source.len(), blue.light.map_or(0, |m| m.len()));
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod catalog;
pub mod error;
pub mod http;
pub mod key;
pub mod library;
pub mod probe;
pub mod resolver;
pub mod scale;
pub mod settings;
pub mod throttle;
pub mod tools;

pub use cache::{TtlCache, DEFAULT_TTL};
pub use catalog::FallbackCatalog;
pub use error::{ErrorKind, FetchError, FetchResult};
pub use http::{
    Host, HttpClient, HttpRequest, HttpResponse, MockHttpClient, MockReply, ReqwestHttpClient,
    RetryPolicy, RetryingFetcher, TransportError,
};
pub use key::{validate_identifier, Domain, ResolutionKey, TextKind, MAX_IDENTIFIER_LEN};
pub use library::{ComponentType, ContentEntry, Library, LibrarySelection, UnknownLibrary};
pub use probe::probe_text;
pub use resolver::{DocumentBundle, Resolver};
pub use scale::{
    BlockExtractor, ColorScaleRecord, ExportParser, ScaleAssembler, TokenBlock, VariantMap,
};
pub use settings::ResolverSettings;
pub use throttle::RequestThrottle;
pub use tools::{register_tools, Tool, ToolCallContent, ToolError, ToolRegistry, ToolSpec};
