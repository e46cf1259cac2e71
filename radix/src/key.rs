//! Cache slot identity and identifier validation.

use crate::error::{FetchError, FetchResult};
use crate::library::Library;

/// Longest identifier accepted from callers.
pub const MAX_IDENTIFIER_LEN: usize = 100;

/// What kind of resource a key addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    ComponentSource(Library),
    ComponentUsage(Library),
    ScaleTokens,
    Listing(Library),
    ScaleNames,
    GettingStarted(Library),
    ColorsDocumentation,
}

/// Text resources served by [`crate::Resolver::get_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    Source,
    Usage,
}

/// `(domain, identifier, sub-identifier)`; the identifier is lower-cased on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionKey {
    pub domain: Domain,
    pub identifier: String,
    pub sub: Option<String>,
}

impl ResolutionKey {
    pub fn new(domain: Domain, identifier: &str) -> Self {
        Self {
            domain,
            identifier: identifier.trim().to_lowercase(),
            sub: None,
        }
    }

    pub fn with_sub(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }
}

/// Trims `raw` and rejects identifiers that are empty, longer than
/// [`MAX_IDENTIFIER_LEN`] characters, or that could escape the resource path.
pub fn validate_identifier(raw: &str) -> FetchResult<&str> {
    let identifier = raw.trim();
    if identifier.is_empty() {
        return Err(FetchError::InvalidRequest("identifier is required".into()));
    }
    if identifier.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(FetchError::InvalidRequest(format!(
            "identifier longer than {} characters",
            MAX_IDENTIFIER_LEN
        )));
    }
    if identifier.contains("..")
        || identifier
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace())
    {
        return Err(FetchError::InvalidRequest(format!(
            "identifier \"{}\" contains path characters",
            identifier
        )));
    }
    Ok(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive_on_identifier() {
        let a = ResolutionKey::new(Domain::ComponentSource(Library::Themes), "Button");
        let b = ResolutionKey::new(Domain::ComponentSource(Library::Themes), " button ");
        assert_eq!(a, b);
        let c = ResolutionKey::new(Domain::ComponentUsage(Library::Themes), "button");
        assert_ne!(a, c);
        assert_ne!(a, a.clone().with_sub("light"));
    }

    #[test]
    fn identifier_length_bounds() {
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("   ").is_err());
        assert_eq!(validate_identifier(" dialog ").unwrap(), "dialog");
        assert!(validate_identifier(&"a".repeat(100)).is_ok());
        let err = validate_identifier(&"a".repeat(101)).unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
    }

    #[test]
    fn identifier_rejects_path_traversal() {
        for bad in ["../secrets", "a/b", "a?x=1", "two words"] {
            assert!(validate_identifier(bad).is_err(), "{}", bad);
        }
    }
}
