//! Author identifier extraction from profile URLs.
//!
//! A profile URL such as `https://scholar.google.com/citations?user=ABC123&hl=en`
//! names its author through the `user` query parameter. Everything else in the
//! URL (host, path, other parameters) is ignored.

use std::fmt;

use thiserror::Error;
use url::Url;

/// Query parameter that carries the author identifier.
pub const AUTHOR_QUERY_PARAM: &str = "user";

/// Errors raised while resolving a profile URL.
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    /// No author identifier could be extracted from the URL.
    #[error("invalid profile URL '{url}': {reason}\n  Suggestion: {suggestion}")]
    InvalidProfileUrl {
        /// The URL as given.
        url: String,
        /// Why no identifier was found.
        reason: String,
        /// How to fix the issue.
        suggestion: &'static str,
    },
}

impl ProfileError {
    /// Creates an `InvalidProfileUrl` error.
    #[must_use]
    pub fn invalid_profile_url(url: &str, reason: impl Into<String>) -> Self {
        Self::InvalidProfileUrl {
            url: url.to_string(),
            reason: reason.into(),
            suggestion: "Pass the full profile address, e.g. https://scholar.google.com/citations?user=<ID>",
        }
    }
}

/// Stable identifier of an author at the metadata provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorId(String);

impl AuthorId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the author identifier from a profile URL.
///
/// The first non-empty `user` query parameter wins.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidProfileUrl`] when the URL does not parse or
/// carries no non-empty `user` parameter.
pub fn resolve_author_id(profile_url: &str) -> Result<AuthorId, ProfileError> {
    let parsed = Url::parse(profile_url.trim())
        .map_err(|error| ProfileError::invalid_profile_url(profile_url, error.to_string()))?;

    parsed
        .query_pairs()
        .filter(|(key, _)| key == AUTHOR_QUERY_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .find(|value| !value.is_empty())
        .map(AuthorId)
        .ok_or_else(|| {
            ProfileError::invalid_profile_url(
                profile_url,
                format!("missing '{AUTHOR_QUERY_PARAM}' query parameter"),
            )
        })
}
