//! Contract models for purge dispatch
//!
//! These models are transport-agnostic and shared by the domain service,
//! the Fastly backend and the API layers.

use chrono::{DateTime, Utc};
use std::fmt;

/// Cache-control directive name for serving stale content during revalidation
pub const STALE_WHILE_REVALIDATE: &str = "stale-while-revalidate";

/// Cache-control directive name for serving stale content while origin errors
pub const STALE_WHILE_ERROR: &str = "stale-while-error";

/// What a purge request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurgeKind {
    /// A single URL
    Url,
    /// Every object tagged with a surrogate key
    SurrogateKey,
    /// The whole service cache
    All,
}

impl PurgeKind {
    /// Wire name of the purge kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::SurrogateKey => "surrogate-key",
            Self::All => "all",
        }
    }
}

impl fmt::Display for PurgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call purge options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeOptions {
    /// Purge the URL together with its related URLs in one batch
    pub related: bool,
    /// URLs purged alongside the primary URL when `related` is set
    pub related_urls: Vec<String>,
    /// Permission to run a full-service purge; `None` falls back to configuration
    pub allow_all: Option<bool>,
    /// Mark content stale instead of evicting it
    pub soft: bool,
}

impl PurgeOptions {
    /// Options for a batched purge over the given related URLs
    pub fn related<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            related: true,
            related_urls: urls.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Enable soft purging
    pub fn with_soft(mut self, soft: bool) -> Self {
        self.soft = soft;
        self
    }

    /// Set the full-purge permission explicitly
    pub fn with_allow_all(mut self, allow_all: bool) -> Self {
        self.allow_all = Some(allow_all);
        self
    }
}

/// A single purge as handed to a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeRequest {
    /// Purge kind
    pub kind: PurgeKind,
    /// URL, surrogate key, or empty for `All`
    pub target: String,
    /// Options for this request
    pub options: PurgeOptions,
}

impl PurgeRequest {
    /// Create a new purge request
    pub fn new(kind: PurgeKind, target: impl Into<String>, options: PurgeOptions) -> Self {
        Self {
            kind,
            target: target.into(),
            options,
        }
    }
}

/// Result of one executed purge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeResponse {
    /// Purge kind
    pub kind: PurgeKind,
    /// Purged target
    pub target: String,
    /// HTTP status returned by the CDN
    pub status: u16,
    /// Status field reported by the CDN (e.g. "ok")
    pub status_text: Option<String>,
    /// Purge identifier reported by the CDN
    pub id: Option<String>,
    /// When the purge completed
    pub purged_at: DateTime<Utc>,
}

/// Outcome of a purge dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeOutcome {
    /// One purge request was issued
    Single(PurgeResponse),
    /// A related purge issued one request per URL, in order
    Batch(Vec<PurgeResponse>),
}

impl PurgeOutcome {
    /// All responses contained in the outcome
    pub fn responses(&self) -> &[PurgeResponse] {
        match self {
            Self::Single(response) => std::slice::from_ref(response),
            Self::Batch(responses) => responses,
        }
    }

    /// Whether this outcome came from the batched path
    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }
}

/// A `name=seconds` cache-control directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheControlDirective {
    /// Directive name
    pub name: String,
    /// Directive value in seconds
    pub seconds: u64,
}

impl CacheControlDirective {
    /// Create a new directive
    pub fn new(name: impl Into<String>, seconds: u64) -> Self {
        Self {
            name: name.into(),
            seconds,
        }
    }
}

impl fmt::Display for CacheControlDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purge_kind_wire_names() {
        assert_eq!(PurgeKind::Url.as_str(), "url");
        assert_eq!(PurgeKind::SurrogateKey.to_string(), "surrogate-key");
        assert_eq!(PurgeKind::All.as_str(), "all");
    }

    #[test]
    fn test_related_options() {
        let options = PurgeOptions::related(["https://example.com/feed/"]).with_soft(true);
        assert!(options.related);
        assert!(options.soft);
        assert_eq!(options.related_urls, vec!["https://example.com/feed/".to_string()]);
        assert_eq!(options.allow_all, None);
    }

    #[test]
    fn test_directive_display() {
        let directive = CacheControlDirective::new(STALE_WHILE_ERROR, 60);
        assert_eq!(directive.to_string(), "stale-while-error=60");
    }
}
