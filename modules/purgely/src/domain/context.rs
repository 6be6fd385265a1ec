//! Request-scoped surrogate header state
//!
//! One `RequestContext` is created per response. Callers thread it through
//! the service's header operations; the REST layer stores it as a request
//! extension and writes its headers onto the outgoing response.

use super::sanitize::sanitize_surrogate_key;
use crate::config::Config;
use crate::contract::{CacheControlDirective, STALE_WHILE_ERROR, STALE_WHILE_REVALIDATE};
use http::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL};

/// Header carrying the space-separated surrogate keys
pub const SURROGATE_KEY: HeaderName = HeaderName::from_static("surrogate-key");

/// Header carrying the CDN-only max-age
pub const SURROGATE_CONTROL: HeaderName = HeaderName::from_static("surrogate-control");

/// Surrogate keys, surrogate-control TTL and cache-control directives for one response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    keys: Vec<String>,
    ttl: u64,
    directives: Vec<CacheControlDirective>,
}

impl RequestContext {
    /// Start a context from configured defaults
    pub fn new(config: &Config) -> Self {
        let mut context = Self {
            keys: Vec::new(),
            ttl: config.surrogate_control_ttl,
            directives: Vec::new(),
        };

        if config.enable_stale_while_revalidate {
            context.add_cache_control_header(
                config.stale_while_revalidate_ttl,
                STALE_WHILE_REVALIDATE,
            );
        }
        if config.enable_stale_while_error {
            context.add_cache_control_header(config.stale_while_error_ttl, STALE_WHILE_ERROR);
        }

        context
    }

    /// Add a surrogate key, returning every key collected so far.
    ///
    /// Keys are sanitized; empty and duplicate keys are ignored.
    pub fn add_key(&mut self, key: &str) -> &[String] {
        let key = sanitize_surrogate_key(key);
        if !key.is_empty() && !self.keys.contains(&key) {
            self.keys.push(key);
        }
        &self.keys
    }

    /// Surrogate keys collected so far
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Replace the surrogate-control TTL, returning the effective value
    pub fn set_ttl(&mut self, seconds: u64) -> u64 {
        self.ttl = seconds;
        self.ttl
    }

    /// Current surrogate-control TTL
    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    /// Insert or replace a cache-control directive, returning all directives
    pub fn add_cache_control_header(
        &mut self,
        seconds: u64,
        directive: &str,
    ) -> Vec<CacheControlDirective> {
        match self.directives.iter_mut().find(|d| d.name == directive) {
            Some(existing) => existing.seconds = seconds,
            None => self
                .directives
                .push(CacheControlDirective::new(directive, seconds)),
        }
        self.directives.clone()
    }

    /// Cache-control directives collected so far
    pub fn directives(&self) -> &[CacheControlDirective] {
        &self.directives
    }

    /// `Surrogate-Key` header value, if any key was added
    pub fn surrogate_key_header(&self) -> Option<String> {
        if self.keys.is_empty() {
            None
        } else {
            Some(self.keys.join(" "))
        }
    }

    /// `Surrogate-Control` header value
    pub fn surrogate_control_header(&self) -> String {
        format!("max-age={}", self.ttl)
    }

    /// `Cache-Control` header value, if any directive is set
    pub fn cache_control_header(&self) -> Option<String> {
        if self.directives.is_empty() {
            return None;
        }
        let rendered: Vec<String> = self.directives.iter().map(ToString::to_string).collect();
        Some(rendered.join(", "))
    }

    /// Write the surrogate headers onto a response header map
    pub fn apply_headers(&self, headers: &mut HeaderMap) {
        let values = [
            (SURROGATE_KEY, self.surrogate_key_header()),
            (SURROGATE_CONTROL, Some(self.surrogate_control_header())),
            (CACHE_CONTROL, self.cache_control_header()),
        ];

        for (name, value) in values {
            let Some(value) = value else { continue };
            match HeaderValue::from_str(&value) {
                Ok(value) => {
                    headers.insert(name, value);
                }
                Err(e) => {
                    tracing::warn!(header = %name, error = %e, "skipping invalid header value");
                }
            }
        }
    }
}
