//! Domain service - purge dispatch orchestration

use super::backend::PurgeBackend;
use super::collection::PurgeRequestCollection;
use super::context::RequestContext;
use super::sanitize::{coerce_seconds, sanitize_surrogate_key};
use crate::config::Config;
use crate::contract::{
    CacheControlDirective, PurgeError, PurgeKind, PurgeOptions, PurgeOutcome, PurgeRequest,
    PurgeResponse, STALE_WHILE_ERROR, STALE_WHILE_REVALIDATE,
};
use std::sync::Arc;

/// Domain service for purge dispatch and response header composition
pub struct Service {
    config: Arc<Config>,
    backend: Arc<dyn PurgeBackend>,
}

impl Service {
    /// Create a new service instance
    pub fn new(config: Arc<Config>, backend: Arc<dyn PurgeBackend>) -> Self {
        Self { config, backend }
    }

    /// Resolved configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fresh header context seeded from configuration
    pub fn new_context(&self) -> RequestContext {
        RequestContext::new(&self.config)
    }

    // ===== Purge Operations =====

    /// Purge a URL, or the URL and its related URLs when `options.related` is set
    pub async fn purge_url(
        &self,
        url: &str,
        options: PurgeOptions,
    ) -> Result<PurgeOutcome, PurgeError> {
        let url = url.trim();

        if options.related {
            let mut collection = PurgeRequestCollection::new(url, options);
            tracing::debug!(urls = ?collection.urls(), "dispatching related purge");
            let purge_options = collection.purge_options();
            collection
                .purge_related(self.backend.as_ref(), purge_options)
                .await?;
            return Ok(PurgeOutcome::Batch(collection.into_result()));
        }

        self.dispatch(PurgeRequest::new(PurgeKind::Url, url, options))
            .await
            .map(PurgeOutcome::Single)
    }

    /// Purge every object tagged with a surrogate key
    pub async fn purge_surrogate_key(
        &self,
        key: &str,
        options: PurgeOptions,
    ) -> Result<PurgeResponse, PurgeError> {
        let key = sanitize_surrogate_key(key);
        self.dispatch(PurgeRequest::new(PurgeKind::SurrogateKey, key, options))
            .await
    }

    /// Purge the whole service cache
    ///
    /// `allow_all` defaults to the configured permission; an explicit value
    /// in `options` wins.
    pub async fn purge_all(&self, mut options: PurgeOptions) -> Result<PurgeResponse, PurgeError> {
        options.allow_all = Some(options.allow_all.unwrap_or(self.config.allow_purge_all));
        self.dispatch(PurgeRequest::new(PurgeKind::All, "", options))
            .await
    }

    // ===== Header Operations =====

    /// Add a surrogate key to the response, returning all keys so far
    pub fn add_surrogate_key(&self, context: &mut RequestContext, key: &str) -> Vec<String> {
        context.add_key(key).to_vec()
    }

    /// Set the surrogate-control TTL for the response.
    ///
    /// Zero is returned as-is without touching the context; any other value
    /// is taken as its absolute value and the effective TTL is returned.
    pub fn set_ttl(&self, context: &mut RequestContext, seconds: i64) -> i64 {
        if seconds == 0 {
            return seconds;
        }
        let effective = context.set_ttl(seconds.unsigned_abs());
        i64::try_from(effective).unwrap_or(i64::MAX)
    }

    /// Set the surrogate-control TTL from text input (query string, CLI).
    ///
    /// `""` and `"0"` count as empty and leave the context untouched, returning
    /// `None`. Any other text is coerced with [`coerce_seconds`] and applied,
    /// so unparseable text such as `"abc"` sets a TTL of zero.
    pub fn set_ttl_from_text(&self, context: &mut RequestContext, raw: &str) -> Option<u64> {
        if raw.is_empty() || raw == "0" {
            return None;
        }
        Some(context.set_ttl(coerce_seconds(raw)))
    }

    /// Set the stale-while-revalidate directive, returning all directives
    pub fn set_stale_while_revalidate(
        &self,
        context: &mut RequestContext,
        seconds: u64,
    ) -> Vec<CacheControlDirective> {
        context.add_cache_control_header(seconds, STALE_WHILE_REVALIDATE)
    }

    /// Set the stale-while-error directive, returning all directives
    pub fn set_stale_while_error(
        &self,
        context: &mut RequestContext,
        seconds: u64,
    ) -> Vec<CacheControlDirective> {
        context.add_cache_control_header(seconds, STALE_WHILE_ERROR)
    }

    // ===== Helper Methods =====

    async fn dispatch(&self, request: PurgeRequest) -> Result<PurgeResponse, PurgeError> {
        tracing::debug!(kind = %request.kind, target = %request.target, "dispatching purge");

        match self.backend.purge(&request).await {
            Ok(response) => {
                tracing::info!(
                    kind = %request.kind,
                    target = %request.target,
                    status = response.status,
                    "purge completed"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(kind = %request.kind, target = %request.target, error = %e, "purge failed");
                Err(e)
            }
        }
    }
}
