//! Batched purge over a URL and its related URLs
//!
//! The collection does not discover related URLs; callers list them in
//! `PurgeOptions::related_urls`. URLs are purged one at a time in order and
//! the first failure aborts the batch.

use super::backend::PurgeBackend;
use crate::contract::{PurgeError, PurgeKind, PurgeOptions, PurgeRequest, PurgeResponse};

/// An ordered set of URLs purged together
#[derive(Debug, Clone)]
pub struct PurgeRequestCollection {
    urls: Vec<String>,
    purge_options: PurgeOptions,
    result: Vec<PurgeResponse>,
}

impl PurgeRequestCollection {
    /// Build the collection from the primary URL and the caller's options
    pub fn new(url: &str, options: PurgeOptions) -> Self {
        let mut urls: Vec<String> = Vec::with_capacity(options.related_urls.len() + 1);
        for candidate in std::iter::once(url).chain(options.related_urls.iter().map(String::as_str)) {
            let candidate = candidate.trim();
            if !candidate.is_empty() && !urls.iter().any(|u| u == candidate) {
                urls.push(candidate.to_string());
            }
        }

        let purge_options = PurgeOptions {
            related: false,
            related_urls: Vec::new(),
            ..options
        };

        Self {
            urls,
            purge_options,
            result: Vec::new(),
        }
    }

    /// URLs in purge order, primary first
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Options applied to every individual purge in the batch
    pub fn purge_options(&self) -> PurgeOptions {
        self.purge_options.clone()
    }

    /// Purge every URL in the collection with the given options
    pub async fn purge_related(
        &mut self,
        backend: &dyn PurgeBackend,
        options: PurgeOptions,
    ) -> Result<(), PurgeError> {
        if self.urls.is_empty() {
            return Err(PurgeError::validation("no URL to purge"));
        }

        self.result.clear();
        for url in &self.urls {
            let request = PurgeRequest::new(PurgeKind::Url, url.clone(), options.clone());
            let response = backend.purge(&request).await.map_err(|e| {
                tracing::warn!(url = %url, error = %e, "related purge aborted");
                e
            })?;
            self.result.push(response);
        }

        tracing::debug!(count = self.result.len(), "related purge completed");
        Ok(())
    }

    /// Responses collected by the last `purge_related` call
    pub fn get_result(&self) -> &[PurgeResponse] {
        &self.result
    }

    /// Consume the collection, keeping its responses
    pub fn into_result(self) -> Vec<PurgeResponse> {
        self.result
    }
}
