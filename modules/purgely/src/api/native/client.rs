//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{PurgeError, PurgeOptions, PurgeOutcome, PurgeResponse, PurgelyApi};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// Used by embedding code that purges without going through HTTP.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PurgelyApi for NativeClient {
    async fn purge_url(
        &self,
        url: &str,
        options: PurgeOptions,
    ) -> Result<PurgeOutcome, PurgeError> {
        self.service.purge_url(url, options).await
    }

    async fn purge_surrogate_key(
        &self,
        key: &str,
        options: PurgeOptions,
    ) -> Result<PurgeResponse, PurgeError> {
        self.service.purge_surrogate_key(key, options).await
    }

    async fn purge_all(&self, options: PurgeOptions) -> Result<PurgeResponse, PurgeError> {
        self.service.purge_all(options).await
    }
}
