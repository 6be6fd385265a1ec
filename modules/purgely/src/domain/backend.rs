//! Purge backend trait
//!
//! The domain service issues purges through this trait.
//! The Fastly implementation lives in infra/fastly.

use crate::contract::{PurgeError, PurgeRequest, PurgeResponse};
use async_trait::async_trait;

/// Executes a single purge request against a CDN
#[async_trait]
pub trait PurgeBackend: Send + Sync {
    /// Execute the purge and report the CDN's answer
    async fn purge(&self, request: &PurgeRequest) -> Result<PurgeResponse, PurgeError>;
}
