//! Native client trait for in-process purge dispatch
//!
//! Other components embed Purgely through this trait.
//! NO HTTP between caller and service - direct function calls.

use super::{
    error::PurgeError,
    model::{PurgeOptions, PurgeOutcome, PurgeResponse},
};
use async_trait::async_trait;

/// Purgely API for in-process callers
#[async_trait]
pub trait PurgelyApi: Send + Sync {
    /// Purge a URL, or a batch of related URLs when `options.related` is set
    async fn purge_url(&self, url: &str, options: PurgeOptions)
        -> Result<PurgeOutcome, PurgeError>;

    /// Purge every object tagged with a surrogate key
    async fn purge_surrogate_key(
        &self,
        key: &str,
        options: PurgeOptions,
    ) -> Result<PurgeResponse, PurgeError>;

    /// Purge the whole service cache
    async fn purge_all(&self, options: PurgeOptions) -> Result<PurgeResponse, PurgeError>;
}
