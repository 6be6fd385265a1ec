//! Purgely Module
//!
//! Fastly purge dispatch and per-request surrogate header composition.
//! Purges are addressed by URL, by surrogate key, or as a full-service purge;
//! responses carry `Surrogate-Key`, `Surrogate-Control` and `Cache-Control`
//! headers assembled in a [`domain::RequestContext`].

// Public exports
pub mod contract;
pub use contract::{
    client::PurgelyApi, error::PurgeError, CacheControlDirective, PurgeKind, PurgeOptions,
    PurgeOutcome, PurgeRequest, PurgeResponse,
};

pub mod config;
pub use config::{Config, ConfigError};

pub mod module;
pub use module::PurgelyModule;

pub mod domain;
pub use domain::{sanitize_surrogate_key, RequestContext, Service};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod infra;
