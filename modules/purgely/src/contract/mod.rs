//! Contract layer - public API for purge dispatch
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::PurgelyApi;
pub use error::PurgeError;
pub use model::{
    CacheControlDirective, PurgeKind, PurgeOptions, PurgeOutcome, PurgeRequest, PurgeResponse,
    STALE_WHILE_ERROR, STALE_WHILE_REVALIDATE,
};
