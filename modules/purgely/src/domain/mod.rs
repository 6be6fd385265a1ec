//! Domain layer - purge dispatch and request-scoped header state

pub mod backend;
pub mod collection;
pub mod context;
pub mod sanitize;
pub mod service;

pub use backend::PurgeBackend;
pub use collection::PurgeRequestCollection;
pub use context::RequestContext;
pub use sanitize::{coerce_seconds, sanitize_surrogate_key};
pub use service::Service;
