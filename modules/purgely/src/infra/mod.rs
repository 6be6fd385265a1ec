//! Infrastructure layer - CDN backends

pub mod fastly;
