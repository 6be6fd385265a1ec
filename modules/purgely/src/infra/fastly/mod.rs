//! Fastly purge API backend

mod client;

pub use client::FastlyClient;
