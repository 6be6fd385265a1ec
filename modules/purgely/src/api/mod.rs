//! API layer - native client and REST routes

pub mod native;
pub mod rest;
