//! Shared service plumbing for the Lumiere workspace: health endpoints,
//! tracing setup, response serialization helpers, request-id middleware,
//! and a small TTL cache.

pub mod cache;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
