//! Test utilities for the Lumiere festival service.
//!
//! Provides `MockAuth`, a signed-cookie factory for authenticated requests.
//! Import in `#[cfg(test)]` blocks and integration tests only — never in
//! production code.

pub mod auth;
