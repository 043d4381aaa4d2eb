//! Auth types for the Lumiere festival service.
//!
//! Provides JWT validation, cookie builders, and the `Identity` extractor.

pub mod cookie;
pub mod identity;
pub mod token;
