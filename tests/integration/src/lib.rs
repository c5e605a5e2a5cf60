//! Integration test utilities for the membership API
//!
//! Spawns the real router on a local port, backed by in-memory storage and
//! a recording mail sender, and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
