//! Shared utilities for Trestle.
//!
//! This crate provides cross-cutting concerns used by all other Trestle crates:
//! the error taxonomy, path helpers, and terminal status output.

pub mod errors;
pub mod fs;
pub mod progress;
