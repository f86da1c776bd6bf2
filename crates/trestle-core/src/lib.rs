//! Core data types for Trestle.
//!
//! This crate defines the declarative inputs of a build configuration pass:
//! the `Trestle.toml` settings manifest, repository and plugin declarations,
//! subproject nodes, `local.properties` sources, and the `BuildConfig` that
//! carries them through resolution.
//!
//! This crate is intentionally free of resolution logic.

/// Default name of the settings manifest.
pub const SETTINGS_FILE: &str = "Trestle.toml";

pub mod config;
pub mod plugin;
pub mod project;
pub mod properties;
pub mod repository;
pub mod settings;
