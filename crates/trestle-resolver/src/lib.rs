//! Build configuration resolution: deterministic output directory layout,
//! the guarded clean task, repository deduplication and precedence, plugin
//! validation, and subproject evaluation ordering.

pub mod graph;
pub mod layout;
pub mod plan;
pub mod planner;
pub mod plugins;
pub mod repositories;
