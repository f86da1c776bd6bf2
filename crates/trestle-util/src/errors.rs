use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for a build configuration pass.
///
/// Every variant is fatal: the pass aborts and no partial plan is exposed.
#[derive(Debug, Error, Diagnostic)]
pub enum TrestleError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required configuration key is absent from its property source.
    #[error("Missing configuration: `{key}` not set in {origin}")]
    #[diagnostic(help("Add `{key}=<value>` to {origin}"))]
    MissingConfiguration { key: String, origin: String },

    /// A plugin declaration has a malformed id or version.
    #[error("Invalid plugin declaration `{id}`: {reason}")]
    InvalidPluginDeclaration { id: String, reason: String },

    /// Evaluation-order dependencies between projects form a cycle.
    #[error("Cyclic evaluation dependency between projects: {}", nodes.join(" -> "))]
    #[diagnostic(help("Remove one of the `evaluation-depends-on` entries to break the cycle"))]
    CyclicDependency { nodes: Vec<String> },

    /// A path cannot be resolved, or would escape the build output root.
    #[error("Invalid path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// Invalid or malformed settings manifest (`Trestle.toml`).
    #[error("Settings error: {message}")]
    #[diagnostic(help("Check your Trestle.toml for syntax errors"))]
    Settings { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type TrestleResult<T> = miette::Result<T>;
