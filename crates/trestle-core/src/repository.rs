//! Artifact repository declarations and the resolution-mode policy.

use serde::{Deserialize, Serialize};
use std::fmt;

use trestle_util::errors::TrestleError;

/// Google's Maven repository.
pub const GOOGLE_MAVEN_URL: &str = "https://maven.google.com";

/// Maven Central base URL.
pub const MAVEN_CENTRAL_URL: &str = "https://repo.maven.apache.org/maven2";

/// Gradle Plugin Portal Maven endpoint.
pub const GRADLE_PLUGIN_PORTAL_URL: &str = "https://plugins.gradle.org/m2";

/// The kind of an artifact repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepositoryKind {
    Google,
    MavenCentral,
    GradlePluginPortal,
    /// A custom Maven repository identified by its URL.
    Maven,
}

impl RepositoryKind {
    /// Parse a repository shorthand such as `"google"` or `"maven-central"`.
    ///
    /// Custom repositories have no shorthand and return `None`.
    pub fn from_shorthand(name: &str) -> Option<Self> {
        match name {
            "google" => Some(Self::Google),
            "maven-central" | "mavenCentral" => Some(Self::MavenCentral),
            "gradle-plugin-portal" | "gradlePluginPortal" => Some(Self::GradlePluginPortal),
            _ => None,
        }
    }
}

/// An artifact repository, tried in declaration order during resolution.
///
/// `url` is present iff `kind` is [`RepositoryKind::Maven`]; the constructors
/// are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryDeclaration {
    kind: RepositoryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl RepositoryDeclaration {
    pub fn google() -> Self {
        Self {
            kind: RepositoryKind::Google,
            url: None,
        }
    }

    pub fn maven_central() -> Self {
        Self {
            kind: RepositoryKind::MavenCentral,
            url: None,
        }
    }

    pub fn gradle_plugin_portal() -> Self {
        Self {
            kind: RepositoryKind::GradlePluginPortal,
            url: None,
        }
    }

    /// A custom Maven repository. Trailing slashes are trimmed so that
    /// `https://jitpack.io/` and `https://jitpack.io` compare equal.
    pub fn maven(url: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            kind: RepositoryKind::Maven,
            url: Some(url.trim().trim_end_matches('/').to_string()),
        }
    }

    pub fn kind(&self) -> RepositoryKind {
        self.kind
    }

    /// The declared URL of a custom repository.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The base URL artifacts are fetched from.
    pub fn base_url(&self) -> &str {
        match self.kind {
            RepositoryKind::Google => GOOGLE_MAVEN_URL,
            RepositoryKind::MavenCentral => MAVEN_CENTRAL_URL,
            RepositoryKind::GradlePluginPortal => GRADLE_PLUGIN_PORTAL_URL,
            RepositoryKind::Maven => self.url.as_deref().unwrap_or_default(),
        }
    }
}

impl fmt::Display for RepositoryDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RepositoryKind::Google => write!(f, "google"),
            RepositoryKind::MavenCentral => write!(f, "maven-central"),
            RepositoryKind::GradlePluginPortal => write!(f, "gradle-plugin-portal"),
            RepositoryKind::Maven => write!(f, "maven({})", self.base_url()),
        }
    }
}

/// A repository as written in `Trestle.toml`: either a shorthand name or a
/// table with a custom `url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryEntry {
    Shorthand(String),
    Url { url: String },
}

impl RepositoryEntry {
    /// Convert the manifest entry into a typed declaration.
    pub fn to_declaration(&self) -> Result<RepositoryDeclaration, TrestleError> {
        match self {
            RepositoryEntry::Shorthand(name) => match RepositoryKind::from_shorthand(name.trim()) {
                Some(RepositoryKind::Google) => Ok(RepositoryDeclaration::google()),
                Some(RepositoryKind::MavenCentral) => Ok(RepositoryDeclaration::maven_central()),
                Some(RepositoryKind::GradlePluginPortal) => {
                    Ok(RepositoryDeclaration::gradle_plugin_portal())
                }
                _ => Err(TrestleError::Settings {
                    message: format!(
                        "unknown repository `{name}` (expected google, maven-central, \
                         gradle-plugin-portal, or {{ url = \"...\" }})"
                    ),
                }),
            },
            RepositoryEntry::Url { url } => {
                if url.trim().is_empty() {
                    return Err(TrestleError::Settings {
                        message: "repository url must not be empty".to_string(),
                    });
                }
                Ok(RepositoryDeclaration::maven(url.as_str()))
            }
        }
    }
}

/// Convert an ordered list of manifest entries, failing on the first bad one.
pub fn declarations_from_entries(
    entries: &[RepositoryEntry],
) -> Result<Vec<RepositoryDeclaration>, TrestleError> {
    entries.iter().map(RepositoryEntry::to_declaration).collect()
}

/// Whether centrally declared repositories override per-project ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMode {
    /// Settings repositories win; project repositories are ignored.
    #[default]
    PreferSettings,
    /// Project repositories win when a project declares any.
    PreferProject,
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMode::PreferSettings => write!(f, "PREFER_SETTINGS"),
            ResolutionMode::PreferProject => write!(f, "PREFER_PROJECT"),
        }
    }
}
