use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use trestle_util::errors::TrestleError;

use crate::plugin::PluginDeclaration;
use crate::repository::{RepositoryEntry, ResolutionMode};

/// Default build output directory, relative to the settings directory.
pub const DEFAULT_BUILD_DIR: &str = "../build";

/// Default property file holding machine-local paths.
pub const DEFAULT_PROPERTIES_FILE: &str = "local.properties";

/// Default key naming the SDK location inside the property file.
pub const DEFAULT_SDK_KEY: &str = "flutter.sdk";

/// Default location of the included build, relative to the SDK root.
pub const DEFAULT_INCLUDE_BUILD: &str = "packages/flutter_tools/gradle";

/// The parsed representation of a `Trestle.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Included subprojects, in declaration order (e.g. `":app"`).
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub layout: LayoutSettings,

    #[serde(default)]
    pub sdk: SdkSettings,

    #[serde(default, rename = "plugin-management")]
    pub plugin_management: PluginManagementSettings,

    #[serde(default)]
    pub plugins: Vec<PluginDeclaration>,

    #[serde(default, rename = "dependency-resolution")]
    pub dependency_resolution: DependencyResolutionSettings,

    #[serde(default)]
    pub subprojects: SubprojectSettings,

    #[serde(default)]
    pub project: BTreeMap<String, ProjectSettings>,
}

/// Output layout from `[layout]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_build_dir", rename = "build-dir")]
    pub build_dir: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            build_dir: default_build_dir(),
        }
    }
}

fn default_build_dir() -> String {
    DEFAULT_BUILD_DIR.to_string()
}

/// External SDK lookup from `[sdk]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkSettings {
    #[serde(default = "default_properties_file")]
    pub properties: String,
    #[serde(default = "default_sdk_key")]
    pub key: String,
    #[serde(default = "default_include_build", rename = "include-build")]
    pub include_build: String,
}

impl Default for SdkSettings {
    fn default() -> Self {
        Self {
            properties: default_properties_file(),
            key: default_sdk_key(),
            include_build: default_include_build(),
        }
    }
}

fn default_properties_file() -> String {
    DEFAULT_PROPERTIES_FILE.to_string()
}

fn default_sdk_key() -> String {
    DEFAULT_SDK_KEY.to_string()
}

fn default_include_build() -> String {
    DEFAULT_INCLUDE_BUILD.to_string()
}

/// Plugin repositories from `[plugin-management]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginManagementSettings {
    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,
}

/// Dependency repositories and precedence from `[dependency-resolution]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyResolutionSettings {
    #[serde(default)]
    pub mode: ResolutionMode,
    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,
}

/// Rules applied to every subproject, from `[subprojects]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubprojectSettings {
    #[serde(default, rename = "evaluation-depends-on")]
    pub evaluation_depends_on: Vec<String>,
}

/// Per-project overrides from `[project.<name>]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSettings {
    #[serde(default, rename = "evaluation-depends-on")]
    pub evaluation_depends_on: Vec<String>,
    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,
}

impl Settings {
    /// Load and parse a `Trestle.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TrestleError::Settings {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Parse a `Trestle.toml` from a string.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            TrestleError::Settings {
                message: format!("Failed to parse Trestle.toml: {e}"),
            }
            .into()
        })
    }
}
