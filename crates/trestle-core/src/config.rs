//! The explicit configuration carried through a build configuration pass.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use trestle_util::errors::TrestleError;

use crate::plugin::PluginDeclaration;
use crate::project::{project_name, ProjectNode};
use crate::repository::{declarations_from_entries, RepositoryDeclaration, ResolutionMode};
use crate::settings::{Settings, DEFAULT_INCLUDE_BUILD, DEFAULT_PROPERTIES_FILE, DEFAULT_SDK_KEY};

/// Where to find the external SDK and which of its builds to include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    /// Property file holding the SDK path.
    pub properties_file: PathBuf,
    /// Required key naming the SDK path.
    pub key: String,
    /// Included build location, relative to the SDK root.
    pub include_build: PathBuf,
}

/// Typed declarations for one build configuration pass.
///
/// Constructed once from [`Settings`] and passed by reference to the
/// resolvers; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory containing `Trestle.toml`.
    pub settings_dir: PathBuf,
    /// Build output base as declared (relative paths are against `settings_dir`).
    pub build_dir: PathBuf,
    pub projects: Vec<ProjectNode>,
    pub plugin_repositories: Vec<RepositoryDeclaration>,
    pub dependency_repositories: Vec<RepositoryDeclaration>,
    pub resolution_mode: ResolutionMode,
    pub plugins: Vec<PluginDeclaration>,
    pub sdk: SdkConfig,
}

impl BuildConfig {
    /// An empty configuration rooted at `settings_dir`, with default layout
    /// and SDK lookup.
    pub fn new(settings_dir: &Path) -> Self {
        Self {
            settings_dir: settings_dir.to_path_buf(),
            build_dir: PathBuf::from(crate::settings::DEFAULT_BUILD_DIR),
            projects: Vec::new(),
            plugin_repositories: Vec::new(),
            dependency_repositories: Vec::new(),
            resolution_mode: ResolutionMode::default(),
            plugins: Vec::new(),
            sdk: SdkConfig {
                properties_file: settings_dir.join(DEFAULT_PROPERTIES_FILE),
                key: DEFAULT_SDK_KEY.to_string(),
                include_build: PathBuf::from(DEFAULT_INCLUDE_BUILD),
            },
        }
    }

    /// Convert parsed settings into typed declarations.
    ///
    /// Fails on unknown repository shorthands, duplicate includes, and
    /// `[project.<name>]` tables that name a project not included or one
    /// already configured under another spelling.
    pub fn from_settings(settings: &Settings, settings_dir: &Path) -> miette::Result<Self> {
        let mut seen = HashSet::new();
        let mut projects = Vec::with_capacity(settings.include.len());
        for raw in &settings.include {
            let name = project_name(raw);
            if !seen.insert(name.clone()) {
                return Err(TrestleError::Settings {
                    message: format!("project `{name}` is included more than once"),
                }
                .into());
            }
            projects.push(ProjectNode::new(&name));
        }

        let mut configured = HashSet::new();
        for key in settings.project.keys() {
            let name = project_name(key);
            if !seen.contains(&name) {
                return Err(TrestleError::Settings {
                    message: format!("[project.{key}] configures a project that is not included"),
                }
                .into());
            }
            if !configured.insert(name.clone()) {
                return Err(TrestleError::Settings {
                    message: format!("project `{name}` is configured by more than one [project] table"),
                }
                .into());
            }
        }

        for node in &mut projects {
            for dep in &settings.subprojects.evaluation_depends_on {
                if project_name(dep) != node.name() {
                    node.evaluation_depends_on.insert(project_name(dep));
                }
            }
            let overrides = settings
                .project
                .iter()
                .find(|(key, _)| project_name(key) == node.name())
                .map(|(_, v)| v);
            if let Some(overrides) = overrides {
                for dep in &overrides.evaluation_depends_on {
                    node.evaluation_depends_on.insert(project_name(dep));
                }
                node.repositories = declarations_from_entries(&overrides.repositories)?;
            }
        }

        Ok(Self {
            settings_dir: settings_dir.to_path_buf(),
            build_dir: PathBuf::from(&settings.layout.build_dir),
            projects,
            plugin_repositories: declarations_from_entries(
                &settings.plugin_management.repositories,
            )?,
            dependency_repositories: declarations_from_entries(
                &settings.dependency_resolution.repositories,
            )?,
            resolution_mode: settings.dependency_resolution.mode,
            plugins: settings.plugins.clone(),
            sdk: SdkConfig {
                properties_file: settings_dir.join(&settings.sdk.properties),
                key: settings.sdk.key.clone(),
                include_build: PathBuf::from(&settings.sdk.include_build),
            },
        })
    }

    /// Names of the included projects, in declaration order.
    pub fn project_names(&self) -> Vec<&str> {
        self.projects.iter().map(ProjectNode::name).collect()
    }
}
