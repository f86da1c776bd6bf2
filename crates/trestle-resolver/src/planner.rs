//! Repository, plugin and evaluation-order planning.

use std::path::{Path, PathBuf};

use trestle_core::config::BuildConfig;
use trestle_core::plugin::PluginDeclaration;
use trestle_core::properties::PropertySource;
use trestle_core::repository::RepositoryDeclaration;
use trestle_util::errors::TrestleError;
use trestle_util::fs::normalize;

use crate::graph::EvaluationGraph;
use crate::plugins::resolve_plugins;
use crate::repositories::{dedup_repositories, effective_repositories, RepositorySource};

/// Receives the external builds the configuration pass includes.
///
/// The build executor decides what including a build means; the planner
/// only reports the path.
pub trait ExternalBuilds {
    fn include_external_build(&mut self, path: &Path) -> miette::Result<()>;
}

/// An [`ExternalBuilds`] collaborator that records included paths in order.
#[derive(Debug, Clone, Default)]
pub struct IncludedBuilds {
    paths: Vec<PathBuf>,
}

impl IncludedBuilds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}

impl ExternalBuilds for IncludedBuilds {
    fn include_external_build(&mut self, path: &Path) -> miette::Result<()> {
        if !self.paths.iter().any(|p| p == path) {
            self.paths.push(path.to_path_buf());
        }
        Ok(())
    }
}

/// Effective repositories of one project, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRepositories {
    pub project: String,
    pub repositories: Vec<RepositoryDeclaration>,
    pub source: RepositorySource,
}

/// Output of [`DependencyResolutionPlanner::plan`].
#[derive(Debug, Clone)]
pub struct DependencyPlan {
    pub sdk_path: PathBuf,
    pub plugin_repositories: Vec<RepositoryDeclaration>,
    pub dependency_repositories: Vec<RepositoryDeclaration>,
    pub plugins: Vec<PluginDeclaration>,
    pub evaluation_order: Vec<String>,
    pub projects: Vec<ProjectRepositories>,
}

/// Plans repositories, plugins and project evaluation for a [`BuildConfig`].
pub struct DependencyResolutionPlanner<'a> {
    config: &'a BuildConfig,
}

impl<'a> DependencyResolutionPlanner<'a> {
    pub fn new(config: &'a BuildConfig) -> Self {
        Self { config }
    }

    /// Read the SDK location from `source`.
    ///
    /// Relative values are taken relative to the settings directory.
    pub fn resolve_sdk_path(&self, source: &dyn PropertySource) -> miette::Result<PathBuf> {
        let key = &self.config.sdk.key;
        match source.get(key) {
            Some(value) if !value.trim().is_empty() => {
                Ok(normalize(&self.config.settings_dir.join(value.trim())))
            }
            _ => Err(TrestleError::MissingConfiguration {
                key: key.clone(),
                origin: source.describe(),
            }
            .into()),
        }
    }

    /// Run the planning pass.
    ///
    /// The SDK path is resolved first; if it is missing nothing else is
    /// resolved and `builds` is never called.
    pub fn plan(
        &self,
        source: &dyn PropertySource,
        builds: &mut dyn ExternalBuilds,
    ) -> miette::Result<DependencyPlan> {
        let sdk_path = self.resolve_sdk_path(source)?;
        let include = sdk_path.join(&self.config.sdk.include_build);
        tracing::debug!("Including external build {}", include.display());
        builds.include_external_build(&include)?;

        let plugin_repositories = dedup_repositories(&self.config.plugin_repositories);
        let plugins = resolve_plugins(&self.config.plugins)?;
        let dependency_repositories = dedup_repositories(&self.config.dependency_repositories);

        let graph = EvaluationGraph::from_projects(&self.config.projects)?;
        let evaluation_order = graph.evaluation_order()?;

        let mut projects = Vec::with_capacity(evaluation_order.len());
        for name in &evaluation_order {
            let Some(node) = self.config.projects.iter().find(|p| p.name() == name) else {
                continue;
            };
            let (repositories, source) = effective_repositories(
                self.config.resolution_mode,
                &dependency_repositories,
                node,
            );
            tracing::debug!(
                "Project `{name}` resolves from {} repositories ({source:?})",
                repositories.len()
            );
            projects.push(ProjectRepositories {
                project: name.clone(),
                repositories,
                source,
            });
        }

        Ok(DependencyPlan {
            sdk_path,
            plugin_repositories,
            dependency_repositories,
            plugins,
            evaluation_order,
            projects,
        })
    }
}
