//! The immutable result of a build configuration pass.

use std::path::{Path, PathBuf};

use serde::Serialize;

use trestle_core::config::BuildConfig;
use trestle_core::plugin::PluginDeclaration;
use trestle_core::project::ProjectNode;
use trestle_core::properties::PropertySource;
use trestle_core::repository::{RepositoryDeclaration, ResolutionMode};

use crate::layout::{CleanTask, DirectoryLayoutResolver};
use crate::planner::{DependencyResolutionPlanner, ExternalBuilds};
use crate::repositories::RepositorySource;

/// A project with everything resolved for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedProject {
    pub name: String,
    pub output_dir: PathBuf,
    pub evaluation_depends_on: Vec<String>,
    pub repositories: Vec<RepositoryDeclaration>,
    pub repository_source: RepositorySource,
}

/// Everything an executor needs from one configuration pass.
///
/// Built by [`BuildPlan::resolve`] and read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    root_dir: PathBuf,
    /// In evaluation order.
    projects: Vec<ResolvedProject>,
    plugin_repositories: Vec<RepositoryDeclaration>,
    dependency_repositories: Vec<RepositoryDeclaration>,
    resolution_mode: ResolutionMode,
    plugins: Vec<PluginDeclaration>,
    sdk_path: PathBuf,
    included_builds: Vec<PathBuf>,
    #[serde(skip)]
    clean: CleanTask,
}

/// Forwards to the caller's collaborator while keeping a copy of each path
/// for the plan.
struct Recording<'b> {
    inner: &'b mut dyn ExternalBuilds,
    paths: Vec<PathBuf>,
}

impl ExternalBuilds for Recording<'_> {
    fn include_external_build(&mut self, path: &Path) -> miette::Result<()> {
        self.inner.include_external_build(path)?;
        self.paths.push(path.to_path_buf());
        Ok(())
    }
}

impl BuildPlan {
    /// Run the full configuration pass: directory layout first, then
    /// dependency planning.
    ///
    /// Any error aborts the pass; no partial plan is returned.
    pub fn resolve(
        config: &BuildConfig,
        source: &dyn PropertySource,
        builds: &mut dyn ExternalBuilds,
    ) -> miette::Result<Self> {
        let layout = DirectoryLayoutResolver::new(&config.settings_dir)
            .resolve(&config.build_dir, &config.project_names())?;

        let mut recording = Recording {
            inner: builds,
            paths: Vec::new(),
        };
        let planned = DependencyResolutionPlanner::new(config).plan(source, &mut recording)?;

        let mut nodes: Vec<ProjectNode> = config.projects.clone();
        layout.assign(&mut nodes)?;

        let mut projects = Vec::with_capacity(planned.projects.len());
        for entry in planned.projects {
            let Some(node) = nodes.iter().find(|n| n.name() == entry.project) else {
                continue;
            };
            projects.push(ResolvedProject {
                name: entry.project.clone(),
                output_dir: node.output_dir().map(Path::to_path_buf).unwrap_or_default(),
                evaluation_depends_on: node.evaluation_depends_on.iter().cloned().collect(),
                repositories: entry.repositories,
                repository_source: entry.source,
            });
        }

        tracing::debug!(
            "Resolved build plan: {} project(s), {} plugin(s)",
            projects.len(),
            planned.plugins.len()
        );

        Ok(Self {
            root_dir: layout.root().to_path_buf(),
            projects,
            plugin_repositories: planned.plugin_repositories,
            dependency_repositories: planned.dependency_repositories,
            resolution_mode: config.resolution_mode,
            plugins: planned.plugins,
            sdk_path: planned.sdk_path,
            included_builds: recording.paths,
            clean: layout.clean_task(),
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Resolved output directory of a project.
    pub fn output_dir(&self, project: &str) -> Option<&Path> {
        self.project(project).map(|p| p.output_dir.as_path())
    }

    pub fn project(&self, name: &str) -> Option<&ResolvedProject> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Projects in evaluation order.
    pub fn projects(&self) -> &[ResolvedProject] {
        &self.projects
    }

    pub fn evaluation_order(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn plugin_repositories(&self) -> &[RepositoryDeclaration] {
        &self.plugin_repositories
    }

    pub fn dependency_repositories(&self) -> &[RepositoryDeclaration] {
        &self.dependency_repositories
    }

    pub fn resolution_mode(&self) -> ResolutionMode {
        self.resolution_mode
    }

    pub fn plugins(&self) -> &[PluginDeclaration] {
        &self.plugins
    }

    pub fn sdk_path(&self) -> &Path {
        &self.sdk_path
    }

    pub fn included_builds(&self) -> &[PathBuf] {
        &self.included_builds
    }

    /// The clean operation registered by the layout resolver.
    pub fn clean_task(&self) -> &CleanTask {
        &self.clean
    }
}
