use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::repository::RepositoryDeclaration;

/// Strip the leading `:` of a project path such as `":app"`.
pub fn project_name(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_prefix(':').unwrap_or(trimmed).to_string()
}

/// A subproject included in the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNode {
    name: String,
    output_dir: Option<PathBuf>,
    pub evaluation_depends_on: BTreeSet<String>,
    /// Repositories declared by the project itself, consulted only under
    /// `ResolutionMode::PreferProject`.
    pub repositories: Vec<RepositoryDeclaration>,
}

impl ProjectNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: project_name(name),
            output_dir: None,
            evaluation_depends_on: BTreeSet::new(),
            repositories: Vec::new(),
        }
    }

    /// Declare that this project's configuration must be resolved after `other`'s.
    pub fn depends_on(mut self, other: &str) -> Self {
        self.evaluation_depends_on.insert(project_name(other));
        self
    }

    pub fn with_repositories(mut self, repositories: Vec<RepositoryDeclaration>) -> Self {
        self.repositories = repositories;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Record the resolved output directory.
    ///
    /// Returns `false` (and leaves the node unchanged) if a different
    /// directory was already recorded.
    pub fn set_output_dir(&mut self, dir: PathBuf) -> bool {
        match &self.output_dir {
            Some(existing) => *existing == dir,
            None => {
                self.output_dir = Some(dir);
                true
            }
        }
    }
}
