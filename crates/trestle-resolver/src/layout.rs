//! Build output directory layout and the guarded clean task.
//!
//! Every project builds into `<root>/<name>`. The root defaults to a
//! `build` directory next to the settings directory, so the sources and
//! the outputs of a multi-project build never share a tree.

use std::path::{Path, PathBuf};

use trestle_core::project::ProjectNode;
use trestle_util::errors::TrestleError;
use trestle_util::fs::{absolutize, is_within};

/// Resolves the shared build root and per-project output directories.
#[derive(Debug, Clone)]
pub struct DirectoryLayoutResolver {
    settings_dir: PathBuf,
}

impl DirectoryLayoutResolver {
    pub fn new(settings_dir: &Path) -> Self {
        Self {
            settings_dir: settings_dir.to_path_buf(),
        }
    }

    /// Resolve `base` (relative to the settings directory) as the build root
    /// and give each project the directory `<root>/<name>`.
    ///
    /// Resolving twice with the same inputs yields the same layout.
    pub fn resolve(&self, base: &Path, projects: &[&str]) -> miette::Result<DirectoryLayout> {
        let settings_dir =
            absolutize(&self.settings_dir, None).ok_or_else(|| TrestleError::InvalidPath {
                path: self.settings_dir.display().to_string(),
                reason: "settings directory cannot be made absolute".to_string(),
            })?;
        let root = absolutize(base, Some(&settings_dir)).ok_or_else(|| TrestleError::InvalidPath {
            path: base.display().to_string(),
            reason: "build directory cannot be made absolute".to_string(),
        })?;

        let mut dirs: Vec<(String, PathBuf)> = Vec::with_capacity(projects.len());
        for name in projects {
            validate_dir_name(name)?;
            if dirs.iter().any(|(existing, _)| existing == name) {
                continue;
            }
            dirs.push((name.to_string(), root.join(name)));
        }

        tracing::debug!(
            "Resolved build root {} for {} project(s)",
            root.display(),
            dirs.len()
        );

        Ok(DirectoryLayout {
            root,
            settings_dir,
            projects: dirs,
        })
    }
}

/// A project name becomes a single directory component under the root.
fn validate_dir_name(name: &str) -> Result<(), TrestleError> {
    let reason = if name.is_empty() {
        Some("project name is empty")
    } else if name == "." || name == ".." {
        Some("project name is a relative path component")
    } else if name.contains(['/', '\\', ':']) {
        Some("project name contains a path separator")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(TrestleError::InvalidPath {
            path: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// The resolved output layout of one build configuration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLayout {
    root: PathBuf,
    settings_dir: PathBuf,
    projects: Vec<(String, PathBuf)>,
}

impl DirectoryLayout {
    /// The shared build output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Output directory of a single project.
    pub fn project_dir(&self, name: &str) -> Option<&Path> {
        self.projects
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, dir)| dir.as_path())
    }

    /// `(name, output dir)` pairs in the order the projects were given.
    pub fn projects(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.projects.iter().map(|(n, d)| (n.as_str(), d.as_path()))
    }

    /// Record each node's output directory.
    ///
    /// Fails if a node already carries a different directory, or is not
    /// part of this layout.
    pub fn assign(&self, nodes: &mut [ProjectNode]) -> miette::Result<()> {
        for node in nodes {
            let dir = self
                .project_dir(node.name())
                .ok_or_else(|| TrestleError::InvalidPath {
                    path: node.name().to_string(),
                    reason: "project is not part of the resolved layout".to_string(),
                })?
                .to_path_buf();
            if !node.set_output_dir(dir.clone()) {
                return Err(TrestleError::InvalidPath {
                    path: dir.display().to_string(),
                    reason: format!(
                        "project `{}` already has a different output directory",
                        node.name()
                    ),
                }
                .into());
            }
        }
        Ok(())
    }

    /// The clean operation for this layout.
    pub fn clean_task(&self) -> CleanTask {
        CleanTask {
            root: self.root.clone(),
            protected: self.settings_dir.clone(),
        }
    }
}

/// Deletes the resolved build root, or one project's output directory.
///
/// Never deletes anything outside the root, never the filesystem root, and
/// refuses to run when the root would contain the settings directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanTask {
    root: PathBuf,
    protected: PathBuf,
}

/// Result of a clean operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanResult {
    Cleaned(PathBuf),
    NothingToClean(PathBuf),
}

impl CleanTask {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Remove the whole build root, or only `project`'s directory.
    pub fn run(&self, project: Option<&str>) -> miette::Result<CleanResult> {
        let target = match project {
            Some(name) => {
                validate_dir_name(name)?;
                self.root.join(name)
            }
            None => self.root.clone(),
        };
        self.delete(&target)
    }

    /// Remove `target` after checking it lies within the build root.
    pub fn delete(&self, target: &Path) -> miette::Result<CleanResult> {
        let target = self.check_target(target)?;
        if !target.exists() {
            return Ok(CleanResult::NothingToClean(target));
        }
        if target.is_dir() {
            std::fs::remove_dir_all(&target).map_err(TrestleError::Io)?;
        } else {
            std::fs::remove_file(&target).map_err(TrestleError::Io)?;
        }
        tracing::debug!("Removed {}", target.display());
        Ok(CleanResult::Cleaned(target))
    }

    fn check_target(&self, target: &Path) -> Result<PathBuf, TrestleError> {
        let refuse = |path: &Path, reason: &str| TrestleError::InvalidPath {
            path: path.display().to_string(),
            reason: reason.to_string(),
        };

        if self.root.parent().is_none() {
            return Err(refuse(&self.root, "refusing to clean the filesystem root"));
        }
        if is_within(&self.protected, &self.root) {
            return Err(refuse(
                &self.root,
                "build root contains the settings directory",
            ));
        }

        let target = absolutize(target, Some(&self.root))
            .ok_or_else(|| refuse(target, "clean target cannot be made absolute"))?;
        if !is_within(&target, &self.root) {
            return Err(refuse(&target, "clean target is outside the build root"));
        }

        // Symlinks inside the root must not lead the deletion elsewhere.
        if let (Ok(real_root), Ok(real_target)) = (self.root.canonicalize(), target.canonicalize())
        {
            if !real_target.starts_with(&real_root) {
                return Err(refuse(&target, "clean target resolves outside the build root"));
            }
        }
        Ok(target)
    }
}
