//! Repository deduplication and resolution-mode precedence.

use std::collections::HashSet;

use serde::Serialize;

use trestle_core::project::ProjectNode;
use trestle_core::repository::{RepositoryDeclaration, ResolutionMode};

/// Drop repeated `(kind, url)` pairs, keeping the first occurrence.
pub fn dedup_repositories(repositories: &[RepositoryDeclaration]) -> Vec<RepositoryDeclaration> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(repositories.len());
    for repo in repositories {
        if seen.insert(repo) {
            out.push(repo.clone());
        } else {
            tracing::debug!("Dropping duplicate repository {repo}");
        }
    }
    out
}

/// Where a project's effective repositories came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepositorySource {
    Settings,
    Project,
}

/// Repositories a project resolves dependencies from.
///
/// `settings` must already be deduplicated.
pub fn effective_repositories(
    mode: ResolutionMode,
    settings: &[RepositoryDeclaration],
    project: &ProjectNode,
) -> (Vec<RepositoryDeclaration>, RepositorySource) {
    match mode {
        ResolutionMode::PreferProject if !project.repositories.is_empty() => (
            dedup_repositories(&project.repositories),
            RepositorySource::Project,
        ),
        ResolutionMode::PreferSettings if !project.repositories.is_empty() => {
            tracing::debug!(
                "Project `{}` declares {} repositories; ignored because the resolution mode is {mode}",
                project.name(),
                project.repositories.len()
            );
            (settings.to_vec(), RepositorySource::Settings)
        }
        _ => (settings.to_vec(), RepositorySource::Settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jitpack() -> RepositoryDeclaration {
        RepositoryDeclaration::maven("https://jitpack.io")
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let input = vec![
            RepositoryDeclaration::google(),
            jitpack(),
            RepositoryDeclaration::maven_central(),
            RepositoryDeclaration::google(),
            RepositoryDeclaration::maven("https://jitpack.io/"),
        ];
        let out = dedup_repositories(&input);
        assert_eq!(
            out,
            vec![
                RepositoryDeclaration::google(),
                jitpack(),
                RepositoryDeclaration::maven_central(),
            ]
        );
    }

    #[test]
    fn dedup_never_grows_and_leaves_no_duplicates() {
        let pool = [
            RepositoryDeclaration::google(),
            RepositoryDeclaration::maven_central(),
            RepositoryDeclaration::gradle_plugin_portal(),
            jitpack(),
            RepositoryDeclaration::maven("https://storage.googleapis.com/download.flutter.io"),
        ];
        // Deterministic pseudo-random sequences over the pool.
        let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
        for len in 0..40 {
            let input: Vec<RepositoryDeclaration> = (0..len)
                .map(|_| {
                    seed ^= seed << 13;
                    seed ^= seed >> 7;
                    seed ^= seed << 17;
                    pool[(seed % pool.len() as u64) as usize].clone()
                })
                .collect();
            let out = dedup_repositories(&input);
            assert!(out.len() <= input.len());
            let unique: HashSet<_> = out.iter().collect();
            assert_eq!(unique.len(), out.len());

            let mut first_seen = Vec::new();
            for repo in &input {
                if !first_seen.contains(repo) {
                    first_seen.push(repo.clone());
                }
            }
            assert_eq!(out, first_seen);
        }
    }

    #[test]
    fn prefer_settings_ignores_project_repositories() {
        let settings = vec![RepositoryDeclaration::google()];
        let project = ProjectNode::new("app").with_repositories(vec![jitpack()]);
        let (repos, source) =
            effective_repositories(ResolutionMode::PreferSettings, &settings, &project);
        assert_eq!(repos, settings);
        assert_eq!(source, RepositorySource::Settings);
    }

    #[test]
    fn prefer_project_uses_project_repositories() {
        let settings = vec![RepositoryDeclaration::google()];
        let project = ProjectNode::new("app").with_repositories(vec![jitpack(), jitpack()]);
        let (repos, source) =
            effective_repositories(ResolutionMode::PreferProject, &settings, &project);
        assert_eq!(repos, vec![jitpack()]);
        assert_eq!(source, RepositorySource::Project);
    }

    #[test]
    fn prefer_project_falls_back_to_settings() {
        let settings = vec![RepositoryDeclaration::maven_central()];
        let project = ProjectNode::new("app");
        let (repos, source) =
            effective_repositories(ResolutionMode::PreferProject, &settings, &project);
        assert_eq!(repos, settings);
        assert_eq!(source, RepositorySource::Settings);
    }
}
