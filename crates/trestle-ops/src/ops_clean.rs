//! Operation: remove the resolved build output tree.

use std::path::Path;

pub use trestle_resolver::layout::CleanResult;
use trestle_resolver::layout::DirectoryLayoutResolver;
use trestle_util::errors::TrestleError;

use crate::ops_plan::load_config;

/// Remove the build root, or only `project`'s output directory.
///
/// Only the directory layout is resolved, so cleaning works even when the
/// SDK location is not configured.
pub fn clean(settings_dir: &Path, project: Option<&str>) -> miette::Result<CleanResult> {
    let config = load_config(settings_dir)?;
    let layout = DirectoryLayoutResolver::new(&config.settings_dir)
        .resolve(&config.build_dir, &config.project_names())?;

    if let Some(name) = project {
        let name = trestle_core::project::project_name(name);
        if layout.project_dir(&name).is_none() {
            return Err(TrestleError::Settings {
                message: format!("project `{name}` is not included"),
            }
            .into());
        }
        return layout.clean_task().run(Some(&name));
    }
    layout.clean_task().run(None)
}
