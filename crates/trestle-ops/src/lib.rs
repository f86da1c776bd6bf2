pub mod ops_clean;
pub mod ops_plan;

use std::path::{Path, PathBuf};

use trestle_core::SETTINGS_FILE;
use trestle_util::errors::TrestleError;
use trestle_util::fs::find_ancestor_with;

/// Locate the settings directory: `explicit` if given, otherwise the nearest
/// ancestor of `start` containing `Trestle.toml`.
pub fn find_settings_dir(start: &Path, explicit: Option<&Path>) -> miette::Result<PathBuf> {
    if let Some(dir) = explicit {
        if dir.join(SETTINGS_FILE).is_file() {
            return Ok(dir.to_path_buf());
        }
        return Err(TrestleError::Settings {
            message: format!("No {SETTINGS_FILE} found in {}", dir.display()),
        }
        .into());
    }
    find_ancestor_with(start, SETTINGS_FILE).ok_or_else(|| {
        TrestleError::Settings {
            message: format!("Could not find {SETTINGS_FILE} in current or parent directories"),
        }
        .into()
    })
}
