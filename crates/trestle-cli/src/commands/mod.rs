//! Command dispatch and handler modules.

mod clean;
mod plan;
mod projects;

use std::path::PathBuf;

use miette::Result;

use trestle_util::errors::TrestleError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let settings_dir = settings_dir(cli.settings_dir.as_deref())?;
    tracing::debug!("Using settings directory {}", settings_dir.display());
    match cli.command {
        Command::Plan { json } => plan::exec(&settings_dir, json),
        Command::Projects => projects::exec(&settings_dir),
        Command::Clean { project } => clean::exec(&settings_dir, project.as_deref()),
    }
}

fn settings_dir(explicit: Option<&std::path::Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(TrestleError::Io)?;
    let explicit = explicit.map(|dir| cwd.join(dir));
    trestle_ops::find_settings_dir(&cwd, explicit.as_deref())
}
