//! Handler for `trestle clean`.

use std::path::Path;

use miette::Result;

use trestle_ops::ops_clean::{self, CleanResult};

pub fn exec(settings_dir: &Path, project: Option<&str>) -> Result<()> {
    match ops_clean::clean(settings_dir, project)? {
        CleanResult::Cleaned(path) => println!("Cleaned {}", path.display()),
        CleanResult::NothingToClean(_) => println!("Nothing to clean"),
    }
    Ok(())
}
