//! Handler for `trestle projects`.

use std::path::Path;

use miette::Result;

use trestle_ops::ops_plan;

pub fn exec(settings_dir: &Path) -> Result<()> {
    let plan = ops_plan::plan(settings_dir)?;

    if plan.projects().is_empty() {
        println!("No projects included.");
        return Ok(());
    }

    for (i, project) in plan.projects().iter().enumerate() {
        let after = if project.evaluation_depends_on.is_empty() {
            String::new()
        } else {
            format!(" (after {})", project.evaluation_depends_on.join(", "))
        };
        println!(
            "{}. {} {}{after}",
            i + 1,
            project.name,
            project.output_dir.display()
        );
    }
    Ok(())
}
