//! Handler for `trestle plan`.

use std::path::Path;

use console::style;
use miette::Result;

use trestle_ops::ops_plan;
use trestle_resolver::plan::BuildPlan;
use trestle_util::errors::TrestleError;
use trestle_util::progress::status;

pub fn exec(settings_dir: &Path, json: bool) -> Result<()> {
    let plan = ops_plan::plan(settings_dir)?;

    if json {
        let out = serde_json::to_string_pretty(&plan).map_err(|e| TrestleError::Settings {
            message: format!("Failed to serialize build plan: {e}"),
        })?;
        println!("{out}");
        return Ok(());
    }

    status(
        "Resolved",
        &format!(
            "{} project(s), {} plugin(s)",
            plan.projects().len(),
            plan.plugins().len()
        ),
    );
    print_summary(&plan);
    Ok(())
}

fn print_summary(plan: &BuildPlan) {
    println!("{} {}", style("build root:").bold(), plan.root_dir().display());
    println!("{} {}", style("sdk:").bold(), plan.sdk_path().display());
    for path in plan.included_builds() {
        println!("  include-build {}", path.display());
    }

    println!("{}", style("plugin repositories:").bold());
    for repo in plan.plugin_repositories() {
        println!("  {repo}");
    }

    println!("{}", style("plugins:").bold());
    for plugin in plan.plugins() {
        println!("  {plugin}");
    }

    println!(
        "{} ({})",
        style("dependency repositories:").bold(),
        plan.resolution_mode()
    );
    for repo in plan.dependency_repositories() {
        println!("  {repo}");
    }

    println!("{}", style("projects:").bold());
    for project in plan.projects() {
        println!("  {} -> {}", project.name, project.output_dir.display());
    }
}
