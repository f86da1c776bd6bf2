//! Operation: run a build configuration pass for a settings directory.

use std::path::Path;

use trestle_core::config::BuildConfig;
use trestle_core::properties::Properties;
use trestle_core::repository::ResolutionMode;
use trestle_core::settings::Settings;
use trestle_core::SETTINGS_FILE;
use trestle_resolver::plan::BuildPlan;
use trestle_resolver::planner::IncludedBuilds;

/// Parse `Trestle.toml` in `settings_dir` into a [`BuildConfig`].
pub fn load_config(settings_dir: &Path) -> miette::Result<BuildConfig> {
    let settings = Settings::from_path(&settings_dir.join(SETTINGS_FILE))?;
    BuildConfig::from_settings(&settings, settings_dir)
}

/// Resolve the full build plan, reading the SDK location from the
/// configured properties file.
pub fn plan(settings_dir: &Path) -> miette::Result<BuildPlan> {
    let config = load_config(settings_dir)?;
    let properties = Properties::load(&config.sdk.properties_file)?;
    tracing::debug!(
        "Loaded {} properties from {}",
        properties.len(),
        config.sdk.properties_file.display()
    );
    let mut builds = IncludedBuilds::new();
    let plan = BuildPlan::resolve(&config, &properties, &mut builds)?;

    if config.resolution_mode == ResolutionMode::PreferSettings {
        for node in config.projects.iter().filter(|p| !p.repositories.is_empty()) {
            trestle_util::progress::status_warn(
                "Ignored",
                &format!(
                    "repositories of project `{}` ({})",
                    node.name(),
                    config.resolution_mode
                ),
            );
        }
    }
    for path in builds.paths() {
        trestle_util::progress::status_info("Including", &path.display().to_string());
    }
    Ok(plan)
}
