//! Plugin declaration validation.

use trestle_core::plugin::PluginDeclaration;
use trestle_util::errors::TrestleError;

/// Check that the id is a non-empty token and the version, if any, is a
/// version token (non-empty, no whitespace).
pub fn validate_plugin(plugin: &PluginDeclaration) -> Result<(), TrestleError> {
    let invalid = |reason: String| TrestleError::InvalidPluginDeclaration {
        id: if plugin.id.trim().is_empty() {
            "<empty>".to_string()
        } else {
            plugin.id.clone()
        },
        reason,
    };

    if plugin.id.trim().is_empty() {
        return Err(invalid("plugin id must not be empty".to_string()));
    }
    if plugin.id.chars().any(char::is_whitespace) {
        return Err(invalid("plugin id must not contain whitespace".to_string()));
    }
    if let Some(version) = &plugin.version {
        if version.is_empty() {
            return Err(invalid("version must not be empty".to_string()));
        }
        if version.chars().any(char::is_whitespace) {
            return Err(invalid(format!("version `{version}` is not a version token")));
        }
    }
    Ok(())
}

/// Validate plugins in declaration order and drop repeated `(id, version)`
/// pairs, keeping the first.
///
/// The same id declared with two different versions is rejected.
pub fn resolve_plugins(plugins: &[PluginDeclaration]) -> miette::Result<Vec<PluginDeclaration>> {
    let mut resolved: Vec<PluginDeclaration> = Vec::with_capacity(plugins.len());
    for plugin in plugins {
        validate_plugin(plugin)?;
        match resolved.iter().find(|p| p.id == plugin.id) {
            Some(existing) if existing.version == plugin.version => {
                tracing::debug!("Dropping duplicate plugin declaration {plugin}");
            }
            Some(existing) => {
                return Err(TrestleError::InvalidPluginDeclaration {
                    id: plugin.id.clone(),
                    reason: format!(
                        "declared with conflicting versions {} and {}",
                        existing.version.as_deref().unwrap_or("<none>"),
                        plugin.version.as_deref().unwrap_or("<none>")
                    ),
                }
                .into());
            }
            None => resolved.push(plugin.clone()),
        }
    }
    Ok(resolved)
}
