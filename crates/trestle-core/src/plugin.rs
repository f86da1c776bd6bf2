use serde::{Deserialize, Serialize};
use std::fmt;

/// A plugin declaration from the `[[plugins]]` array of `Trestle.toml`.
///
/// `apply = false` declares the plugin version for subprojects without
/// applying it to the root build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDeclaration {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default = "default_apply", rename = "apply")]
    pub apply_eagerly: bool,
}

fn default_apply() -> bool {
    true
}

impl PluginDeclaration {
    pub fn new(id: impl Into<String>, version: Option<&str>, apply_eagerly: bool) -> Self {
        Self {
            id: id.into(),
            version: version.map(str::to_string),
            apply_eagerly,
        }
    }
}

impl fmt::Display for PluginDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(version) = &self.version {
            write!(f, " {version}")?;
        }
        if !self.apply_eagerly {
            write!(f, " (apply false)")?;
        }
        Ok(())
    }
}
