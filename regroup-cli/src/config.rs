use anyhow::{Context, Error};
use regroup::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "regroup.toml";

pub const DEFAULT_ABSENT_MARKER: &str = "x";

/// Contents of `regroup.toml`.
///
/// ```toml
/// absent_marker = "x"
///
/// [search]
/// attempts = 1000
/// seed = 7
/// workers = 1
/// group_names = ["cedar", "cypress"]
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RegroupConfig {
    /// Session marker meaning "not here this time".
    pub absent_marker: String,
    pub search: SearchConfig,
}

impl Default for RegroupConfig {
    fn default() -> Self {
        Self {
            absent_marker: DEFAULT_ABSENT_MARKER.to_string(),
            search: SearchConfig::default(),
        }
    }
}

/// Config path to use: the explicit one, else `regroup.toml` beside the roster if present.
pub fn config_path(explicit: Option<&Path>, roster: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let beside = roster
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CONFIG_FILE_NAME);
    beside.is_file().then_some(beside)
}

pub fn read_config(path: Option<&Path>) -> Result<RegroupConfig, Error> {
    let Some(path) = path else {
        return Ok(RegroupConfig::default());
    };
    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.to_string_lossy()))?;
    let config = toml::from_str::<RegroupConfig>(&config_str)
        .with_context(|| format!("Failed to parse config {}", path.to_string_lossy()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
