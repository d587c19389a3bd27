//! Settings persistence.
//!
//! Settings are read from `settings.toml` in the platform-specific config
//! folder, or from an explicit `--config` path:
//! - macOS: ~/Library/Application Support/com.colclass.colclass/
//! - Windows: %APPDATA%/colclass/colclass/config/
//! - Linux: ~/.config/colclass/

use std::fs;
use std::path::{Path, PathBuf};

use colclass_model::Threshold;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "colclass";
const APP_NAME: &str = "colclass";
const CONFIG_FILENAME: &str = "settings.toml";

/// User settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub classification: ClassificationSettings,
    pub export: ExportSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationSettings {
    /// Columns with fewer distinct values than this are flagged.
    pub threshold: Threshold,
}

impl Default for ClassificationSettings {
    fn default() -> Self {
        Self {
            threshold: Threshold::DEFAULT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Replace existing output files without `--force`.
    pub overwrite: bool,
}

/// Get the path to the default settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `path`, or from the default location.
///
/// Returns default settings if:
/// - The settings file doesn't exist
/// - The settings file cannot be parsed
/// - The platform-specific directory cannot be determined
pub fn load_settings(path: Option<&Path>) -> Settings {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(path) = settings_path() else {
                tracing::warn!("Could not determine settings path, using defaults");
                return Settings::default();
            };
            path
        }
    };

    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file found at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}
