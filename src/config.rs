use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{MascotError, Result};
use crate::mode::BehaviorMode;
use crate::motion::tuning::Tuning;
use crate::routine::RoutineConfig;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "MASCOT_CONFIG";

/// Persisted settings. Missing keys fall back to defaults so older files
/// keep loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetConfig {
    pub behavior_mode: BehaviorMode,
    pub follow_mouse: bool,
    pub motion: Tuning,
    pub routine: RoutineConfig,
}

impl PetConfig {
    /// `$MASCOT_CONFIG`, else `config.toml` in the platform config dir.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        ProjectDirs::from("", "", "mascot")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(MascotError::NoConfigDir)
    }

    /// A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Like [`PetConfig::load_from`], but a corrupt file only costs a warning.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
