use crate::{CapacityError, CapacityResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Velocity seed used while a team has no completed sprints, in story points
/// per person-day.
pub const DEFAULT_VELOCITY: f64 = 1.0;

fn default_velocity() -> f64 {
    DEFAULT_VELOCITY
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_velocity", alias = "defaultVelocity")]
    pub default_velocity: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_velocity: DEFAULT_VELOCITY,
        }
    }
}

impl EngineConfig {
    pub fn with_default_velocity(default_velocity: f64) -> CapacityResult<Self> {
        let config = Self { default_velocity };
        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/scrumcap/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("scrumcap/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("scrumcap\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load the user config, falling back to defaults when the file is
    /// missing, unreadable or invalid.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(config) = Self::load_from(&config_path) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> CapacityResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| CapacityError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CapacityResult<()> {
        if !self.default_velocity.is_finite() || self.default_velocity <= 0.0 {
            return Err(CapacityError::Validation(format!(
                "default_velocity must be a positive number, got {}",
                self.default_velocity
            )));
        }
        Ok(())
    }
}
