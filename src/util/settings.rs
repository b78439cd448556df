use std::path::{Path, PathBuf};

use serde_derive::Deserialize;
use thiserror::Error;

use super::logging::{self, LogLevel};

pub const SETTINGS_FILE: &str = "estrada.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to read settings file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    pub enabled: bool,
    pub verbose: bool,
    pub disabled_components: Vec<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            verbose: false,
            disabled_components: Vec::new(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MapSettings {
    pub full_opacity: f32,
    pub dimmed_opacity: f32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            full_opacity: 1.0,
            dimmed_opacity: 0.2,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub map: MapSettings,
}

impl Settings {
    /// Reads `estrada.toml` from the working directory, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self, SettingsError> {
        let dir = std::env::current_dir().map_err(|source| SettingsError::Read {
            path: PathBuf::from("."),
            source,
        })?;

        let path = dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let in_range = |value: f32| (0.0..=1.0).contains(&value);

        if !in_range(self.map.full_opacity) {
            return Err(SettingsError::Invalid {
                key: "map.full_opacity",
                reason: format!("{} is outside [0, 1]", self.map.full_opacity),
            });
        }

        if !in_range(self.map.dimmed_opacity) {
            return Err(SettingsError::Invalid {
                key: "map.dimmed_opacity",
                reason: format!("{} is outside [0, 1]", self.map.dimmed_opacity),
            });
        }

        Ok(())
    }

    /// Pushes the logging section into the process-wide logging configuration.
    pub fn apply_logging(&self) {
        logging::set_global_logging(self.logging.enabled);
        logging::set_global_level(if self.logging.verbose {
            LogLevel::VERBOSE
        } else {
            LogLevel::INFO
        });

        for component in &self.logging.disabled_components {
            logging::disable_named(component);
        }
    }
}
