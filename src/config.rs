use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::PortalError;

/// Publicly known bootstrap secret. Anyone can log in as the seeded admin
/// until it is changed in the config file.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PortalConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DirectoryConfig {
    #[serde(default = "default_directory_path")]
    pub path: String,
    #[serde(default)]
    pub atomic_writes: bool,
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
}

/// What `load` does with a directory file it cannot parse
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Refuse to start
    #[default]
    Fail,
    /// Move the file aside and seed a fresh directory
    Reseed,
}

/// Seeded administrator, used only when the directory is empty.
/// Fields left out of the table keep their defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct BootstrapConfig {
    pub admin_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_directory_path() -> String {
    "accounts.json".to_string()
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            path: default_directory_path(),
            atomic_writes: false,
            on_malformed: MalformedPolicy::Fail,
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_name: "Administrator".to_string(),
            admin_email: "admin@system.com".to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            directory: DirectoryConfig::default(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

impl PortalConfig {
    pub fn load(path: &str) -> Result<Self, PortalError> {
        let s = std::fs::read_to_string(path)?;
        toml::from_str(&s).map_err(|e| PortalError::Config(e.to_string()))
    }

    pub fn save(&self, path: &str) -> Result<(), PortalError> {
        let s = toml::to_string_pretty(self).map_err(|e| PortalError::Config(e.to_string()))?;
        std::fs::write(path, s)?;
        Ok(())
    }

    /// Load `path`, falling back to defaults. A missing file is created with
    /// the defaults.
    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match Self::load(path) {
                Ok(c) => {
                    info!("Config loaded from {}", path);
                    c
                }
                Err(e) => {
                    error!("Error loading config: {}. Using defaults.", e);
                    Self::default()
                }
            }
        } else {
            info!("Config file not found at '{}'. Creating default.", path);
            let config = Self::default();
            if let Err(e) = config.save(path) {
                error!("Could not write default config: {}", e);
            }
            config
        }
    }
}
