//! Locating the config file and loading it

use crate::{Config, ConfigError, ConfigResult};
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the config file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Entry point for the config file: where it lives and how to read it
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a config manager using the platform config directory
    ///
    /// - Linux: `~/.config/shelfkeeper/config.toml`
    /// - macOS: `~/Library/Application Support/shelfkeeper/config.toml`
    /// - Windows: `%APPDATA%\shelfkeeper\config\config.toml`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Ok(Self::with_directory(config_dir))
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> Self {
        Self::from_file(config_dir.join(CONFIG_FILE_NAME))
    }

    /// Creates a config manager for an explicit config file
    pub fn from_file(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "shelfkeeper")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the config file
    ///
    /// A missing file gives the defaults. A file that exists but is blank or
    /// not valid TOML is an error. Values are not validated here; callers
    /// check the merged config with [`Config::validate`].
    pub fn load(&self) -> ConfigResult<Config> {
        let content = match fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(self.read_error(e)),
        };

        if content.trim().is_empty() {
            return Err(self.read_error(io::Error::new(
                io::ErrorKind::InvalidData,
                "file is empty",
            )));
        }

        toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: self.config_path.clone(),
            source,
        })
    }

    fn read_error(&self, source: io::Error) -> ConfigError {
        ConfigError::ReadError {
            path: self.config_path.clone(),
            source,
        }
    }
}
