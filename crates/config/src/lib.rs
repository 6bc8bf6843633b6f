//! shelfkeeper configuration
//!
//! Settings come from three layers, each overriding the previous one:
//! built-in defaults, an optional TOML file, and command-line arguments.
//!
//! # Example
//!
//! ```rust
//! use shelfkeeper_config::{Config, StripConfig};
//!
//! let mut config = Config::default();
//! config.merge(Config {
//!     strip: StripConfig {
//!         strip_dir: Some("database/media/books".to_string()),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! });
//!
//! let strategy = config.strip_strategy().expect("Only one strip option is set");
//! println!("Using {}", strategy);
//! ```

mod error;
mod manager;
mod validation;

// Config sections
mod io_config;
mod logging_config;
mod strip_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{ConfigManager, CONFIG_FILE_NAME};
pub use validation::{ConfigSection, Validator};

pub use io_config::{IoConfig, STDIO_PATH};
pub use logging_config::{LogLevel, LoggingConfig};
pub use strip_config::StripConfig;

use serde::Deserialize;
use shelfkeeper_catalog::StripStrategy;

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Input and output locations
    pub io: IoConfig,

    /// Path stripping for collection names
    pub strip: StripConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.version > CONFIG_VERSION {
            errors.push(ValidationError::with_value(
                "version",
                format!("must not be newer than {}", CONFIG_VERSION),
                self.version,
            ));
        }

        if let Err(mut e) = self.io.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.strip.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.logging.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Merges this config with another, preferring values set in `other`
    ///
    /// This is used for override chains: defaults < file < CLI args
    pub fn merge(&mut self, other: Config) {
        self.io.merge(other.io);
        self.strip.merge(other.strip);
        self.logging.merge(other.logging);
    }

    /// Returns the strip strategy selected by this configuration
    pub fn strip_strategy(&self) -> ConfigResult<StripStrategy> {
        self.strip
            .strategy()
            .map_err(|e| ConfigError::from(vec![e]))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            io: IoConfig::default(),
            strip: StripConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.strip_strategy().unwrap(), StripStrategy::NoStrip);
    }

    #[test]
    fn test_config_version_is_set() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
    }

    #[test]
    fn test_future_version_invalid() {
        let config = Config {
            version: CONFIG_VERSION + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        let mut override_config = Config::default();
        override_config.logging.level = Some(LogLevel::Debug);
        override_config.strip.strip_first = Some("books".to_string());

        base.merge(override_config);
        assert_eq!(base.logging.level(), LogLevel::Debug);
        assert_eq!(
            base.strip_strategy().unwrap(),
            StripStrategy::StripFirstWord("books".to_string())
        );
    }

    #[test]
    fn test_conflicting_strip_is_validation_error() {
        let mut config = Config::default();
        config.strip.strip_first = Some("a".to_string());
        config.strip.strip_last = Some("b".to_string());

        assert!(matches!(
            config.strip_strategy(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
