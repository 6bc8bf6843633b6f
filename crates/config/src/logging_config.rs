//! Logging configuration section

use crate::validation::{ConfigSection, ValidationError};
use serde::Deserialize;

/// Log level for application logging
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for application output; `info` when unset
    pub level: Option<LogLevel>,
}

impl LoggingConfig {
    /// Returns the effective level
    pub fn level(&self) -> LogLevel {
        self.level.unwrap_or(LogLevel::Info)
    }
}

impl ConfigSection for LoggingConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        self.level = other.level.or(self.level);
    }
}
