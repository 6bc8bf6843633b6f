//! Input/output configuration section

use crate::validation::{ConfigSection, ValidationError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Path value meaning standard input or standard output
pub const STDIO_PATH: &str = "-";

/// Where the catalog is read from and written to
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IoConfig {
    /// Catalog to read; unset or `-` reads standard input
    pub input: Option<PathBuf>,

    /// Catalog to write; unset or `-` writes standard output
    pub output: Option<PathBuf>,

    /// Copy an existing output file to `<name>.bak` before overwriting it
    pub backup: Option<bool>,
}

impl IoConfig {
    /// Returns the input path, if not standard input
    pub fn input_path(&self) -> Option<&Path> {
        file_path(self.input.as_deref())
    }

    /// Returns the output path, if not standard output
    pub fn output_path(&self) -> Option<&Path> {
        file_path(self.output.as_deref())
    }

    /// Whether existing output files are backed up; defaults to true
    pub fn backup_enabled(&self) -> bool {
        self.backup.unwrap_or(true)
    }
}

fn file_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| *p != Path::new(STDIO_PATH))
}

impl ConfigSection for IoConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (field, path) in [("io.input", &self.input), ("io.output", &self.output)] {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                errors.push(ValidationError::new(field, "must not be empty"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn merge(&mut self, other: Self) {
        self.input = other.input.or(self.input.take());
        self.output = other.output.or(self.output.take());
        self.backup = other.backup.or(self.backup);
    }
}
