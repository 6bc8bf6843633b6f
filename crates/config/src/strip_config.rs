//! Strip options: how book paths are trimmed before naming collections

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::Deserialize;
use shelfkeeper_catalog::StripStrategy;

/// Strip settings; at most one of the three may be set
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StripConfig {
    /// Directory to make book paths relative to
    pub strip_dir: Option<String>,

    /// Keep the path after the first segment equal to this word
    pub strip_first: Option<String>,

    /// Keep the path after the last segment equal to this word
    pub strip_last: Option<String>,
}

impl StripConfig {
    /// Returns true if any strip option is set
    pub fn is_set(&self) -> bool {
        self.strip_dir.is_some() || self.strip_first.is_some() || self.strip_last.is_some()
    }

    /// Resolves the single configured strategy
    ///
    /// Fails when more than one option is set.
    pub fn strategy(&self) -> Result<StripStrategy, ValidationError> {
        Validator::at_most_one(&self.options(), "strip")?;

        let strategy = match (&self.strip_dir, &self.strip_first, &self.strip_last) {
            (Some(dir), _, _) => StripStrategy::StripDir(dir.clone()),
            (_, Some(word), _) => StripStrategy::StripFirstWord(word.clone()),
            (_, _, Some(word)) => StripStrategy::StripLastWord(word.clone()),
            _ => StripStrategy::NoStrip,
        };
        Ok(strategy)
    }

    fn options(&self) -> [(&'static str, bool); 3] {
        [
            ("strip_dir", self.strip_dir.is_some()),
            ("strip_first", self.strip_first.is_some()),
            ("strip_last", self.strip_last.is_some()),
        ]
    }
}

impl ConfigSection for StripConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let results = vec![
            Validator::at_most_one(&self.options(), "strip"),
            Validator::not_empty_if_set(self.strip_dir.as_deref(), "strip.strip_dir"),
            Validator::not_empty_if_set(self.strip_first.as_deref(), "strip.strip_first"),
            Validator::not_empty_if_set(self.strip_last.as_deref(), "strip.strip_last"),
        ];

        Validator::collect_errors(results)
    }

    /// A strip option in `other` replaces this section entirely, so a command
    /// line choice is never combined with a different one from a file.
    fn merge(&mut self, other: Self) {
        if other.is_set() {
            *self = other;
        }
    }
}
