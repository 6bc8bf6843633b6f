// crates/catalog/src/path.rs
//! Path segment helpers
//!
//! Book paths in the catalog are plain strings relative to the device
//! storage root; they are never resolved against the local filesystem.

use std::path::{is_separator, MAIN_SEPARATOR};

/// Splits a path into its ordered segments.
///
/// Empty segments from a leading or repeated separator are dropped, while a
/// trailing separator yields a trailing empty segment. The result is never
/// empty: `""` and `"/"` both give `[""]`.
pub fn split_path(path: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    let mut parts = path.split(is_separator).peekable();

    while let Some(part) = parts.next() {
        let is_last = parts.peek().is_none();
        if !part.is_empty() || is_last {
            segments.push(part.to_string());
        }
    }

    segments
}

/// Joins segments with the platform separator
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let separator = MAIN_SEPARATOR.to_string();
    segments
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(&separator)
}

/// Returns true if the path starts at a filesystem root
pub fn is_absolute(path: &str) -> bool {
    path.starts_with(is_separator)
}
