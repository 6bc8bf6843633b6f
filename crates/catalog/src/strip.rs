// crates/catalog/src/strip.rs
//! Strategies for reducing a book path to the part that names its collection

use crate::path::{is_absolute, join_segments, split_path};
use std::fmt;
use std::path::is_separator;

/// Rule for trimming a book path before its directory portion becomes a
/// collection name
///
/// Only one strategy is ever active; picking between several configured
/// ones is the job of the configuration layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StripStrategy {
    /// Use the path as stored in the catalog
    #[default]
    NoStrip,
    /// Make the path relative to a base directory
    StripDir(String),
    /// Keep what follows the first segment equal to the word
    StripFirstWord(String),
    /// Keep what follows the last segment equal to the word
    StripLastWord(String),
}

impl StripStrategy {
    /// Reduces `path` according to the strategy.
    ///
    /// Word matching ignores case. When the matched word is the final
    /// segment the remainder is the empty string.
    pub fn reduce(&self, path: &str) -> String {
        match self {
            StripStrategy::NoStrip => path.to_string(),
            StripStrategy::StripDir(base) => relative_to(path, base),
            StripStrategy::StripFirstWord(word) => {
                strip_word(path, word, |segments, word| {
                    segments.iter().position(|s| s.to_lowercase() == word)
                })
            }
            StripStrategy::StripLastWord(word) => {
                strip_word(path, word, |segments, word| {
                    segments.iter().rposition(|s| s.to_lowercase() == word)
                })
            }
        }
    }
}

impl fmt::Display for StripStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StripStrategy::NoStrip => write!(f, "no strip"),
            StripStrategy::StripDir(base) => write!(f, "strip dir '{}'", base),
            StripStrategy::StripFirstWord(word) => write!(f, "strip to first '{}'", word),
            StripStrategy::StripLastWord(word) => write!(f, "strip to last '{}'", word),
        }
    }
}

fn strip_word<F>(path: &str, word: &str, locate: F) -> String
where
    F: Fn(&[String], &str) -> Option<usize>,
{
    let segments = split_path(path);
    let word = word.to_lowercase();

    match locate(&segments, &word) {
        Some(index) => join_segments(&segments[index + 1..]),
        None => path.to_string(),
    }
}

/// Lexical equivalent of a relative-path computation; nothing is resolved
/// against the current directory, so mixed absolute/relative input is
/// returned unchanged.
fn relative_to(path: &str, base: &str) -> String {
    if is_absolute(path) != is_absolute(base) {
        return path.to_string();
    }

    let target = normalize(path);
    let base = normalize(base);
    let common = target
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let relative: Vec<&str> = std::iter::repeat("..")
        .take(base.len() - common)
        .chain(target[common..].iter().map(String::as_str))
        .collect();

    if relative.is_empty() {
        ".".to_string()
    } else {
        join_segments(&relative)
    }
}

fn normalize(path: &str) -> Vec<String> {
    let absolute = is_absolute(path);
    let mut segments: Vec<String> = Vec::new();

    for part in path.split(is_separator) {
        match part {
            "" | "." => {}
            ".." => match segments.last().map(String::as_str) {
                Some(last) if last != ".." => {
                    segments.pop();
                }
                // `..` at the root stays at the root
                _ if absolute => {}
                _ => segments.push("..".to_string()),
            },
            other => segments.push(other.to_string()),
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native(path: &str) -> String {
        join_segments(&path.split('/').collect::<Vec<_>>())
    }

    #[test]
    fn test_no_strip() {
        assert_eq!(StripStrategy::NoStrip.reduce("Lib/Fiction/a.lrf"), "Lib/Fiction/a.lrf");
    }

    #[test]
    fn test_strip_dir() {
        let strategy = StripStrategy::StripDir("Lib".to_string());
        assert_eq!(strategy.reduce("Lib/Fiction/a.lrf"), native("Fiction/a.lrf"));
    }

    #[test]
    fn test_strip_dir_with_trailing_separator_and_dots() {
        let strategy = StripStrategy::StripDir("./Lib/".to_string());
        assert_eq!(strategy.reduce("Lib/./Fiction/a.lrf"), native("Fiction/a.lrf"));
    }

    #[test]
    fn test_strip_dir_outside_base() {
        let strategy = StripStrategy::StripDir("Lib/Fiction".to_string());
        assert_eq!(strategy.reduce("Lib/Poetry/a.lrf"), native("../Poetry/a.lrf"));
    }

    #[test]
    fn test_strip_dir_same_path() {
        let strategy = StripStrategy::StripDir("Lib".to_string());
        assert_eq!(strategy.reduce("Lib"), ".");
    }

    #[test]
    fn test_strip_dir_absolute() {
        let strategy = StripStrategy::StripDir("/media/reader".to_string());
        assert_eq!(strategy.reduce("/media/reader/Lib/a.lrf"), native("Lib/a.lrf"));
    }

    #[test]
    fn test_strip_dir_mixed_kinds_unchanged() {
        let strategy = StripStrategy::StripDir("/media".to_string());
        assert_eq!(strategy.reduce("Lib/a.lrf"), "Lib/a.lrf");
    }

    #[test]
    fn test_strip_first_word() {
        let strategy = StripStrategy::StripFirstWord("books".to_string());
        assert_eq!(
            strategy.reduce("Books/Fiction/books/Sub/a.lrf"),
            native("Fiction/books/Sub/a.lrf")
        );
    }

    #[test]
    fn test_strip_last_word_case_insensitive() {
        let strategy = StripStrategy::StripLastWord("fiction".to_string());
        assert_eq!(strategy.reduce("Lib/Fiction/Sub/book.lrf"), native("Sub/book.lrf"));

        let upper = StripStrategy::StripLastWord("FICTION".to_string());
        assert_eq!(upper.reduce("Lib/Fiction/Sub/book.lrf"), native("Sub/book.lrf"));
    }

    #[test]
    fn test_strip_last_word_picks_last_occurrence() {
        let strategy = StripStrategy::StripLastWord("books".to_string());
        assert_eq!(strategy.reduce("books/A/books/B/a.lrf"), native("B/a.lrf"));
    }

    #[test]
    fn test_strip_word_absent_unchanged() {
        let strategy = StripStrategy::StripFirstWord("poetry".to_string());
        assert_eq!(strategy.reduce("Lib/Fiction/a.lrf"), "Lib/Fiction/a.lrf");
    }

    #[test]
    fn test_strip_word_as_final_segment_is_empty() {
        let strategy = StripStrategy::StripLastWord("a.lrf".to_string());
        assert_eq!(strategy.reduce("Lib/Fiction/a.lrf"), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            StripStrategy::StripDir("Lib".to_string()).to_string(),
            "strip dir 'Lib'"
        );
        assert_eq!(StripStrategy::default().to_string(), "no strip");
    }
}
