// crates/catalog/src/indexer.rs
//! Sort-index prefixes for book attributes
//!
//! The reader sorts by raw attribute value and knows nothing about Cyrillic
//! ordering, so each `author` and `title` is prefixed with a Latin letter
//! and `": "`, e.g. `"толстой"` becomes `"T: толстой"`.

use crate::document::Element;
use crate::transliterate::{is_sort_letter, transliterate};

/// Attribute holding the book author
pub const AUTHOR_ATTR: &str = "author";
/// Attribute holding the book title
pub const TITLE_ATTR: &str = "title";

const INDEX_SEPARATOR: &str = ": ";

/// What happened to an attribute during indexing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The attribute is not set on the element
    Absent,
    /// The value already carries an index prefix and was left alone
    AlreadyIndexed,
    /// The value was blank; it was normalized to `""` without a prefix
    Empty,
    /// A prefix was added
    Indexed,
}

/// Trims the value and collapses inner whitespace runs to one space
///
/// Only ASCII whitespace counts; a no-break space is part of the text.
pub fn normalize(value: &str) -> String {
    value
        .split(is_blank)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Returns true if the value starts with a sort letter and `": "` followed
/// by at least one more character
pub fn is_indexed(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if is_sort_letter(first) => {
            let rest = chars.as_str();
            rest.starts_with(INDEX_SEPARATOR) && rest.len() > INDEX_SEPARATOR.len()
        }
        _ => false,
    }
}

/// Builds the indexed form of an already normalized, non-empty value
pub fn index_value(normalized: &str) -> Option<String> {
    let first = normalized.chars().next()?;
    Some(format!(
        "{}{}{}",
        transliterate(first),
        INDEX_SEPARATOR,
        normalized
    ))
}

/// Adds a sort-index prefix to one attribute of `element`
pub fn index_attribute(element: &mut Element, name: &str) -> IndexOutcome {
    let Some(value) = element.attr(name) else {
        return IndexOutcome::Absent;
    };

    let normalized = normalize(value);
    if is_indexed(&normalized) {
        return IndexOutcome::AlreadyIndexed;
    }

    match index_value(&normalized) {
        Some(indexed) => {
            element.set_attr(name, indexed);
            IndexOutcome::Indexed
        }
        None => {
            element.set_attr(name, normalized);
            IndexOutcome::Empty
        }
    }
}

/// Indexes the author and title of a book, returning how many attributes
/// received a new prefix
pub fn index_book(book: &mut Element) -> usize {
    [AUTHOR_ATTR, TITLE_ATTR]
        .iter()
        .map(|name| index_attribute(book, name))
        .filter(|outcome| *outcome == IndexOutcome::Indexed)
        .count()
}
