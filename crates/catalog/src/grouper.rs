// crates/catalog/src/grouper.rs
//! Groups books into collections named after their source directory

use crate::document::Element;
use crate::error::{CatalogError, CatalogResult};
use crate::path::split_path;
use crate::strip::StripStrategy;
use std::collections::HashMap;

/// Element name of a book entry
pub const BOOK_ELEMENT: &str = "text";
/// Attribute holding the book's path on the device
pub const PATH_ATTR: &str = "path";
/// Attribute holding numeric identifiers
pub const ID_ATTR: &str = "id";
/// Separator between directory levels in a collection name
pub const COLLECTION_NAME_SEPARATOR: &str = " - ";

/// Book ids keyed by collection name, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collections {
    entries: Vec<(String, Vec<u64>)>,
    positions: HashMap<String, usize>,
}

impl Collections {
    /// Creates an empty grouping
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a book id to the named collection, creating it if needed
    pub fn add(&mut self, name: String, id: u64) {
        match self.positions.get(&name) {
            Some(&index) => self.entries[index].1.push(id),
            None => {
                self.positions.insert(name.clone(), self.entries.len());
                self.entries.push((name, vec![id]));
            }
        }
    }

    /// Returns the ids of a collection
    pub fn get(&self, name: &str) -> Option<&[u64]> {
        self.positions
            .get(name)
            .map(|&index| self.entries[index].1.as_slice())
    }

    /// Iterates over collections in the order they were first seen
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u64])> {
        self.entries
            .iter()
            .map(|(name, ids)| (name.as_str(), ids.as_slice()))
    }

    /// Returns the number of collections
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no collections
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of grouping every book in a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    /// Highest book id seen, 0 when there are no books
    pub max_id: u64,
    /// Number of books visited
    pub book_count: usize,
    /// Book ids per collection
    pub collections: Collections,
}

/// Derives the collection name for a book path.
///
/// The strategy is applied first, then every segment except the last (the
/// file name) is joined with [`COLLECTION_NAME_SEPARATOR`]. Books with no
/// path, or an empty one, belong to the collection named `""`.
pub fn collection_name(path: Option<&str>, strategy: &StripStrategy) -> String {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return String::new();
    };

    let stripped = strategy.reduce(path);
    let segments = split_path(&stripped);
    let directories = &segments[..segments.len().saturating_sub(1)];
    directories.join(COLLECTION_NAME_SEPARATOR)
}

/// Reads the numeric id of an element; a missing id counts as 0
pub fn element_id(element: &Element) -> CatalogResult<u64> {
    match element.attr(ID_ATTR) {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CatalogError::InvalidAttribute {
                element: element.name().to_string(),
                attribute: ID_ATTR.to_string(),
                value: raw.to_string(),
            }),
    }
}

/// Groups books by collection name, preserving document order
pub fn group_books<'a, I>(books: I, strategy: &StripStrategy) -> CatalogResult<Grouping>
where
    I: IntoIterator<Item = &'a Element>,
{
    let mut grouping = Grouping::default();

    for book in books {
        let id = element_id(book)?;
        grouping.max_id = grouping.max_id.max(id);
        grouping.book_count += 1;

        let name = collection_name(book.attr(PATH_ATTR), strategy);
        grouping.collections.add(name, id);
    }

    Ok(grouping)
}
