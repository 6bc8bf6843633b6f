// crates/catalog/src/engine.rs
//! Catalog rewrite pipeline: index books, group them, rebuild playlists

use crate::document::{Document, Element};
use crate::error::CatalogResult;
use crate::grouper::{group_books, BOOK_ELEMENT};
use crate::indexer::index_book;
use crate::playlist::rebuild_playlists;
use crate::strip::StripStrategy;
use std::io::{BufRead, Write};

/// Counts describing one engine run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildSummary {
    /// Books found in the catalog
    pub books: usize,
    /// Author/title attributes that received a new prefix
    pub indexed_attributes: usize,
    /// Playlists that were discarded
    pub removed_playlists: usize,
    /// Playlists that were written
    pub created_playlists: usize,
    /// Highest book id seen
    pub max_book_id: u64,
}

/// Rewrites catalog documents with a fixed strip strategy
#[derive(Debug, Clone, Default)]
pub struct CatalogEngine {
    strategy: StripStrategy,
}

impl CatalogEngine {
    /// Creates an engine using the given strategy
    pub fn new(strategy: StripStrategy) -> Self {
        Self { strategy }
    }

    /// Returns the active strip strategy
    pub fn strategy(&self) -> &StripStrategy {
        &self.strategy
    }

    /// Indexes every book and replaces all playlists in `doc`
    pub fn process(&self, doc: &mut Document) -> CatalogResult<RebuildSummary> {
        log::info!("Index titles and authors");
        let mut indexed_attributes = 0;
        doc.root_mut()
            .for_each_named_mut(BOOK_ELEMENT, &mut |book: &mut Element| {
                indexed_attributes += index_book(book);
            });

        let grouping = group_books(doc.root().elements_named(BOOK_ELEMENT), &self.strategy)?;
        log::debug!(
            "Grouped {} books into {} collections ({})",
            grouping.book_count,
            grouping.collections.len(),
            self.strategy
        );

        let report = rebuild_playlists(doc, grouping.max_id, &grouping.collections)?;

        Ok(RebuildSummary {
            books: grouping.book_count,
            indexed_attributes,
            removed_playlists: report.removed,
            created_playlists: report.created,
            max_book_id: grouping.max_id,
        })
    }

    /// Parses a catalog from `input`, rewrites it and serializes it to `output`.
    ///
    /// Nothing is written unless parsing and processing both succeed.
    pub fn transform<R, W>(&self, input: R, output: W) -> CatalogResult<RebuildSummary>
    where
        R: BufRead,
        W: Write,
    {
        let mut doc = Document::parse(input)?;
        let summary = self.process(&mut doc)?;
        doc.write_to(output)?;
        Ok(summary)
    }
}
