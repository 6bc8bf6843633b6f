// crates/catalog/src/lib.rs
//! Catalog rewriting for Sony PRS-505 style e-readers
//!
//! The reader keeps its library in an XML cache file: one `text` element per
//! book and `playlist` elements for collections. This crate:
//! - Adds sort-index prefixes (`"T: толстой"`) to book authors and titles
//! - Groups books into collections named after their source directory
//! - Replaces every playlist with one per collection
//!
//! # Example
//!
//! ```rust
//! use shelfkeeper_catalog::{CatalogEngine, Document, StripStrategy};
//!
//! let xml = r#"<?xml version="1.0"?>
//! <cache>
//!   <text id="1" path="Lib/Fiction/book.lrf" author="толстой"/>
//!   <text id="2" path="Lib/Fiction/other.lrf" author="pushkin"/>
//! </cache>"#;
//!
//! let mut doc: Document = xml.parse().expect("Failed to parse catalog");
//! let engine = CatalogEngine::new(StripStrategy::StripDir("Lib".to_string()));
//! let summary = engine.process(&mut doc).expect("Failed to rebuild catalog");
//!
//! println!("{} books in {} collections", summary.books, summary.created_playlists);
//! ```

mod document;
mod engine;
mod error;
pub mod grouper;
pub mod indexer;
pub mod path;
pub mod playlist;
mod strip;
pub mod transliterate;

pub use document::{Document, Element, Node, OUTPUT_ENCODING};
pub use engine::{CatalogEngine, RebuildSummary};
pub use error::{CatalogError, CatalogResult};
pub use grouper::{collection_name, group_books, Collections, Grouping};
pub use indexer::{index_attribute, index_book, IndexOutcome};
pub use path::split_path;
pub use playlist::{rebuild_playlists, PlaylistReport};
pub use strip::StripStrategy;
pub use transliterate::{transliterate, FALLBACK_MARKER};
