// crates/catalog/src/playlist.rs
//! Regeneration of the catalog's playlists
//!
//! Every run discards all existing playlists, including hand-made ones,
//! and writes a fresh set from the current grouping.

use crate::document::{Document, Element};
use crate::error::{CatalogError, CatalogResult};
use crate::grouper::{Collections, BOOK_ELEMENT, ID_ATTR};

/// Container element holding books and playlists
pub const CACHE_ELEMENT: &str = "cache";
/// Element name of a playlist
pub const PLAYLIST_ELEMENT: &str = "playlist";
/// Element name of a playlist entry
pub const ITEM_ELEMENT: &str = "item";

const SOURCE_ID_ATTR: &str = "sourceid";
const TITLE_ATTR: &str = "title";
const SOURCE_ID: &str = "0";

/// Counts from a playlist rebuild
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaylistReport {
    /// Playlists removed from the cache
    pub removed: usize,
    /// Playlists created
    pub created: usize,
    /// Id of the first created playlist, if any
    pub first_id: Option<u64>,
}

/// Builds a playlist element with one item per book id
pub fn build_playlist(id: u64, title: &str, book_ids: &[u64]) -> Element {
    let mut playlist = Element::new(PLAYLIST_ELEMENT)
        .with_attr(ID_ATTR, id.to_string())
        .with_attr(SOURCE_ID_ATTR, SOURCE_ID)
        .with_attr(TITLE_ATTR, title);

    for book_id in book_ids {
        playlist.push_child(Element::new(ITEM_ELEMENT).with_attr(ID_ATTR, book_id.to_string()));
    }

    playlist
}

/// Replaces every playlist under the first `cache` element.
///
/// New playlists get ids `max_book_id + 1`, `max_book_id + 2`, ... in
/// collection order.
pub fn rebuild_playlists(
    doc: &mut Document,
    max_book_id: u64,
    collections: &Collections,
) -> CatalogResult<PlaylistReport> {
    let ids = playlist_ids(max_book_id, collections.len())?;
    let cache = doc
        .root_mut()
        .find_mut(CACHE_ELEMENT)
        .ok_or_else(|| CatalogError::MissingElement(CACHE_ELEMENT.to_string()))?;

    let removed = cache.remove_children_named(PLAYLIST_ELEMENT);
    for playlist in &removed {
        log::debug!(
            "Remove existing collection: {}",
            playlist.attr(TITLE_ATTR).unwrap_or_default()
        );
    }

    log::info!("Creating collection sets");
    let mut report = PlaylistReport {
        removed: removed.len(),
        ..PlaylistReport::default()
    };

    for (id, (title, book_ids)) in ids.into_iter().zip(collections.iter()) {
        log::debug!("Create collection: {} ({} books)", title, book_ids.len());
        cache.push_child(build_playlist(id, title, book_ids));

        report.first_id.get_or_insert(id);
        report.created += 1;
    }

    Ok(report)
}

/// Ids for `count` new playlists, counting up from just above `max_book_id`
///
/// Fails when they would not fit in a `u64`; the document is not touched
/// in that case.
fn playlist_ids(max_book_id: u64, count: usize) -> CatalogResult<Vec<u64>> {
    let mut ids = Vec::with_capacity(count);
    let mut last = max_book_id;
    for _ in 0..count {
        last = last
            .checked_add(1)
            .ok_or_else(|| CatalogError::InvalidAttribute {
                element: BOOK_ELEMENT.to_string(),
                attribute: ID_ATTR.to_string(),
                value: max_book_id.to_string(),
            })?;
        ids.push(last);
    }
    Ok(ids)
}
