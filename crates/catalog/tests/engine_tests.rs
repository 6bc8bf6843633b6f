// crates/catalog/tests/engine_tests.rs
//! End-to-end tests for the catalog engine

use shelfkeeper_catalog::{CatalogEngine, CatalogError, Document, Element, StripStrategy};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::BufReader;
use tempfile::TempDir;

const LIBRARY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cache xmlns="http://www.kinoma.com/FskCache/1">
  <text id="1" path="Lib/Fiction/book.lrf" author="толстой" title="  Война   и мир "/>
  <text id="2" path="Lib/Fiction/other.lrf" author="pushkin"/>
  <text id="5" path="Lib/Poetry/Russian/onegin.lrf" author="Пушкин" title="Евгений Онегин"/>
  <text id="3" path="Lib/Fiction/Sub/deep.lrf" title="1984"/>
  <text id="9" title="No path"/>
  <text path="Lib/Poetry/Russian/noid.lrf"/>
  <playlist id="20" sourceid="0" title="Favourites"><item id="5"/></playlist>
  <playlist id="21" sourceid="0" title="Old"/>
</cache>"#;

fn process(xml: &str, strategy: StripStrategy) -> Document {
    let mut doc: Document = xml.parse().expect("Should parse");
    CatalogEngine::new(strategy)
        .process(&mut doc)
        .expect("Should process");
    doc
}

fn books(doc: &Document) -> Vec<&Element> {
    doc.root().elements_named("text")
}

fn playlists(doc: &Document) -> Vec<&Element> {
    doc.root().elements_named("playlist")
}

fn items(playlist: &Element) -> Vec<u64> {
    playlist
        .child_elements()
        .filter_map(|item| item.attr("id"))
        .map(|id| id.parse().expect("Item id should be numeric"))
        .collect()
}

fn book_ids(doc: &Document) -> Vec<u64> {
    books(doc)
        .iter()
        .map(|b| b.attr("id").map_or(0, |id| id.parse().expect("Book id should be numeric")))
        .collect()
}

#[test]
fn test_fiction_scenario() {
    let xml = r#"<cache>
  <text id="1" path="Lib/Fiction/book.lrf" author="толстой"/>
  <text id="2" path="Lib/Fiction/other.lrf" author="pushkin"/>
</cache>"#;
    let doc = process(xml, StripStrategy::StripDir("Lib".to_string()));

    let lists = playlists(&doc);
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].attr("title"), Some("Fiction"));
    assert_eq!(lists[0].attr("sourceid"), Some("0"));
    assert_eq!(items(lists[0]), vec![1, 2]);

    let all = books(&doc);
    assert_eq!(all[0].attr("author"), Some("T: толстой"));
    assert_eq!(all[1].attr("author"), Some("_: pushkin"));
}

#[test]
fn test_missing_path_goes_to_empty_collection() {
    let xml = r#"<cache><text id="4" title="Loose"/></cache>"#;
    let doc = process(xml, StripStrategy::NoStrip);

    let lists = playlists(&doc);
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].attr("title"), Some(""));
    assert_eq!(items(lists[0]), vec![4]);
}

#[test]
fn test_strip_last_word_scenario() {
    let xml = r#"<cache><text id="1" path="Lib/Fiction/Sub/book.lrf"/></cache>"#;
    let doc = process(xml, StripStrategy::StripLastWord("fiction".to_string()));

    let lists = playlists(&doc);
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].attr("title"), Some("Sub"));
}

#[test]
fn test_strip_word_matching_file_name_gives_empty_collection() {
    let xml = r#"<cache><text id="1" path="Lib/Fiction/book.lrf"/></cache>"#;
    let doc = process(xml, StripStrategy::StripFirstWord("book.lrf".to_string()));

    let lists = playlists(&doc);
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].attr("title"), Some(""));
}

#[test]
fn test_playlist_count_matches_distinct_collections() {
    let doc = process(LIBRARY, StripStrategy::StripDir("Lib".to_string()));

    let titles: Vec<_> = playlists(&doc)
        .iter()
        .map(|p| p.attr("title").unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        titles,
        vec!["Fiction", "Poetry - Russian", "Fiction - Sub", ""]
    );

    let distinct: HashSet<_> = titles.iter().collect();
    assert_eq!(distinct.len(), titles.len());
}

#[test]
fn test_items_partition_book_ids() {
    let doc = process(LIBRARY, StripStrategy::NoStrip);

    let mut seen: Vec<u64> = playlists(&doc).iter().flat_map(|p| items(p)).collect();
    let mut expected = book_ids(&doc);
    seen.sort_unstable();
    expected.sort_unstable();
    assert_eq!(seen, expected);
}

#[test]
fn test_new_playlist_ids_exceed_book_ids() {
    let doc = process(LIBRARY, StripStrategy::NoStrip);
    let max_book = book_ids(&doc).into_iter().max().unwrap_or(0);
    assert_eq!(max_book, 9);

    let ids: Vec<u64> = playlists(&doc)
        .iter()
        .map(|p| p.attr("id").expect("Playlist id").parse().expect("Numeric id"))
        .collect();
    assert!(ids.iter().all(|&id| id > max_book));

    let distinct: BTreeSet<_> = ids.iter().collect();
    assert_eq!(distinct.len(), ids.len());
    assert_eq!(ids[0], max_book + 1);
}

#[test]
fn test_old_playlists_are_gone() {
    let doc = process(LIBRARY, StripStrategy::NoStrip);
    assert!(playlists(&doc)
        .iter()
        .all(|p| !matches!(p.attr("title"), Some("Favourites") | Some("Old"))));
}

#[test]
fn test_indexed_attributes_match_pattern() {
    let doc = process(LIBRARY, StripStrategy::NoStrip);

    for book in books(&doc) {
        for name in ["author", "title"] {
            if let Some(value) = book.attr(name) {
                let mut chars = value.chars();
                let letter = chars.next().expect("Indexed value is not empty");
                assert!(letter.is_ascii_uppercase() || letter == '_', "{value}");
                assert!(chars.as_str().starts_with(": "), "{value}");
            }
        }
    }

    let first = books(&doc)[0];
    assert_eq!(first.attr("title"), Some("V: Война и мир"));
}

#[test]
fn test_second_run_is_identical() {
    let engine = CatalogEngine::new(StripStrategy::StripDir("Lib".to_string()));

    let mut first = Vec::new();
    engine
        .transform(LIBRARY.as_bytes(), &mut first)
        .expect("First run");
    let mut second = Vec::new();
    let summary = engine
        .transform(first.as_slice(), &mut second)
        .expect("Second run");

    assert_eq!(summary.indexed_attributes, 0);
    assert_eq!(first, second);
}

#[test]
fn test_no_books() {
    let doc = process(
        r#"<cache><playlist id="1" title="x"/></cache>"#,
        StripStrategy::NoStrip,
    );
    assert!(playlists(&doc).is_empty());
}

#[test]
fn test_invalid_book_id() {
    let mut doc: Document = r#"<cache><text id="abc"/></cache>"#.parse().expect("Should parse");
    let result = CatalogEngine::default().process(&mut doc);
    assert!(matches!(result, Err(CatalogError::InvalidAttribute { .. })));
}

#[test]
fn test_largest_book_id_leaves_no_room_for_playlists() {
    let xml = r#"<cache><text id="18446744073709551615" path="Lib/A/x.lrf"/></cache>"#;
    let mut output = Vec::new();
    let result = CatalogEngine::default().transform(xml.as_bytes(), &mut output);

    assert!(matches!(
        result,
        Err(CatalogError::InvalidAttribute { ref attribute, .. }) if attribute == "id"
    ));
    assert!(output.is_empty());
}

#[test]
fn test_book_id_just_below_max() {
    let xml = r#"<cache><text id="18446744073709551614" path="Lib/A/x.lrf"/></cache>"#;
    let doc = process(xml, StripStrategy::NoStrip);

    let lists = playlists(&doc);
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].attr("id"), Some("18446744073709551615"));
}

#[test]
fn test_missing_cache_element() {
    let mut doc: Document = r#"<library><text id="1"/></library>"#.parse().expect("Should parse");
    let result = CatalogEngine::default().process(&mut doc);
    assert!(matches!(result, Err(CatalogError::MissingElement(_))));
}

#[test]
fn test_malformed_catalog() {
    let result = CatalogEngine::default().transform("<cache><text>".as_bytes(), Vec::new());
    assert!(result.is_err());
}

#[test]
fn test_transform_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("cache.xml");
    let output = temp_dir.path().join("out.xml");
    fs::write(&input, LIBRARY)?;

    let reader = BufReader::new(fs::File::open(&input)?);
    let writer = fs::File::create(&output)?;
    let summary = CatalogEngine::default().transform(reader, writer)?;

    assert_eq!(summary.books, 6);
    assert_eq!(summary.removed_playlists, 2);

    let written = fs::read_to_string(&output)?;
    assert!(written.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
    assert!(written.contains(r#"xmlns="http://www.kinoma.com/FskCache/1""#));
    Ok(())
}
