// crates/catalog/examples/rebuild_catalog.rs
//! Rebuilds a small in-memory catalog and prints the result

use shelfkeeper_catalog::{CatalogEngine, StripStrategy};

const CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cache xmlns="http://www.kinoma.com/FskCache/1">
  <text id="1" path="database/media/books/Classics/Russian/voina.lrf" author="Толстой Лев" title="Война и мир"/>
  <text id="2" path="database/media/books/Classics/Russian/onegin.lrf" author="Пушкин" title="Евгений Онегин"/>
  <text id="3" path="database/media/books/Sci-Fi/dune.lrf" author="Frank Herbert" title="Dune"/>
  <text id="4" author="Unknown" title="Loose book"/>
  <playlist id="10" sourceid="0" title="Hand made"><item id="3"/></playlist>
</cache>"#;

fn main() {
    println!("=== shelfkeeper catalog demo ===\n");

    for strategy in [
        StripStrategy::NoStrip,
        StripStrategy::StripDir("database/media/books".to_string()),
        StripStrategy::StripLastWord("classics".to_string()),
    ] {
        println!("Strategy: {}", strategy);
        println!("{}", "=".repeat(60));

        let engine = CatalogEngine::new(strategy);
        let mut out = Vec::new();
        match engine.transform(CATALOG.as_bytes(), &mut out) {
            Ok(summary) => {
                println!("{}", String::from_utf8_lossy(&out));
                println!(
                    "\n{} books, {} attributes indexed, {} playlists replaced by {}\n",
                    summary.books,
                    summary.indexed_attributes,
                    summary.removed_playlists,
                    summary.created_playlists
                );
            }
            Err(e) => eprintln!("Failed to rebuild catalog: {}", e),
        }
    }
}
