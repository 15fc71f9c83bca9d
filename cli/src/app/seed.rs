//! Sample game collection

use super::settings::GAMES_KEY;
use pagenav_core::error::StoreError;
use pagenav_core::{Record, RecordStore};
use serde_json::{json, Value};
use tracing::info;

/// A small collection to explore the shell with
pub fn sample_games() -> Vec<Record> {
    let games = json!([
        {
            "id": 1, "title": "Pokemon Red", "platform": "GB", "year": 1996,
            "region": "EU", "condition": "CIB", "status": "Completed",
            "price": 25, "purchaseDate": "2021-03-14", "ownership": "In Collection",
            "note": "Save battery replaced"
        },
        {
            "id": 2, "title": "The Legend of Zelda: Ocarina of Time", "platform": "N64",
            "year": 1998, "region": "UK", "condition": "Game only", "status": "Playing",
            "price": "34.99", "purchaseDate": "2022-08-02", "ownership": "In Collection"
        },
        {
            "id": 3, "title": "Metroid Prime", "platform": "GCN", "year": 2002,
            "region": "EU", "condition": "Sealed", "status": "Not started",
            "price": 60, "purchaseDate": "2023-01-20", "ownership": "In Collection"
        },
        {
            "id": 4, "title": "Stardew Valley", "platform": "STEAM", "year": 2016,
            "region": "Region Free", "condition": "Digital", "status": "Backlog",
            "price": 11.99, "ownership": "In Collection"
        },
        {
            "id": 5, "title": "Mario Kart 8 Deluxe", "platform": "NS", "year": 2017,
            "region": "EU", "condition": "Game and box", "status": "Completed",
            "price": 39.5, "purchaseDate": "2019-12-25", "ownership": "Lent Out",
            "note": "Lent to Sam"
        }
    ]);

    match games {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Write the sample collection. An existing collection is kept unless
/// `force` is set. Returns how many games were written.
pub fn seed_library(store: &RecordStore, force: bool) -> Result<usize, StoreError> {
    let existing = store.load(GAMES_KEY)?;
    if !existing.is_empty() && !force {
        info!(
            "Library already holds {} games, leaving it untouched",
            existing.len()
        );
        return Ok(0);
    }

    let games = sample_games();
    store.save(GAMES_KEY, &games)?;
    info!("Seeded {} games", games.len());
    Ok(games.len())
}
