//! Edits to the stored game collection

use super::settings::GAMES_KEY;
use pagenav_core::error::StoreError;
use pagenav_core::{Record, RecordStore};
use serde_json::Value;
use tracing::info;

/// Field value typed in by the user. Numbers are stored as numbers, anything
/// else as text.
pub fn field_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Number(_)) => value,
        _ => Value::String(raw.to_string()),
    }
}

/// Changes to the games under [`GAMES_KEY`]
#[derive(Debug, Clone)]
pub struct GameLibrary {
    store: RecordStore,
}

impl GameLibrary {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Set one field of a game. Returns false when no game has the id.
    ///
    /// The game keeps its id whatever field is written.
    pub fn edit(&self, id: &str, field: &str, raw: &str) -> Result<bool, StoreError> {
        let Some(game) = self.store.get(GAMES_KEY, id)? else {
            return Ok(false);
        };

        let mut patch = Record::new();
        patch.insert(field.to_string(), field_value(raw));
        if let Some(own_id) = game.get("id") {
            patch.insert("id".to_string(), own_id.clone());
        }

        let updated = self.store.update(GAMES_KEY, id, patch)?;
        info!("Game {} field '{}' set to '{}'", id, field, raw);
        Ok(updated)
    }

    /// Delete one game. Returns false when no game has the id.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        if !self.store.exists(GAMES_KEY, id)? {
            return Ok(false);
        }
        self.store.remove(GAMES_KEY, id)?;
        info!("Game {} deleted", id);
        Ok(true)
    }

    /// Delete every game, returning how many were removed
    pub fn delete_all(&self) -> Result<usize, StoreError> {
        let removed = self.store.load(GAMES_KEY)?.len();
        self.store.save(GAMES_KEY, &[])?;
        info!("Deleted all {} games", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::seed::seed_library;
    use serde_json::json;

    fn library() -> (RecordStore, GameLibrary) {
        let store = RecordStore::in_memory();
        seed_library(&store, false).unwrap();
        (store.clone(), GameLibrary::new(store))
    }

    #[test]
    fn test_field_values() {
        assert_eq!(field_value("2001"), json!(2001));
        assert_eq!(field_value("12.5"), json!(12.5));
        assert_eq!(field_value("042"), json!("042"));
        assert_eq!(field_value("Completed"), json!("Completed"));
    }

    #[test]
    fn test_edit_merges_one_field() {
        let (store, library) = library();
        assert!(library.edit("3", "status", "Completed").unwrap());
        assert!(library.edit("3", "price", "45").unwrap());

        let game = store.get(GAMES_KEY, "3").unwrap().unwrap();
        assert_eq!(game["status"], json!("Completed"));
        assert_eq!(game["price"], json!(45));
        assert_eq!(game["title"], json!("Metroid Prime"));
        assert_eq!(game["id"], json!(3));
    }

    #[test]
    fn test_edit_keeps_id() {
        let (store, library) = library();
        assert!(library.edit("2", "id", "99").unwrap());
        assert!(store.exists(GAMES_KEY, "2").unwrap());
        assert!(!store.exists(GAMES_KEY, "99").unwrap());
    }

    #[test]
    fn test_missing_games_are_reported() {
        let (_, library) = library();
        assert!(!library.edit("42", "status", "Playing").unwrap());
        assert!(!library.delete("42").unwrap());
    }

    #[test]
    fn test_delete_and_delete_all() {
        let (store, library) = library();
        assert!(library.delete("1").unwrap());
        assert_eq!(store.load(GAMES_KEY).unwrap().len(), 4);

        assert_eq!(library.delete_all().unwrap(), 4);
        assert!(store.load(GAMES_KEY).unwrap().is_empty());
        assert_eq!(library.delete_all().unwrap(), 0);
    }
}
