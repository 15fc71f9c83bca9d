//! Persistent record store
//!
//! Named collections of JSON records on top of a synchronous key/value
//! backend. Every collection is a JSON array stored under its key; every
//! record is a JSON object carrying an `id`.

pub mod backend;

pub use backend::{FileStorage, MemoryStorage, StorageBackend};

use crate::error::StoreError;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// A stored record
pub type Record = serde_json::Map<String, Value>;

/// Field holding a record's identifier
pub const ID_FIELD: &str = "id";

/// Record collections keyed by name
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn StorageBackend>,
}

/// Identifier of a record rendered as a string
///
/// Numbers and strings compare equal when they render the same, so `42` and
/// `"42"` name the same record.
pub fn record_id(record: &Record) -> Option<String> {
    match record.get(ID_FIELD)? {
        Value::Null => None,
        Value::String(id) => Some(id.clone()),
        other => Some(other.to_string()),
    }
}

fn matches_id(record: &Record, id: &str) -> bool {
    record_id(record).as_deref() == Some(id)
}

impl RecordStore {
    /// Create a store over the given backend
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Create a store that lives in memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Load every record of a collection; a missing collection is empty
    pub fn load(&self, key: &str) -> Result<Vec<Record>, StoreError> {
        let Some(raw) = self.backend.get_item(key)? else {
            return Ok(Vec::new());
        };

        let invalid = || StoreError::InvalidCollection {
            key: key.to_string(),
        };
        match serde_json::from_str::<Value>(&raw)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(record) => Ok(record),
                    _ => Err(invalid()),
                })
                .collect(),
            _ => Err(invalid()),
        }
    }

    /// Replace a collection
    pub fn save(&self, key: &str, records: &[Record]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records)?;
        self.backend.set_item(key, raw)
    }

    /// Append a record under a freshly generated identifier
    ///
    /// Fields of `record` win over the generated identifier, so a record that
    /// already carries an `id` keeps it.
    pub fn add(&self, key: &str, record: Record) -> Result<Record, StoreError> {
        let mut records = self.load(key)?;

        let mut stored = Record::new();
        stored.insert(
            ID_FIELD.to_string(),
            Value::String(Uuid::new_v4().simple().to_string()),
        );
        stored.extend(record);

        records.push(stored.clone());
        self.save(key, &records)?;
        Ok(stored)
    }

    /// Find a record by identifier
    pub fn get(&self, key: &str, id: &str) -> Result<Option<Record>, StoreError> {
        Ok(self
            .load(key)?
            .into_iter()
            .find(|record| matches_id(record, id)))
    }

    /// Shallow-merge `updates` into a record. Returns false when no record matched.
    pub fn update(&self, key: &str, id: &str, updates: Record) -> Result<bool, StoreError> {
        let mut records = self.load(key)?;
        let Some(record) = records.iter_mut().find(|record| matches_id(record, id)) else {
            return Ok(false);
        };
        record.extend(updates);
        self.save(key, &records)?;
        Ok(true)
    }

    /// Delete every record with the identifier
    pub fn remove(&self, key: &str, id: &str) -> Result<(), StoreError> {
        let mut records = self.load(key)?;
        records.retain(|record| !matches_id(record, id));
        self.save(key, &records)
    }

    /// Check whether a record exists
    pub fn exists(&self, key: &str, id: &str) -> Result<bool, StoreError> {
        Ok(self.get(key, id)?.is_some())
    }

    /// Read a scalar setting
    ///
    /// Values are stored as JSON; a value that is not valid JSON is returned
    /// raw.
    pub fn get_setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.backend.get_item(key)?.map(|raw| {
            match serde_json::from_str::<Value>(&raw) {
                Ok(Value::String(value)) => value,
                Ok(other) => other.to_string(),
                Err(_) => raw,
            }
        }))
    }

    /// Write a scalar setting
    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_item(key, raw)
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore").finish_non_exhaustive()
    }
}
