//! Page registry

use super::definition::PageDefinition;
use crate::route::PageKey;
use std::collections::HashMap;

/// Mapping of page keys to their definitions
///
/// Built once before the navigator is constructed and never mutated after.
#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    pages: HashMap<PageKey, PageDefinition>,
}

impl PageRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page to the registry
    pub fn add_page(mut self, key: impl Into<PageKey>, page: PageDefinition) -> Self {
        self.pages.insert(key.into(), page);
        self
    }

    /// Look up a page by key
    pub fn get(&self, key: &str) -> Option<&PageDefinition> {
        self.pages.get(key)
    }

    /// Check whether a page is registered
    pub fn contains(&self, key: &str) -> bool {
        self.pages.contains_key(key)
    }

    /// All registered keys, sorted
    pub fn keys(&self) -> Vec<&PageKey> {
        let mut keys: Vec<&PageKey> = self.pages.keys().collect();
        keys.sort();
        keys
    }

    /// Number of registered pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no page is registered
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
