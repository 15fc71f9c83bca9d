//! Content host: the single region whose markup the navigator replaces

use super::DocumentInner;
use std::sync::{Arc, Mutex, PoisonError};

/// Container that accepts whole-markup replacement
pub trait ContentHost: Send + Sync {
    /// Selector the host was resolved from
    fn selector(&self) -> &str;

    /// Replace everything inside the host
    fn replace_contents(&self, markup: String);

    /// Current markup
    fn contents(&self) -> String;
}

/// A named region of a [`super::Document`]
#[derive(Clone)]
pub struct ContentRegion {
    selector: String,
    inner: Arc<Mutex<DocumentInner>>,
}

impl ContentRegion {
    pub(super) fn new(selector: String, inner: Arc<Mutex<DocumentInner>>) -> Self {
        Self { selector, inner }
    }
}

impl ContentHost for ContentRegion {
    fn selector(&self) -> &str {
        &self.selector
    }

    fn replace_contents(&self, markup: String) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.regions.insert(self.selector.clone(), markup);
    }

    fn contents(&self) -> String {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.regions.get(&self.selector).cloned().unwrap_or_default()
    }
}

impl std::fmt::Debug for ContentRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRegion")
            .field("selector", &self.selector)
            .finish()
    }
}
