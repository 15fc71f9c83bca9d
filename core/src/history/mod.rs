//! Session history
//!
//! An in-process model of the browser's per-tab history stack: a list of
//! entries (URL fragment plus optional structured state) and a cursor.

use crate::events::PopStateEvent;
use crate::route::{NavigationParams, PageKey, FRAGMENT_MARKER};
use serde::{Deserialize, Serialize};

/// Structured state the navigator stores with every entry it writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    pub page_key: PageKey,
    #[serde(default)]
    pub params: NavigationParams,
}

impl HistoryState {
    /// Create a new history state
    pub fn new(page_key: PageKey, params: NavigationParams) -> Self {
        Self { page_key, params }
    }

    /// Recover navigator state from an entry's raw state, if it is ours
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Raw state to store with a history entry
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "pageKey": self.page_key,
            "params": self.params,
        })
    }
}

/// One session history entry
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// URL fragment including the marker, or empty
    pub fragment: String,
    /// Structured state, `None` for entries the app did not write
    pub state: Option<serde_json::Value>,
}

/// History stack with a cursor on the active entry
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
}

fn normalize(fragment: &str) -> String {
    let bare = fragment.strip_prefix(FRAGMENT_MARKER).unwrap_or(fragment);
    if bare.is_empty() {
        String::new()
    } else {
        format!("{}{}", FRAGMENT_MARKER, bare)
    }
}

impl SessionHistory {
    /// Create a history holding the entry for the initial URL
    pub fn new(initial_fragment: &str) -> Self {
        Self {
            entries: vec![HistoryEntry {
                fragment: normalize(initial_fragment),
                state: None,
            }],
            index: 0,
        }
    }

    /// The active entry
    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Position of the active entry
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false, a history holds at least its initial entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry after the active one, discarding any forward entries
    pub fn push_state(&mut self, state: serde_json::Value, fragment: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            fragment: normalize(fragment),
            state: Some(state),
        });
        self.index = self.entries.len() - 1;
    }

    /// Overwrite the active entry without growing history
    pub fn replace_state(&mut self, state: serde_json::Value, fragment: &str) {
        self.entries[self.index] = HistoryEntry {
            fragment: normalize(fragment),
            state: Some(state),
        };
    }

    /// Move the cursor by `delta` entries
    ///
    /// Returns the popstate event to fire, or `None` when the move is out of
    /// range (or zero) and nothing changed.
    pub fn go(&mut self, delta: isize) -> Option<PopStateEvent> {
        if delta == 0 {
            return None;
        }
        let target = self.index.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }
        self.index = target;
        Some(PopStateEvent {
            state: self.current().state.clone(),
        })
    }

    /// Step back one entry
    pub fn back(&mut self) -> Option<PopStateEvent> {
        self.go(-1)
    }

    /// Step forward one entry
    pub fn forward(&mut self) -> Option<PopStateEvent> {
        self.go(1)
    }

    /// Simulate the user editing the fragment in the address bar
    ///
    /// A different fragment pushes a stateless entry and fires popstate;
    /// the same fragment changes nothing.
    pub fn edit_fragment(&mut self, fragment: &str) -> Option<PopStateEvent> {
        let fragment = normalize(fragment);
        if fragment == self.current().fragment {
            return None;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            fragment,
            state: None,
        });
        self.index = self.entries.len() - 1;
        Some(PopStateEvent { state: None })
    }
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(key: &str) -> serde_json::Value {
        HistoryState::new(key.into(), NavigationParams::none()).to_value()
    }

    #[test]
    fn test_new_history_has_initial_entry() {
        let history = SessionHistory::new("games?id=1");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().fragment, "#games?id=1");
        assert!(history.current().state.is_none());
    }

    #[test]
    fn test_replace_does_not_grow() {
        let mut history = SessionHistory::default();
        history.replace_state(state("home"), "#home");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().fragment, "#home");
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = SessionHistory::default();
        history.replace_state(state("a"), "#a");
        history.push_state(state("b"), "#b");
        history.push_state(state("c"), "#c");
        assert!(history.back().is_some());
        assert!(history.back().is_some());

        history.push_state(state("d"), "#d");
        let fragments: Vec<&str> = history.entries().iter().map(|e| e.fragment.as_str()).collect();
        assert_eq!(fragments, vec!["#a", "#d"]);
        assert!(history.forward().is_none());
    }

    #[test]
    fn test_go_out_of_range_is_ignored() {
        let mut history = SessionHistory::default();
        assert!(history.back().is_none());
        assert!(history.forward().is_none());
        assert!(history.go(0).is_none());
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn test_back_carries_entry_state() {
        let mut history = SessionHistory::default();
        history.replace_state(state("home"), "#home");
        history.push_state(state("games"), "#games");

        let event = history.back().unwrap();
        let restored = HistoryState::from_value(event.state.as_ref().unwrap()).unwrap();
        assert_eq!(restored.page_key, PageKey::from("home"));
        assert_eq!(history.current().fragment, "#home");
    }

    #[test]
    fn test_edit_fragment_pushes_stateless_entry() {
        let mut history = SessionHistory::default();
        history.replace_state(state("home"), "#home");

        assert!(history.edit_fragment("#home").is_none());
        let event = history.edit_fragment("#settings").unwrap();
        assert!(event.state.is_none());
        assert_eq!(history.len(), 2);
        assert_eq!(history.current().fragment, "#settings");
    }

    #[test]
    fn test_foreign_state_is_not_ours() {
        assert!(HistoryState::from_value(&serde_json::json!({ "scroll": 10 })).is_none());
        assert!(HistoryState::from_value(&serde_json::Value::Null).is_none());

        let ours = HistoryState::new("games".into(), NavigationParams::with_record("042"));
        assert_eq!(HistoryState::from_value(&ours.to_value()), Some(ours));
    }
}
