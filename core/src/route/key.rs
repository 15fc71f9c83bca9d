//! Page keys and navigation parameters

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for a registered page
///
/// Case-sensitive and opaque. The same string is used as the URL fragment and
/// as the `pageKey` field of history state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageKey(pub String);

impl PageKey {
    /// Create a new page key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PageKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for PageKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Parameters carried alongside a page key on every navigation path
///
/// `record_id` is passed through untouched; it is never coerced to a number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

impl NavigationParams {
    /// Parameters without a record
    pub fn none() -> Self {
        Self::default()
    }

    /// Parameters pointing at a single record
    pub fn with_record(record_id: impl Into<String>) -> Self {
        Self {
            record_id: Some(record_id.into()),
        }
    }

    /// Get the record identifier, if any
    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_key_traits() {
        let key = PageKey::from("games-list-page");

        assert_eq!(format!("{}", key), "games-list-page");

        let s: &str = key.as_ref();
        assert_eq!(s, "games-list-page");

        let s: &str = key.borrow();
        assert_eq!(s, "games-list-page");
    }

    #[test]
    fn test_page_key_is_case_sensitive() {
        assert_ne!(PageKey::from("Home"), PageKey::from("home"));
    }

    #[test]
    fn test_params_serialize_as_camel_case() {
        let params = NavigationParams::with_record("042");
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, serde_json::json!({ "recordId": "042" }));

        let empty = serde_json::to_value(NavigationParams::none()).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }
}
