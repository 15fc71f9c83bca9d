//! Route identifiers and URL fragment handling
//!
//! A route is a [`PageKey`] plus optional [`NavigationParams`]. Both travel
//! through the URL fragment (`#<pageKey>?id=<recordId>`), the session history
//! state and navigation requests.

pub mod fragment;
pub mod key;

// Re-export commonly used types
pub use fragment::{decode_fragment, encode_fragment, ParsedFragment, FRAGMENT_MARKER};
pub use key::{NavigationParams, PageKey};
