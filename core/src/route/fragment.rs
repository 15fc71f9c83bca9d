//! URL fragment encoding and decoding
//!
//! Wire format: `#<pageKey>` or `#<pageKey>?id=<recordId>`. Only the `id` query
//! parameter is recognized; anything else in the query is dropped.

use super::key::{NavigationParams, PageKey};
use url::form_urlencoded;

/// Marker that starts a URL fragment
pub const FRAGMENT_MARKER: char = '#';

const RECORD_ID_PARAM: &str = "id";

/// Result of decoding a URL fragment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFragment {
    /// Page key, `None` when the fragment names no page
    pub page_key: Option<PageKey>,
    /// Decoded parameters
    pub params: NavigationParams,
}

/// Encode a page key and its parameters as a URL fragment
pub fn encode_fragment(page_key: &PageKey, params: &NavigationParams) -> String {
    let mut fragment = format!("{}{}", FRAGMENT_MARKER, page_key);
    if let Some(record_id) = params.record_id() {
        let encoded: String = form_urlencoded::byte_serialize(record_id.as_bytes()).collect();
        fragment.push('?');
        fragment.push_str(RECORD_ID_PARAM);
        fragment.push('=');
        fragment.push_str(&encoded);
    }
    fragment
}

/// Decode a URL fragment, with or without its leading marker
pub fn decode_fragment(fragment: &str) -> ParsedFragment {
    let fragment = fragment
        .strip_prefix(FRAGMENT_MARKER)
        .unwrap_or(fragment);

    let (key, query) = match fragment.split_once('?') {
        Some((key, query)) => (key, Some(query)),
        None => (fragment, None),
    };

    let record_id = query.and_then(|query| {
        form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == RECORD_ID_PARAM)
            .map(|(_, value)| value.into_owned())
    });

    ParsedFragment {
        page_key: (!key.is_empty()).then(|| PageKey::from(key)),
        params: NavigationParams { record_id },
    }
}
