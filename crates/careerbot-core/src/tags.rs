//! Tag column serialization.
//!
//! Tags are persisted as a JSON array of strings in a single TEXT column,
//! e.g. `["analytical","under_18"]`. JSON quoting means tag values may
//! contain commas or any other character without ambiguity. An empty tag
//! list is stored as `[]`; an empty or NULL column decodes to no tags.

use crate::error::{StoreError, StoreResult};

/// Encode a tag list for storage, preserving order and duplicates.
///
/// ```rust
/// use careerbot_core::tags::{decode_tags, encode_tags};
///
/// let tags = vec!["creative".to_string(), "a,b".to_string()];
/// let text = encode_tags(&tags);
/// assert_eq!(text, r#"["creative","a,b"]"#);
/// assert_eq!(decode_tags(Some(&text)).unwrap(), tags);
/// ```
pub fn encode_tags(tags: &[String]) -> String {
    // Serializing a slice of strings cannot fail.
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a stored tag column back into an ordered tag list.
pub fn decode_tags(raw: Option<&str>) -> StoreResult<Vec<String>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text)
            .map_err(|e| StoreError::corrupt(format!("invalid tag list {:?}: {}", text, e))),
    }
}
