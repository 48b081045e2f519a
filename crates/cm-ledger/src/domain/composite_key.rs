//! Composite keys join an object type and an ordered list of attributes into a
//! single sortable string:
//!
//! ```text
//! U+0000 object_type U+0000 attr_1 U+0000 ... attr_n U+0000
//! ```
//!
//! Because every component is terminated by U+0000 and no component may
//! contain it, the key built from a leading subset of attributes is a strict
//! prefix of every key that extends it. A range scan over
//! `[prefix, prefix + U+10FFFF)` therefore returns exactly the keys sharing
//! those leading attributes.

use super::LedgerError;

/// Delimiter between composite key components.
pub const MIN_UNICODE_RUNE: char = '\u{0}';

/// Largest code point; used as the exclusive upper bound of a prefix range.
pub const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

fn validate_component(component: &str) -> Result<(), LedgerError> {
    if component.contains(MIN_UNICODE_RUNE) || component.contains(MAX_UNICODE_RUNE) {
        return Err(LedgerError::InvalidCompositeKey(format!(
            "component {component:?} contains U+0000 or U+10FFFF"
        )));
    }
    Ok(())
}

/// Builds the composite key for `object_type` and `attributes`.
///
/// Passing a leading subset of attributes yields the prefix used by
/// partial-key scans.
pub fn create_composite_key(object_type: &str, attributes: &[&str]) -> Result<String, LedgerError> {
    if object_type.is_empty() {
        return Err(LedgerError::InvalidCompositeKey(
            "object type must be non-empty".to_string(),
        ));
    }
    validate_component(object_type)?;

    let capacity = 2 + object_type.len() + attributes.iter().map(|a| a.len() + 1).sum::<usize>();
    let mut key = String::with_capacity(capacity);
    key.push(MIN_UNICODE_RUNE);
    key.push_str(object_type);
    key.push(MIN_UNICODE_RUNE);
    for attribute in attributes {
        validate_component(attribute)?;
        key.push_str(attribute);
        key.push(MIN_UNICODE_RUNE);
    }
    Ok(key)
}

/// Splits a composite key back into its object type and attributes.
pub fn split_composite_key(key: &str) -> Result<(String, Vec<String>), LedgerError> {
    let malformed = || LedgerError::InvalidCompositeKey(format!("malformed composite key {key:?}"));

    let body = key
        .strip_prefix(MIN_UNICODE_RUNE)
        .and_then(|rest| rest.strip_suffix(MIN_UNICODE_RUNE))
        .ok_or_else(malformed)?;

    let mut components = body.split(MIN_UNICODE_RUNE);
    let object_type = components
        .next()
        .filter(|t| !t.is_empty())
        .ok_or_else(malformed)?
        .to_string();
    let attributes = components.map(str::to_string).collect();
    Ok((object_type, attributes))
}

/// Half-open key range `[start, end)` covering every key with the given prefix.
pub fn prefix_range(prefix: &str) -> (String, String) {
    let mut end = String::with_capacity(prefix.len() + MAX_UNICODE_RUNE.len_utf8());
    end.push_str(prefix);
    end.push(MAX_UNICODE_RUNE);
    (prefix.to_string(), end)
}
