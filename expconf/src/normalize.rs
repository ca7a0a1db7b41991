//! Removal of enforce markers once merging is complete.
//!
//! Markers only steer the merge, so they must survive every merge round and
//! be stripped exactly once at the end.

use crate::merge::parse_key;
use crate::value::{Mapping, Value};

/// Strip trailing enforce markers from every mapping key in `value`.
///
/// Mappings nested in sequences are visited too. If a mapping holds both
/// `key` and `key!`, the marked entry's value wins and takes the bare
/// key's position.
///
/// # Examples
///
/// ```
/// use expconf::normalize::strip_enforce_markers;
/// use expconf::Value;
/// use serde_json::json;
///
/// let mut doc = Value::from(json!({"opt!": {"lr!": 0.1}, "runs": [{"seed!": 1}]}));
/// strip_enforce_markers(&mut doc);
/// assert_eq!(doc, Value::from(json!({"opt": {"lr": 0.1}, "runs": [{"seed": 1}]})));
/// ```
pub fn strip_enforce_markers(value: &mut Value) {
    match value {
        Value::Mapping(map) => strip_mapping(map),
        Value::Sequence(items) => items.iter_mut().for_each(strip_enforce_markers),
        _ => {}
    }
}

/// Strip enforce markers from the keys of `map`, recursively.
pub fn strip_mapping(map: &mut Mapping) {
    let entries = std::mem::take(map);
    map.reserve(entries.len());

    for (raw_key, mut value) in entries {
        strip_enforce_markers(&mut value);
        let (key, enforced) = parse_key(&raw_key);
        if enforced || !map.contains_key(key) {
            map.insert(key.to_string(), value);
        }
    }
}

/// Returns true if any mapping key in `value` still carries a marker.
#[must_use]
pub fn has_enforce_markers(value: &Value) -> bool {
    match value {
        Value::Mapping(map) => map
            .iter()
            .any(|(key, value)| parse_key(key).1 || has_enforce_markers(value)),
        Value::Sequence(items) => items.iter().any(has_enforce_markers),
        _ => false,
    }
}
