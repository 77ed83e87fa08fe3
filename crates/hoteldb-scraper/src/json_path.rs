//! Lookups into embedded payloads where any key may be missing at any depth.

use serde_json::Value;

/// Walks `path` from `root`, returning the value at the end of it.
///
/// Returns `None` if any segment is missing, if an intermediate value is not
/// an object, or if the final value is JSON `null`.
pub fn value_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = root;
    for key in path {
        current = current.get(key)?;
    }
    (!current.is_null()).then_some(current)
}

/// Like [`value_at`] but expects an array, treating a missing path or a
/// non-array value as empty.
pub fn array_at<'a>(root: &'a Value, path: &[&str]) -> &'a [Value] {
    value_at(root, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
