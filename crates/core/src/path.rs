//! Safe path resolution over JSON values
//!
//! Screen configurations address data with dotted paths such as
//! `sprintMetrics.placements.current` or `submissions.0.vendor.name`.
//! Lookups never panic: a missing key, an out-of-range index, or a step
//! into a scalar all resolve to `None`, which is the single "absent"
//! sentinel used throughout the interpreter.

use serde_json::{Map, Value};

/// Split a dotted path into its segments, skipping empty segments
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').map(str::trim).filter(|s| !s.is_empty())
}

/// Resolve `path` against `root`
///
/// An empty path resolves to `root` itself. Array elements are addressed
/// by decimal index.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in segments(path) {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Resolve `path`, treating absent values as `null`
pub fn lookup_or_null(root: &Value, path: &str) -> Value {
    lookup(root, path).cloned().unwrap_or(Value::Null)
}

/// True when `path` resolves to something other than `null`
pub fn is_present(root: &Value, path: &str) -> bool {
    matches!(lookup(root, path), Some(v) if !v.is_null())
}

/// Write `value` at `path`, creating intermediate objects as needed
///
/// Intermediate scalars are replaced by objects. An empty path replaces
/// the root.
pub fn insert_path(root: &mut Value, path: &str, value: Value) {
    let parts: Vec<&str> = segments(path).collect();
    insert_at(root, &parts, value);
}

fn insert_at(target: &mut Value, parts: &[&str], value: Value) {
    let Some((first, rest)) = parts.split_first() else {
        *target = value;
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        let child = map.entry(first.to_string()).or_insert(Value::Null);
        insert_at(child, rest, value);
    }
}

/// Text for a scalar value
///
/// Strings are returned verbatim (empty strings count as absent), numbers
/// and booleans are formatted. `null`, arrays, and objects have no scalar
/// text.
pub fn display_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric view of a value; numeric strings are accepted
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
