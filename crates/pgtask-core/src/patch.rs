//! JSON merge patch (RFC 7386) creation and application.
//!
//! Arrays and scalars are replaced wholesale; objects are diffed key by key, with removed keys encoded as `null`.

use serde_json::{Map, Value};

/// Compute the merge patch that turns `before` into `after`.
///
/// Only changed keys appear in the result, so concurrent writers touching other fields are not clobbered.
pub fn create_merge_patch(before: &Value, after: &Value) -> Value {
    match (before, after) {
        (Value::Object(b), Value::Object(a)) => {
            let mut out = Map::new();
            for (key, old) in b {
                match a.get(key) {
                    None => {
                        out.insert(key.clone(), Value::Null);
                    }
                    Some(new) if new != old => {
                        out.insert(key.clone(), create_merge_patch(old, new));
                    }
                    Some(_) => {}
                }
            }
            for (key, new) in a {
                if !b.contains_key(key) {
                    out.insert(key.clone(), new.clone());
                }
            }
            Value::Object(out)
        }
        _ => after.clone(),
    }
}

/// Apply a merge patch to `target` in place.
pub fn apply_merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(fields) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(obj) = target {
        for (key, value) in fields {
            if value.is_null() {
                obj.remove(key);
            } else {
                apply_merge_patch(obj.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}

/// `true` when the patch changes nothing.
pub fn is_noop(patch: &Value) -> bool {
    matches!(patch, Value::Object(m) if m.is_empty())
}
