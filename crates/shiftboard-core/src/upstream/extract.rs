//! Response envelope extraction.

use serde_json::Value;

/// Envelope keys that may hold the task-list array, in lookup order.
const ENVELOPE_KEYS: &[&str] = &["data", "task_lists", "items"];

/// Pull the raw task-list records out of a response body.
///
/// Accepts `{"data": [...]}`, `{"task_lists": [...]}`, `{"items": [...]}` or
/// a bare array. Anything else, including a non-JSON text body, yields an
/// empty list.
pub fn extract_task_lists(body: &Value) -> Vec<Value> {
    ENVELOPE_KEYS
        .iter()
        .find_map(|k| body.get(*k).and_then(Value::as_array))
        .or_else(|| body.as_array())
        .cloned()
        .unwrap_or_default()
}
