//! Raw task-list records into [`TaskList`] / [`Task`].
//!
//! The upstream field naming is not stable, so each logical field is read
//! through an ordered list of candidate keys declared once below. Lookups
//! never fail: missing fields fall back to placeholders.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::model::{Task, TaskList};

// List fields, first hit wins.
const LIST_NAME_KEYS: &[&str] = &["name", "title", "list_name"];
const LIST_DATE_KEYS: &[&str] = &["active_on_date", "date", "naive_date", "scheduled_for"];
const LIST_LOCATION_KEYS: &[&str] = &["location_id", "location", "locationId"];
const LIST_ASSIGNEE_KEYS: &[&str] = &[
    "assigned_to_name",
    "assigned_to_label",
    "assignee_label",
    "department_name",
    "role_name",
    "assignee",
];
const LIST_DUE_KEYS: &[&str] = &["due_time", "due_at", "due"];
const LIST_TASKS_KEYS: &[&str] = &["tasks", "task_items", "items"];

// Task fields.
const TASK_NAME_KEYS: &[&str] = &["name", "title", "task_name"];
const TASK_FLAG_KEYS: &[&str] = &["completed", "is_completed", "isComplete"];
const TASK_STATE_KEYS: &[&str] = &["status", "state"];
const TASK_COMPLETED_AT_KEYS: &[&str] = &["completed_at", "completedAt"];
const TASK_ASSIGNEE_KEYS: &[&str] = &["assignee_id", "assigneeId"];
const TASK_DUE_KEYS: &[&str] = &["due_at", "dueAt"];

pub const UNASSIGNED: &str = "Unassigned";

/// Strings that [`coerce_bool`] accepts as true, compared case-insensitively.
const TRUTHY_STRINGS: &[&str] = &["true", "yes", "completed", "done"];

/// Tolerant boolean reading of an upstream completion flag.
///
/// `true`, any non-zero number, and the strings in `TRUTHY_STRINGS` are true.
/// Everything else, including null and missing values, is false.
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.to_lowercase();
            TRUTHY_STRINGS.contains(&s.as_str())
        }
        _ => false,
    }
}

/// Whether a value counts as "set": not null, not false, not 0, not "".
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First key whose value is set.
fn first_set<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| record.get(*k)).find(|v| is_set(v))
}

/// First key whose value is present and non-null, even if empty.
fn first_non_null<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .find(|v| !v.is_null())
}

/// Render a scalar as text; strings are taken verbatim.
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn id_of(record: &Value) -> String {
    record
        .get("id")
        .filter(|v| !v.is_null())
        .map(text)
        .unwrap_or_default()
}

fn re_due_prefixed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bdo\s+([0-9]{1,2}:[0-9]{2})\b").unwrap())
}

fn re_bare_time() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([0-9]{1,2}:[0-9]{2})\b").unwrap())
}

/// Explicit due value of a list record, if any.
fn explicit_due(record: &Value) -> Option<String> {
    first_set(record, LIST_DUE_KEYS).map(text)
}

/// Target time for display: the explicit due field, otherwise a time parsed
/// from the name ("do 7:30" first, then any bare "H:MM").
pub fn due_time_hint(record: &Value) -> Option<String> {
    if let Some(direct) = explicit_due(record) {
        return Some(direct);
    }
    let name = record.get("name").filter(|v| is_set(v)).map(text).unwrap_or_default();
    re_due_prefixed()
        .captures(&name)
        .or_else(|| re_bare_time().captures(&name))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Normalize one raw task.
pub fn normalize_task(record: &Value) -> Task {
    let id = id_of(record);
    let completed_at = first_set(record, TASK_COMPLETED_AT_KEYS).map(text);

    let flagged = TASK_FLAG_KEYS
        .iter()
        .filter_map(|k| record.get(*k))
        .any(coerce_bool);
    let state_completed = TASK_STATE_KEYS
        .iter()
        .filter_map(|k| record.get(*k).and_then(Value::as_str))
        .any(|s| s.to_lowercase() == "completed");

    Task {
        name: first_set(record, TASK_NAME_KEYS)
            .map(text)
            .unwrap_or_else(|| format!("Task {id}")),
        completed: flagged || state_completed || completed_at.is_some(),
        completed_at,
        assignee_id: first_set(record, TASK_ASSIGNEE_KEYS).map(text),
        due_at: first_set(record, TASK_DUE_KEYS).map(text),
        id,
    }
}

/// Normalize one raw task list, including its nested tasks.
pub fn normalize_task_list(record: &Value) -> TaskList {
    let id = id_of(record);
    let tasks = first_set(record, LIST_TASKS_KEYS)
        .and_then(Value::as_array)
        .map(|arr| arr.iter().map(normalize_task).collect())
        .unwrap_or_default();

    TaskList {
        name: first_set(record, LIST_NAME_KEYS)
            .map(text)
            .unwrap_or_else(|| format!("List {id}")),
        date: first_set(record, LIST_DATE_KEYS).map(text).unwrap_or_default(),
        location_id: first_set(record, LIST_LOCATION_KEYS).map(text),
        assigned_to_label: first_non_null(record, LIST_ASSIGNEE_KEYS)
            .map(text)
            .unwrap_or_else(|| UNASSIGNED.to_string()),
        due: explicit_due(record),
        due_time_hint: due_time_hint(record),
        tasks,
        id,
    }
}

pub fn normalize_task_lists(records: &[Value]) -> Vec<TaskList> {
    records.iter().map(normalize_task_list).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_bool_table() {
        for v in [json!(true), json!(1), json!(-2.5), json!("TRUE"), json!("Yes"), json!("completed"), json!("Done")] {
            assert!(coerce_bool(&v), "{v} should be true");
        }
        for v in [json!(false), json!(0), json!(null), json!("no"), json!(""), json!("1"), json!([true]), json!({})] {
            assert!(!coerce_bool(&v), "{v} should be false");
        }
    }

    #[test]
    fn test_list_fallback_fields() {
        let raw = json!({
            "id": 17,
            "title": "Zamknięcie",
            "naive_date": "2025-01-30",
            "locationId": 147255,
            "role_name": "Kelner",
            "task_items": [{ "id": 1, "task_name": "Podłoga" }]
        });
        let list = normalize_task_list(&raw);
        assert_eq!(list.id, "17");
        assert_eq!(list.name, "Zamknięcie");
        assert_eq!(list.date, "2025-01-30");
        assert_eq!(list.location_id.as_deref(), Some("147255"));
        assert_eq!(list.assigned_to_label, "Kelner");
        assert_eq!(list.tasks.len(), 1);
        assert_eq!(list.tasks[0].name, "Podłoga");
    }

    #[test]
    fn test_list_placeholders() {
        let list = normalize_task_list(&json!({ "id": "abc", "name": "" }));
        assert_eq!(list.name, "List abc");
        assert_eq!(list.date, "");
        assert_eq!(list.location_id, None);
        assert_eq!(list.assigned_to_label, UNASSIGNED);
        assert!(list.tasks.is_empty());

        let anonymous = normalize_task_list(&json!({}));
        assert_eq!(anonymous.name, "List ");
    }

    #[test]
    fn test_assignee_keeps_first_non_null_even_if_empty() {
        let list = normalize_task_list(&json!({
            "assigned_to_name": null,
            "assigned_to_label": "",
            "role_name": "Barista"
        }));
        assert_eq!(list.assigned_to_label, "");
    }

    #[test]
    fn test_non_array_tasks_become_empty() {
        let list = normalize_task_list(&json!({ "tasks": { "id": 1 } }));
        assert!(list.tasks.is_empty());
    }

    #[test]
    fn test_empty_tasks_array_shadows_items() {
        let list = normalize_task_list(&json!({ "tasks": [], "items": [{ "id": 1 }] }));
        assert!(list.tasks.is_empty());
    }

    #[test]
    fn test_due_hint_from_name() {
        let hint = |name: &str| due_time_hint(&json!({ "name": name }));
        assert_eq!(hint("Otwarcie DO 7:30 (sala 10:00)").as_deref(), Some("7:30"));
        assert_eq!(hint("Przerwa 12:15 - kuchnia").as_deref(), Some("12:15"));
        assert_eq!(hint("Sprzątanie"), None);
    }

    #[test]
    fn test_explicit_due_wins_over_name() {
        let raw = json!({ "name": "Otwarcie do 7:30", "due_at": "2025-01-30T08:00:00Z" });
        let list = normalize_task_list(&raw);
        assert_eq!(list.due.as_deref(), Some("2025-01-30T08:00:00Z"));
        assert_eq!(list.due_time_hint.as_deref(), Some("2025-01-30T08:00:00Z"));
    }

    #[test]
    fn test_name_hint_is_not_a_deadline() {
        let list = normalize_task_list(&json!({ "name": "Otwarcie do 7:30" }));
        assert_eq!(list.due, None);
        assert_eq!(list.due_time_hint.as_deref(), Some("7:30"));
    }

    #[test]
    fn test_hint_ignores_title_fallback() {
        let list = normalize_task_list(&json!({ "title": "Otwarcie do 7:30" }));
        assert_eq!(list.name, "Otwarcie do 7:30");
        assert_eq!(list.due_time_hint, None);
    }

    #[test]
    fn test_task_completion_sources() {
        let done = |raw: Value| normalize_task(&raw).completed;
        assert!(done(json!({ "completed": "yes" })));
        assert!(done(json!({ "is_completed": 1 })));
        assert!(done(json!({ "isComplete": true })));
        assert!(done(json!({ "status": "Completed" })));
        assert!(done(json!({ "state": "COMPLETED" })));
        assert!(done(json!({ "completedAt": "2025-01-30T08:00:00Z" })));
        assert!(!done(json!({ "status": "done", "completed": false })));
        assert!(!done(json!({ "completed_at": "" })));
    }

    #[test]
    fn test_task_field_variants() {
        let task = normalize_task(&json!({
            "id": 5,
            "completedAt": "2025-01-30T08:00:00Z",
            "assigneeId": 99,
            "dueAt": "2025-01-30T09:00:00Z"
        }));
        assert_eq!(task.id, "5");
        assert_eq!(task.name, "Task 5");
        assert_eq!(task.completed_at.as_deref(), Some("2025-01-30T08:00:00Z"));
        assert_eq!(task.assignee_id.as_deref(), Some("99"));
        assert_eq!(task.due_at.as_deref(), Some("2025-01-30T09:00:00Z"));
    }
}
