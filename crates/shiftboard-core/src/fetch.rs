//! Per-day task-list query loop.
//!
//! One upstream request per calendar day in the inclusive range. A failed or
//! empty day is recorded as a warning and the loop moves on; no retries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{Credentials, Settings};
use crate::error::{Result, ValidationError};
use crate::model::TaskList;
use crate::upstream::{extract_task_lists, normalize_task_lists, SevenShiftsClient, TaskListSource};

/// Caller-facing query.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskListQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Only the first id is sent upstream.
    pub location_ids: Vec<String>,
    pub user_id: Option<String>,
    pub debug: bool,
}

impl TaskListQuery {
    /// Build a query from raw string arguments.
    ///
    /// `start` defaults to `today`, `end` to `start`. `location_ids` is a
    /// comma-separated list; blanks are dropped.
    pub fn from_args(
        start: Option<&str>,
        end: Option<&str>,
        location_ids: Option<&str>,
        user_id: Option<&str>,
        debug: bool,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let start = match non_blank(start) {
            Some(s) => parse_day("start_date", s)?,
            None => today,
        };
        let end = match non_blank(end) {
            Some(s) => parse_day("end_date", s)?,
            None => start,
        };
        Ok(Self {
            start,
            end,
            location_ids: split_ids(location_ids.unwrap_or_default()),
            user_id: non_blank(user_id).map(String::from),
            debug,
        })
    }

    pub fn location_id(&self) -> Option<&str> {
        self.location_ids.first().map(String::as_str)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_day(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Split a comma-separated id list, trimming and dropping empties.
pub fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Every calendar day from `start` to `end`, both included.
pub fn enumerate_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Parameters of one upstream request.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRequest {
    pub day: NaiveDate,
    pub location_id: Option<String>,
    pub user_id: Option<String>,
}

/// Debug record of one upstream request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTrace {
    pub day: String,
    pub path: String,
    /// HTTP status, absent when no response arrived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Normalized lists plus the per-day warnings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchOutcome {
    pub lists: Vec<TaskList>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Vec<DayTrace>>,
}

/// Run `query` against `source`, one request per day.
///
/// Never fails: per-day errors and empty days end up in `warnings`.
pub async fn fetch_task_lists<S: TaskListSource>(source: &S, query: &TaskListQuery) -> FetchOutcome {
    let days = enumerate_days(query.start, query.end);
    let mut warnings = Vec::new();
    let mut traces = Vec::with_capacity(days.len());
    let mut merged = Vec::new();

    for day in days {
        let request = DayRequest {
            day,
            location_id: query.location_id().map(String::from),
            user_id: query.user_id.clone(),
        };
        let path = source.request_path(&request);

        match source.fetch_day(&request).await {
            Ok(response) => {
                traces.push(DayTrace {
                    day: day.to_string(),
                    path,
                    status: Some(response.status),
                });
                let records = extract_task_lists(&response.body);
                if records.is_empty() {
                    warn!(%day, "empty result");
                    warnings.push(format!("Day {day}: empty result"));
                } else {
                    merged.extend(records);
                }
            }
            Err(err) => {
                warn!(%day, error = %err, "day query failed");
                traces.push(DayTrace {
                    day: day.to_string(),
                    path,
                    status: err.status(),
                });
                warnings.push(format!("Day {day}: {err}"));
            }
        }
    }

    let lists = normalize_task_lists(&merged);
    info!(
        lists = lists.len(),
        warnings = warnings.len(),
        start = %query.start,
        end = %query.end,
        "task list query finished"
    );

    FetchOutcome {
        lists,
        warnings,
        raw: query.debug.then_some(traces),
    }
}

/// Full response object of a checklist query.
#[derive(Debug, Clone, Serialize)]
pub struct ChecklistResponse {
    pub start: String,
    pub end: String,
    #[serde(flatten)]
    pub outcome: FetchOutcome,
    #[serde(rename = "refreshedAt")]
    pub refreshed_at: DateTime<Utc>,
}

impl ChecklistResponse {
    pub fn new(query: &TaskListQuery, outcome: FetchOutcome, refreshed_at: DateTime<Utc>) -> Self {
        Self {
            start: query.start.to_string(),
            end: query.end.to_string(),
            outcome,
            refreshed_at,
        }
    }
}

/// Query the 7shifts API over HTTP and wrap the result for output.
///
/// # Errors
/// Only client construction can fail; every per-day problem becomes a warning.
pub async fn query_checklists(
    credentials: Credentials,
    settings: &Settings,
    query: &TaskListQuery,
) -> Result<ChecklistResponse> {
    let client = SevenShiftsClient::new(credentials, settings)?;
    let outcome = fetch_task_lists(&client, query).await;
    Ok(ChecklistResponse::new(query, outcome, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_enumerate_days_crosses_month() {
        let days: Vec<String> = enumerate_days(date("2025-01-30"), date("2025-02-01"))
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(days, vec!["2025-01-30", "2025-01-31", "2025-02-01"]);
    }

    #[test]
    fn test_enumerate_single_and_reversed() {
        assert_eq!(enumerate_days(date("2024-02-29"), date("2024-02-29")).len(), 1);
        assert!(enumerate_days(date("2025-02-02"), date("2025-02-01")).is_empty());
    }

    #[test]
    fn test_query_defaults() {
        let today = date("2025-06-01");
        let q = TaskListQuery::from_args(None, None, None, None, false, today).unwrap();
        assert_eq!(q.start, today);
        assert_eq!(q.end, today);
        assert!(q.location_ids.is_empty());
        assert_eq!(q.location_id(), None);

        let q = TaskListQuery::from_args(Some("2025-01-30"), Some(" "), None, Some(""), true, today).unwrap();
        assert_eq!(q.end, date("2025-01-30"));
        assert_eq!(q.user_id, None);
        assert!(q.debug);
    }

    #[test]
    fn test_query_location_ids_first_used() {
        let q = TaskListQuery::from_args(None, None, Some(" 147255, ,9 ,"), None, false, date("2025-06-01"))
            .unwrap();
        assert_eq!(q.location_ids, vec!["147255", "9"]);
        assert_eq!(q.location_id(), Some("147255"));
    }

    #[test]
    fn test_query_rejects_bad_dates() {
        let err = TaskListQuery::from_args(Some("30.01.2025"), None, None, None, false, date("2025-06-01"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { ref field, .. } if field == "start_date"));
    }

    #[test]
    fn test_response_shape() {
        let q = TaskListQuery::from_args(Some("2025-01-30"), None, None, None, false, date("2025-06-01"))
            .unwrap();
        let response = ChecklistResponse::new(&q, FetchOutcome::default(), Utc::now());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["start"], "2025-01-30");
        assert_eq!(json["end"], "2025-01-30");
        assert!(json["lists"].as_array().unwrap().is_empty());
        assert!(json["warnings"].as_array().unwrap().is_empty());
        assert!(json.get("raw").is_none());
        assert!(json.get("refreshedAt").is_some());
    }
}
