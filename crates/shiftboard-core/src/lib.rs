//! # Shiftboard Core Library
//!
//! This library provides the logic behind the Shiftboard checklist dashboard.
//! It polls the 7shifts task-list API once per calendar day, normalizes the
//! loosely-shaped records it gets back, and derives per-checklist status
//! counters and per-group KPIs. Everything is recomputed on every query; there
//! is no persistence layer.
//!
//! ## Architecture
//!
//! - **Upstream**: HTTP client, response envelope extraction and field-fallback
//!   normalization for the task-list API
//! - **Fetch**: per-day query loop that downgrades failures to warnings
//! - **Grouping**: name-based checklist categorization
//! - **Status**: deadline resolution and per-task status classification
//! - **Dashboard**: KPI tiles, chart series and filterable table rows
//!
//! ## Key Components
//!
//! - [`fetch_task_lists`]: Run a query over a date range
//! - [`GroupKey`]: Checklist category derived from its name
//! - [`count_list`]: Classify the tasks of a single checklist
//! - [`Dashboard`]: Aggregated view over a set of checklists

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod grouping;
pub mod model;
pub mod status;
pub mod upstream;

pub use config::{Credentials, Settings};
pub use dashboard::{
    ActivityBucket, Dashboard, GroupFilter, GroupSummary, StatusFilter, StatusSummary, TableRow,
};
pub use error::{ConfigError, CoreError, UpstreamError, ValidationError};
pub use fetch::{
    enumerate_days, fetch_task_lists, query_checklists, ChecklistResponse, DayRequest, DayTrace, FetchOutcome,
    TaskListQuery,
};
pub use grouping::{detect_group, GroupKey};
pub use model::{Counters, Task, TaskList};
pub use status::{count_list, parse_timestamp, progress_percent, resolve_list_deadline};
pub use upstream::{SevenShiftsClient, TaskListSource};
