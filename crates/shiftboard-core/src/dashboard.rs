//! Dashboard aggregation over a set of checklists.
//!
//! Produces what the dashboard shows:
//! - **Group tiles**: completion percent, list and task counts per group
//! - **Summary tiles**: on-time / late / missed totals over the visible rows
//! - **Status per group**: bucket counts per group, in display order
//! - **Activity**: completed tasks per hour of day (UTC)
//! - **Table**: one row per checklist, filtered by group and status

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::grouping::{detect_group, GroupKey};
use crate::model::{Counters, TaskList};
use crate::status::{count_list, parse_timestamp};

/// Which groups the table shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupFilter {
    #[default]
    All,
    Only(GroupKey),
}

impl GroupFilter {
    pub fn matches(&self, group: GroupKey) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Only(g) => *g == group,
        }
    }
}

impl FromStr for GroupFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(GroupFilter::All)
        } else {
            s.parse().map(GroupFilter::Only)
        }
    }
}

impl fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupFilter::All => f.write_str("all"),
            GroupFilter::Only(g) => write!(f, "{g}"),
        }
    }
}

/// Which checklists the table shows, by their counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    /// Something done on time and nothing late or missed.
    OnTime,
    /// At least one late task.
    Late,
    /// At least one missed task.
    Missed,
}

impl StatusFilter {
    pub fn matches(&self, c: &Counters) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::OnTime => c.on_time > 0 && c.late == 0 && c.missed == 0,
            StatusFilter::Late => c.late > 0,
            StatusFilter::Missed => c.missed > 0,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "on_time" => Ok(StatusFilter::OnTime),
            "late" => Ok(StatusFilter::Late),
            "missed" => Ok(StatusFilter::Missed),
            _ => Err(ValidationError::InvalidValue {
                field: "status".into(),
                message: format!("unknown status filter '{s}' (expected all, on_time, late or missed)"),
            }),
        }
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub name: String,
    pub date: String,
    pub group: GroupKey,
    pub counters: Counters,
    pub percent: u32,
}

/// Tile and chart data for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub group: GroupKey,
    pub label: &'static str,
    pub lists: usize,
    pub tasks: u32,
    pub counters: Counters,
    pub percent: u32,
}

/// Totals over the visible table rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub on_time: u32,
    pub late: u32,
    pub missed: u32,
    pub total: u32,
}

/// Completed tasks in one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityBucket {
    /// "HH:00"
    pub hour: String,
    pub done: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub groups: Vec<GroupSummary>,
    pub summary: StatusSummary,
    pub activity: Vec<ActivityBucket>,
    pub rows: Vec<TableRow>,
}

impl Dashboard {
    /// Aggregate `lists` as of `now`.
    ///
    /// Group tiles and activity always cover every list; the filters only
    /// narrow the table and the summary tiles.
    pub fn build(
        lists: &[TaskList],
        now: DateTime<Utc>,
        group_filter: GroupFilter,
        status_filter: StatusFilter,
    ) -> Self {
        let classified: Vec<(&TaskList, GroupKey, Counters)> = lists
            .iter()
            .map(|l| (l, detect_group(&l.name), count_list(l, now)))
            .collect();

        let groups = GroupKey::ALL
            .iter()
            .map(|&group| {
                let members = classified.iter().filter(|(_, g, _)| *g == group);
                let lists = members.clone().count();
                let counters: Counters = members.map(|(_, _, c)| *c).sum();
                GroupSummary {
                    group,
                    label: group.label(),
                    lists,
                    tasks: counters.total(),
                    counters,
                    percent: counters.percent(),
                }
            })
            .collect();

        let rows: Vec<TableRow> = classified
            .iter()
            .filter(|(_, g, c)| group_filter.matches(*g) && status_filter.matches(c))
            .map(|(l, g, c)| TableRow {
                id: l.id.clone(),
                name: l.name.clone(),
                date: l.date.clone(),
                group: *g,
                counters: *c,
                percent: c.percent(),
            })
            .collect();

        let summary = rows.iter().fold(StatusSummary::default(), |acc, r| StatusSummary {
            on_time: acc.on_time + r.counters.on_time,
            late: acc.late + r.counters.late,
            missed: acc.missed + r.counters.missed,
            total: acc.total + r.counters.total(),
        });

        Self {
            groups,
            summary,
            activity: activity_by_hour(lists),
            rows,
        }
    }
}

/// Completed-task counts for each of the 24 hours (UTC) of completion.
pub fn activity_by_hour(lists: &[TaskList]) -> Vec<ActivityBucket> {
    let mut buckets = [0u32; 24];
    for task in lists.iter().flat_map(|l| &l.tasks) {
        if let Some(done) = task.completed_at.as_deref().and_then(parse_timestamp) {
            buckets[done.hour() as usize] += 1;
        }
    }
    buckets
        .iter()
        .enumerate()
        .map(|(h, &done)| ActivityBucket {
            hour: format!("{h:02}:00"),
            done,
        })
        .collect()
}
