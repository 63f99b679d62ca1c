//! Canonical checklist shapes produced by normalization.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// A single checklist item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    /// Upstream completion flag. Display only; classification looks at
    /// `completed_at` instead.
    pub completed: bool,
    pub completed_at: Option<String>,
    pub assignee_id: Option<String>,
    pub due_at: Option<String>,
}

impl Task {
    /// Whether the task carries a completion timestamp at all.
    pub fn has_completion(&self) -> bool {
        self.completed_at.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// A checklist (upstream "task list") for one day and location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: String,
    pub name: String,
    /// `YYYY-MM-DD`, empty when upstream gave none.
    pub date: String,
    pub location_id: Option<String>,
    pub assigned_to_label: String,
    /// Explicit list-level deadline as sent upstream.
    pub due: Option<String>,
    /// Target time for display, e.g. "7:30" from a name like "Otwarcie do 7:30".
    pub due_time_hint: Option<String>,
    pub tasks: Vec<Task>,
}

/// Task counts per status bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Counters {
    pub on_time: u32,
    pub late: u32,
    pub missed: u32,
    pub in_progress: u32,
}

impl Counters {
    pub fn total(&self) -> u32 {
        self.on_time + self.late + self.missed + self.in_progress
    }

    /// Tasks that were completed, on time or not.
    pub fn done(&self) -> u32 {
        self.on_time + self.late
    }

    pub fn percent(&self) -> u32 {
        crate::status::progress_percent(self)
    }
}

impl Add for Counters {
    type Output = Counters;

    fn add(self, rhs: Counters) -> Counters {
        Counters {
            on_time: self.on_time + rhs.on_time,
            late: self.late + rhs.late,
            missed: self.missed + rhs.missed,
            in_progress: self.in_progress + rhs.in_progress,
        }
    }
}

impl AddAssign for Counters {
    fn add_assign(&mut self, rhs: Counters) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Counters {
    fn sum<I: Iterator<Item = Counters>>(iter: I) -> Counters {
        iter.fold(Counters::default(), Add::add)
    }
}
