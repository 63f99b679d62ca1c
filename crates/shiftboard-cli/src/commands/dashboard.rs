//! Terminal dashboard.
//!
//! Renders the group tiles, the on-time/late/missed summary, both charts and
//! the checklist table. `--watch` re-polls on the configured interval.

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use shiftboard_core::{
    query_checklists, ChecklistResponse, Credentials, Dashboard, GroupFilter, Settings,
    StatusFilter,
};
use std::fmt::Write as _;
use tracing::warn;

use super::query::{self, QueryArgs};

const BAR_WIDTH: usize = 40;

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub query: QueryArgs,
    /// Table group filter: all, plaza32a, wydma33, toalety, toalety_restauracja, restauracja
    #[arg(long, default_value = "all")]
    pub group: GroupFilter,
    /// Table status filter: all, on_time, late, missed
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,
    /// Print the aggregated dashboard as JSON
    #[arg(long)]
    pub json: bool,
    /// Re-poll on the configured refresh interval until interrupted
    #[arg(long)]
    pub watch: bool,
}

#[derive(Serialize)]
struct DashboardOutput<'a> {
    start: &'a str,
    end: &'a str,
    warnings: &'a [String],
    #[serde(rename = "refreshedAt")]
    refreshed_at: DateTime<Utc>,
    #[serde(flatten)]
    dashboard: &'a Dashboard,
}

pub fn run(args: DashboardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (settings, response) = query::execute(&args.query)?;
    print_once(&args, &response)?;

    if !args.watch {
        return Ok(());
    }

    let credentials = Credentials::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(watch(args, credentials, settings))
}

async fn watch(
    args: DashboardArgs,
    credentials: Credentials,
    settings: Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = tokio::time::interval(settings.refresh_interval());
    // the first tick fires immediately and the initial render already happened
    ticker.tick().await;
    loop {
        ticker.tick().await;
        // re-resolve so a default "today" follows the calendar
        let query = args.query.to_query(&settings)?;
        match query_checklists(credentials.clone(), &settings, &query).await {
            Ok(response) => print_once(&args, &response)?,
            Err(e) => warn!(error = %e, "refresh failed"),
        }
    }
}

fn print_once(
    args: &DashboardArgs,
    response: &ChecklistResponse,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = Dashboard::build(
        &response.outcome.lists,
        Utc::now(),
        args.group,
        args.status,
    );

    if args.json {
        let output = DashboardOutput {
            start: &response.start,
            end: &response.end,
            warnings: &response.outcome.warnings,
            refreshed_at: response.refreshed_at,
            dashboard: &dashboard,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        if args.watch {
            print!("\x1b[2J\x1b[H");
        }
        print!("{}", render(response, &dashboard, args.group, args.status));
    }
    Ok(())
}

fn bar(value: u32, max: u32, fill: char) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (value as usize * BAR_WIDTH).div_ceil(max as usize);
    std::iter::repeat(fill).take(len).collect()
}

/// Plain-text rendering of the dashboard.
pub fn render(
    response: &ChecklistResponse,
    dashboard: &Dashboard,
    group: GroupFilter,
    status: StatusFilter,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Checklists {} .. {}   refreshed {}",
        response.start,
        response.end,
        response.refreshed_at.format("%H:%M:%S UTC")
    );

    let _ = writeln!(out, "\nGroups");
    for g in &dashboard.groups {
        let _ = writeln!(
            out,
            "  {:<20} {:>3}%  lists: {:<3} tasks: {}",
            g.label, g.percent, g.lists, g.tasks
        );
    }

    let s = &dashboard.summary;
    let _ = writeln!(
        out,
        "\nOn time: {}   Late: {}   Missed: {}   (of {} tasks)",
        s.on_time, s.late, s.missed, s.total
    );

    let _ = writeln!(out, "\nStatus per group  (# on time, ~ late, x missed, . in progress)");
    let max_total = dashboard.groups.iter().map(|g| g.tasks).max().unwrap_or(0);
    for g in &dashboard.groups {
        let c = &g.counters;
        let _ = writeln!(
            out,
            "  {:<20} {}{}{}{}",
            g.label,
            bar(c.on_time, max_total, '#'),
            bar(c.late, max_total, '~'),
            bar(c.missed, max_total, 'x'),
            bar(c.in_progress, max_total, '.'),
        );
    }

    let _ = writeln!(out, "\nActivity (completed tasks per hour, UTC)");
    let max_done = dashboard.activity.iter().map(|b| b.done).max().unwrap_or(0);
    for b in dashboard.activity.iter().filter(|b| b.done > 0) {
        let _ = writeln!(out, "  {} {:>3} {}", b.hour, b.done, bar(b.done, max_done, '#'));
    }
    if max_done == 0 {
        let _ = writeln!(out, "  (no completed tasks)");
    }

    let _ = writeln!(out, "\nChecklists  [group: {group}, status: {}]", status_name(status));
    let _ = writeln!(
        out,
        "  {:<36} {:<20} {:<10} {:>4} {:>7} {:>5} {:>6} {:>11}",
        "Checklist", "Group", "Date", "%", "On time", "Late", "Missed", "In progress"
    );
    if dashboard.rows.is_empty() {
        let _ = writeln!(out, "  No results for the current filters.");
    }
    for row in &dashboard.rows {
        let c = &row.counters;
        let _ = writeln!(
            out,
            "  {:<36} {:<20} {:<10} {:>4} {:>7} {:>5} {:>6} {:>11}",
            truncate(&row.name, 36),
            row.group.label(),
            row.date,
            row.percent,
            c.on_time,
            c.late,
            c.missed,
            c.in_progress
        );
    }

    if !response.outcome.warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings");
        for w in &response.outcome.warnings {
            let _ = writeln!(out, "  {w}");
        }
    }
    out
}

fn status_name(status: StatusFilter) -> &'static str {
    match status {
        StatusFilter::All => "all",
        StatusFilter::OnTime => "on_time",
        StatusFilter::Late => "late",
        StatusFilter::Missed => "missed",
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max - 1).collect();
        cut.push('…');
        cut
    }
}
