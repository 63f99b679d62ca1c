//! Checklist query command.
//!
//! Prints the same response object the dashboard polls: normalized lists,
//! per-day warnings, and request metadata when `--debug` is set.

use chrono::Utc;
use clap::Args;
use shiftboard_core::error::Result;
use shiftboard_core::{
    query_checklists, ChecklistResponse, Credentials, Settings, TaskListQuery, ValidationError,
};

/// Query parameters shared by `checklists` and `dashboard`.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// First day, YYYY-MM-DD (default: today, UTC)
    #[arg(long, visible_alias = "date")]
    pub start_date: Option<String>,
    /// Last day, YYYY-MM-DD (default: start date)
    #[arg(long)]
    pub end_date: Option<String>,
    /// Comma-separated location ids; only the first is queried
    #[arg(long)]
    pub location_ids: Option<String>,
    /// Restrict to one user
    #[arg(long)]
    pub user_id: Option<String>,
    /// Include per-day request metadata
    #[arg(long)]
    pub debug: bool,
}

impl QueryArgs {
    /// Resolve against settings defaults and today's date.
    pub fn to_query(&self, settings: &Settings) -> Result<TaskListQuery, ValidationError> {
        let location_ids = self
            .location_ids
            .clone()
            .unwrap_or_else(|| settings.default_location_ids.join(","));
        TaskListQuery::from_args(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            Some(&location_ids),
            self.user_id.as_deref(),
            self.debug,
            Utc::now().date_naive(),
        )
    }
}

/// Load credentials and settings, then run one query.
///
/// Credentials are checked first so a misconfigured environment fails before
/// anything else happens.
pub fn execute(args: &QueryArgs) -> Result<(Settings, ChecklistResponse)> {
    let credentials = Credentials::from_env()?;
    let settings = Settings::load()?;
    let query = args.to_query(&settings)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let response = runtime.block_on(query_checklists(credentials, &settings, &query))?;
    Ok((settings, response))
}

pub fn run(args: QueryArgs) -> Result<(), Box<dyn std::error::Error>> {
    match execute(&args) {
        Ok((_, response)) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::json!({ "error": e.to_string() }));
            Err(e.into())
        }
    }
}
