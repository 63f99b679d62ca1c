pub mod client;
pub mod extract;
pub mod normalize;

pub use client::SevenShiftsClient;
pub use extract::extract_task_lists;
pub use normalize::{coerce_bool, normalize_task_list, normalize_task_lists};

use std::future::Future;

use crate::error::UpstreamError;
use crate::fetch::DayRequest;

/// Successful answer for one day.
#[derive(Debug, Clone)]
pub struct DayResponse {
    pub status: u16,
    /// Parsed JSON, or the raw text as a JSON string when it did not parse.
    pub body: serde_json::Value,
}

/// Anything that can answer the per-day task-list query.
///
/// The fetch loop only talks to this trait, so tests can stand in a canned
/// source for the HTTP client.
pub trait TaskListSource {
    /// Path and query string identifying the request, for debug output.
    fn request_path(&self, request: &DayRequest) -> String;

    /// Run the query for one day.
    fn fetch_day(
        &self,
        request: &DayRequest,
    ) -> impl Future<Output = Result<DayResponse, UpstreamError>> + Send;
}
