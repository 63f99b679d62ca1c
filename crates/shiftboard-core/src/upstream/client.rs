//! 7shifts task-list API client.

use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::form_urlencoded;

use super::{DayResponse, TaskListSource};
use crate::config::{Credentials, Settings};
use crate::error::UpstreamError;
use crate::fetch::DayRequest;

pub struct SevenShiftsClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
    timeout: Duration,
}

impl SevenShiftsClient {
    /// Build a client for `settings.base_url` with the configured timeout.
    pub fn new(credentials: Credentials, settings: &Settings) -> Result<Self, UpstreamError> {
        let timeout = settings.request_timeout();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            credentials,
            timeout,
        })
    }

    fn query_string(&self, request: &DayRequest) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(location_id) = &request.location_id {
            query.append_pair("location_id", location_id);
        }
        query.append_pair("active_on_date", &request.day.to_string());
        query.append_pair("include_tasks", "true");
        query.append_pair("company_id", &self.credentials.company_id);
        if let Some(user_id) = &request.user_id {
            query.append_pair("user_id", user_id);
        }
        query.finish()
    }

    fn map_send_error(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            UpstreamError::Network(err.to_string())
        }
    }
}

impl TaskListSource for SevenShiftsClient {
    fn request_path(&self, request: &DayRequest) -> String {
        format!(
            "/company/{}/task_lists?{}",
            self.credentials.company_id,
            self.query_string(request)
        )
    }

    async fn fetch_day(&self, request: &DayRequest) -> Result<DayResponse, UpstreamError> {
        let url = url::Url::parse(&format!("{}{}", self.base_url, self.request_path(request)))?;
        debug!(day = %request.day, path = url.path(), "querying task lists");

        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.credentials.access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: text.trim().to_string(),
            });
        }

        let body = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => serde_json::Value::String(text),
        };
        Ok(DayResponse {
            status: status.as_u16(),
            body,
        })
    }
}
