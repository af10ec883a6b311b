// Snapshots served over HTTP, one GET per day

use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

use super::{FetchOutcome, SnapshotSource};
use crate::calendar::snapshot_file_name;
use crate::error::FetchFailure;

pub struct HttpSource {
    client: Client,
    base: String,
}

impl HttpSource {
    /// `base_url` is the origin, `base_path` the directory below it (e.g. `src/`).
    pub fn new(base_url: &str, base_path: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, base_path))
    }

    pub fn with_client(client: Client, base_url: &str, base_path: &str) -> Self {
        let origin = base_url.trim_end_matches('/');
        let path = base_path.trim_matches('/');
        let base = if path.is_empty() {
            format!("{origin}/")
        } else {
            format!("{origin}/{path}/")
        };
        Self { client, base }
    }

    pub fn url_for(&self, date: NaiveDate) -> String {
        format!("{}{}", self.base, snapshot_file_name(date))
    }
}

impl SnapshotSource for HttpSource {
    #[instrument(skip(self), fields(repo = "http", operation = "fetch"))]
    async fn fetch(&self, date: NaiveDate) -> FetchOutcome {
        let url = self.url_for(date);
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => return FetchOutcome::TransportError(FetchFailure::Transport(e.to_string())),
        };
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), url = %url, "snapshot not available");
            return FetchOutcome::NotFound;
        }
        match response.bytes().await {
            Ok(body) => FetchOutcome::from_body(&body),
            Err(e) => FetchOutcome::TransportError(FetchFailure::Transport(e.to_string())),
        }
    }
}
