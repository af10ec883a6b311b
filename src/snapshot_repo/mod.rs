// Daily snapshot sources: HTTP origin or local directory

mod directory;
mod http;

pub use directory::DirectorySource;
pub use http::HttpSource;

use chrono::NaiveDate;
use std::future::Future;
use std::time::Duration;

use crate::config::{SourceConfig, SourceKind};
use crate::error::FetchFailure;
use crate::models::RawSnapshot;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Result of one fetch attempt for one day.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Found(RawSnapshot),
    /// No snapshot exists for the day. Expected for gaps in the range.
    NotFound,
    TransportError(FetchFailure),
}

impl FetchOutcome {
    /// Classify the body of a successful read. A leading UTF-8 BOM is ignored.
    pub(crate) fn from_body(bytes: &[u8]) -> Self {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        match RawSnapshot::from_slice(bytes) {
            Ok(raw) => FetchOutcome::Found(raw),
            Err(e) => FetchOutcome::TransportError(FetchFailure::Malformed(e.to_string())),
        }
    }
}

/// Something that can look up the snapshot for a single day. One attempt per call.
pub trait SnapshotSource: Send + Sync {
    fn fetch(&self, date: NaiveDate) -> impl Future<Output = FetchOutcome> + Send;
}

/// Source selected by config.
pub enum SnapshotRepo {
    Http(HttpSource),
    Directory(DirectorySource),
}

impl SnapshotRepo {
    pub fn from_config(config: &SourceConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        Ok(match config.kind {
            SourceKind::Http => {
                SnapshotRepo::Http(HttpSource::new(&config.base_url, &config.base_path, timeout)?)
            }
            SourceKind::Directory => SnapshotRepo::Directory(DirectorySource::new(
                std::path::Path::new(&config.base_url).join(&config.base_path),
                timeout,
            )),
        })
    }
}

impl SnapshotSource for SnapshotRepo {
    async fn fetch(&self, date: NaiveDate) -> FetchOutcome {
        match self {
            SnapshotRepo::Http(s) => s.fetch(date).await,
            SnapshotRepo::Directory(s) => s.fetch(date).await,
        }
    }
}
