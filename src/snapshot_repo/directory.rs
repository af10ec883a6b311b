// Snapshots read from a local directory

use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;
use tracing::instrument;

use super::{FetchOutcome, SnapshotSource};
use crate::calendar::snapshot_file_name;
use crate::error::FetchFailure;

pub struct DirectorySource {
    dir: PathBuf,
    timeout: Duration,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            dir: dir.into(),
            timeout,
        }
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(snapshot_file_name(date))
    }
}

impl SnapshotSource for DirectorySource {
    #[instrument(skip(self), fields(repo = "directory", operation = "fetch"))]
    async fn fetch(&self, date: NaiveDate) -> FetchOutcome {
        let path = self.path_for(date);
        match tokio::time::timeout(self.timeout, tokio::fs::read(&path)).await {
            Ok(Ok(bytes)) => FetchOutcome::from_body(&bytes),
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => FetchOutcome::NotFound,
            Ok(Err(e)) => FetchOutcome::TransportError(FetchFailure::Transport(format!(
                "{}: {}",
                path.display(),
                e
            ))),
            Err(_) => FetchOutcome::TransportError(FetchFailure::Transport(format!(
                "{}: read timed out after {:?}",
                path.display(),
                self.timeout
            ))),
        }
    }
}
