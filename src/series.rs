// Series assembly: enumerate days, fetch each snapshot, normalize, sort.
// Per-day failures are logged and skipped; only an empty result is an error.

use chrono::NaiveDate;
use futures_util::StreamExt;
use futures_util::stream;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use tracing::instrument;

use crate::calendar::{DateRange, date_from_file_name, snapshot_file_name};
use crate::error::DashboardError;
use crate::models::DailyRecord;
use crate::normalizer::normalize;
use crate::snapshot_repo::{FetchOutcome, SnapshotSource};

/// How fetches for a range are scheduled. Both produce the same series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// One day at a time, in date order.
    Sequential,
    /// Up to `limit` fetches in flight; outcomes land in per-day slots.
    Concurrent { limit: usize },
}

impl FetchStrategy {
    pub fn from_concurrency(concurrency: usize) -> Self {
        if concurrency <= 1 {
            FetchStrategy::Sequential
        } else {
            FetchStrategy::Concurrent { limit: concurrency }
        }
    }
}

/// Non-empty list of daily records, strictly ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    records: Vec<DailyRecord>,
}

impl Series {
    /// Sorts by date and keeps the first record seen for a date. `None` when empty.
    pub fn from_records(mut records: Vec<DailyRecord>) -> Option<Self> {
        records.sort_by_key(|r| r.date);
        records.dedup_by_key(|r| r.date);
        if records.is_empty() {
            return None;
        }
        Some(Self { records })
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.records[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.records[self.records.len() - 1].date
    }

    pub fn summary(&self) -> SeriesSummary {
        SeriesSummary {
            count: self.len(),
            first: self.first_date(),
            last: self.last_date(),
        }
    }
}

/// Record count and date span of an assembled series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesSummary {
    pub count: usize,
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records loaded ({} to {})",
            self.count, self.first, self.last
        )
    }
}

/// Builds the series for `range`. Days with no snapshot, a failed read or an unparsable
/// payload are skipped; fails with [`DashboardError::NoDataInRange`] when nothing is left.
#[instrument(skip(source, range), fields(start = %range.start(), end = %range.end()))]
pub async fn assemble<S: SnapshotSource>(
    source: &S,
    range: &DateRange,
    strategy: FetchStrategy,
) -> Result<Series, DashboardError> {
    let mut attempted = HashSet::with_capacity(range.len());
    let candidates: Vec<(NaiveDate, String)> = range
        .iter()
        .map(|date| (date, snapshot_file_name(date)))
        .filter(|(_, file)| attempted.insert(file.clone()))
        .collect();

    let outcomes = fetch_all(source, &candidates, strategy).await;

    let mut records = Vec::with_capacity(candidates.len());
    for ((_, file), outcome) in candidates.iter().zip(outcomes) {
        match outcome {
            // Records are keyed on the date named by the file that was read.
            Some(FetchOutcome::Found(raw)) => match date_from_file_name(file) {
                Some(date) => {
                    records.push(normalize(date, &raw));
                    tracing::debug!(file = %file, "snapshot loaded");
                }
                None => {
                    tracing::warn!(file = %file, "snapshot name carries no date");
                }
            },
            Some(FetchOutcome::NotFound) => {
                tracing::debug!(file = %file, "snapshot not found");
            }
            Some(FetchOutcome::TransportError(e)) => {
                tracing::warn!(file = %file, error = %e, "snapshot skipped");
            }
            None => {
                tracing::warn!(file = %file, "snapshot fetch produced no outcome");
            }
        }
    }

    let series = Series::from_records(records).ok_or(DashboardError::NoDataInRange {
        start: range.start(),
        end: range.end(),
    })?;
    tracing::info!(
        operation = "assemble",
        records = series.len(),
        days = candidates.len(),
        "series assembled"
    );
    Ok(series)
}

/// [`assemble`] bounded by an overall deadline, when one is given.
pub async fn assemble_within<S: SnapshotSource>(
    source: &S,
    range: &DateRange,
    strategy: FetchStrategy,
    deadline: Option<Duration>,
) -> Result<Series, DashboardError> {
    match deadline {
        Some(limit) => tokio::time::timeout(limit, assemble(source, range, strategy))
            .await
            .map_err(|_| DashboardError::DeadlineExceeded(limit))?,
        None => assemble(source, range, strategy).await,
    }
}

/// One slot per candidate, filled in candidate order regardless of completion order.
async fn fetch_all<S: SnapshotSource>(
    source: &S,
    candidates: &[(NaiveDate, String)],
    strategy: FetchStrategy,
) -> Vec<Option<FetchOutcome>> {
    let mut slots: Vec<Option<FetchOutcome>> = vec![None; candidates.len()];
    match strategy {
        FetchStrategy::Sequential => {
            for (slot, (date, _)) in slots.iter_mut().zip(candidates) {
                *slot = Some(source.fetch(*date).await);
            }
        }
        FetchStrategy::Concurrent { limit } => {
            let fetches: Vec<_> = candidates
                .iter()
                .enumerate()
                .map(|(i, (date, _))| {
                    let date = *date;
                    async move { (i, source.fetch(date).await) }
                })
                .collect();
            let mut in_flight = stream::iter(fetches).buffer_unordered(limit.max(1));
            while let Some((i, outcome)) = in_flight.next().await {
                slots[i] = Some(outcome);
            }
        }
    }
    slots
}
