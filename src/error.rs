// Errors surfaced by series assembly

use chrono::NaiveDate;
use std::time::Duration;
use thiserror::Error;

/// Failures that abort building a dashboard. Per-date fetch problems never end up here.
#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("no health-check data found between {start} and {end}")]
    NoDataInRange { start: NaiveDate, end: NaiveDate },

    #[error("series assembly did not finish within {0:?}")]
    DeadlineExceeded(Duration),
}

/// Why a single day's snapshot could not be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed snapshot: {0}")]
    Malformed(String),
}
