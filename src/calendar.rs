// Inclusive calendar-date ranges and snapshot file naming

use chrono::{Datelike, NaiveDate};

use crate::error::DashboardError;

const FILE_PREFIX: &str = "health-check-";
const FILE_SUFFIX: &str = ".json";

/// Inclusive `[start, end]` range of days. Construction guarantees `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, both ends included. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Fresh iterator over every day; can be called any number of times.
    pub fn iter(&self) -> Days {
        Days {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl IntoIterator for &DateRange {
    type Item = NaiveDate;
    type IntoIter = Days;

    fn into_iter(self) -> Days {
        self.iter()
    }
}

/// Lazy day-by-day cursor over a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.end);
        Some(current)
    }
}

/// `health-check-YYYY-MM-DD.json` for the given day.
pub fn snapshot_file_name(date: NaiveDate) -> String {
    format!(
        "{FILE_PREFIX}{:04}-{:02}-{:02}{FILE_SUFFIX}",
        date.year(),
        date.month(),
        date.day()
    )
}

/// Inverse of [`snapshot_file_name`]; `None` for names that don't follow the pattern.
pub fn date_from_file_name(name: &str) -> Option<NaiveDate> {
    let stem = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    if stem.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
}

/// Long-form label used in chart tooltips, e.g. `2025年01月31日`.
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%Y年%m月%d日").to_string()
}
