// Shared test helpers

#![allow(dead_code)]

use chrono::NaiveDate;
use healthboard::models::RawSnapshot;
use healthboard::snapshot_repo::{FetchOutcome, SnapshotSource};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn raw(value: serde_json::Value) -> RawSnapshot {
    serde_json::from_value(value).unwrap()
}

pub fn full_snapshot(used_mb: f64, disk_percent: f64) -> RawSnapshot {
    raw(serde_json::json!({
        "memory": { "used_mb": used_mb },
        "disk": { "usage_percentage": disk_percent },
        "services": { "mitra": "active", "postgresql": "active", "nginx": "active" }
    }))
}

/// In-memory source: scripted outcome per date (NotFound otherwise), optional per-date delay.
#[derive(Default)]
pub struct ScriptedSource {
    outcomes: BTreeMap<NaiveDate, FetchOutcome>,
    delays: BTreeMap<NaiveDate, Duration>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, date: NaiveDate, outcome: FetchOutcome) -> Self {
        self.outcomes.insert(date, outcome);
        self
    }

    pub fn found(self, date: NaiveDate, snapshot: RawSnapshot) -> Self {
        self.with(date, FetchOutcome::Found(snapshot))
    }

    pub fn delayed(mut self, date: NaiveDate, delay: Duration) -> Self {
        self.delays.insert(date, delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SnapshotSource for ScriptedSource {
    async fn fetch(&self, date: NaiveDate) -> FetchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&date) {
            tokio::time::sleep(*delay).await;
        }
        self.outcomes
            .get(&date)
            .cloned()
            .unwrap_or(FetchOutcome::NotFound)
    }
}
