// Presentation model handed to the chart layer: labels, per-chart datasets and axes,
// summary line, and the loading / error indicator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::axis::{DEFAULT_DISK_AXIS, DEFAULT_MEMORY_AXIS, SERVICE_AXIS, disk_axis, memory_axis};
use crate::calendar::DateRange;
use crate::config::AppConfig;
use crate::error::DashboardError;
use crate::models::{AxisRange, ServiceName, Value};
use crate::series::{FetchStrategy, Series, assemble_within};
use crate::snapshot_repo::SnapshotSource;

/// Series longer than this get smaller chart points.
const DENSE_SERIES_THRESHOLD: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Memory,
    Disk,
    Services,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Memory, Metric::Disk, Metric::Services];
}

/// Which charts the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSelection {
    #[default]
    All,
    Memory,
    Disk,
    Services,
}

impl ChartSelection {
    pub fn shows(self, metric: Metric) -> bool {
        match self {
            ChartSelection::All => true,
            ChartSelection::Memory => metric == Metric::Memory,
            ChartSelection::Disk => metric == Metric::Disk,
            ChartSelection::Services => metric == Metric::Services,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub values: Vec<Value>,
}

/// Everything needed to draw one chart; styling is up to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub metric: Metric,
    pub title: String,
    pub datasets: Vec<Dataset>,
    pub axis: AxisRange,
    pub point_radius: u8,
    /// Draw as a step line (service on/off charts).
    pub stepped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub summary: String,
    /// ISO dates, one per record.
    pub labels: Vec<String>,
    pub charts: Vec<ChartSpec>,
}

impl DashboardView {
    pub fn build(series: &Series, selection: ChartSelection) -> Self {
        let records = series.records();
        let radius = point_radius(records.len());
        let memory: Vec<Value> = records.iter().map(|r| r.used_memory_mb).collect();
        let disk: Vec<Value> = records.iter().map(|r| r.disk_usage_percent).collect();

        let mut charts = Vec::with_capacity(Metric::ALL.len());
        if selection.shows(Metric::Memory) {
            charts.push(ChartSpec {
                metric: Metric::Memory,
                title: "Memory used (MB)".into(),
                axis: memory_axis(&memory).unwrap_or(DEFAULT_MEMORY_AXIS),
                datasets: vec![Dataset {
                    label: "Memory used (MB)".into(),
                    values: memory,
                }],
                point_radius: radius,
                stepped: false,
            });
        }
        if selection.shows(Metric::Disk) {
            charts.push(ChartSpec {
                metric: Metric::Disk,
                title: "Disk usage (%)".into(),
                axis: disk_axis(&disk).unwrap_or(DEFAULT_DISK_AXIS),
                datasets: vec![Dataset {
                    label: "Disk usage (%)".into(),
                    values: disk,
                }],
                point_radius: radius,
                stepped: false,
            });
        }
        if selection.shows(Metric::Services) {
            let datasets = ServiceName::ALL
                .into_iter()
                .map(|name| Dataset {
                    label: name.label().into(),
                    values: records
                        .iter()
                        .map(|r| Value::Present(f64::from(r.service(name).level())))
                        .collect(),
                })
                .collect();
            charts.push(ChartSpec {
                metric: Metric::Services,
                title: "Service status".into(),
                datasets,
                axis: SERVICE_AXIS,
                point_radius: radius,
                stepped: true,
            });
        }

        Self {
            summary: series.summary().to_string(),
            labels: records.iter().map(|r| r.date.to_string()).collect(),
            charts,
        }
    }

    pub fn chart(&self, metric: Metric) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.metric == metric)
    }
}

pub fn point_radius(record_count: usize) -> u8 {
    if record_count > DENSE_SERIES_THRESHOLD {
        3
    } else {
        5
    }
}

/// Page indicator: either still loading or failed with a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LoadState {
    Loading { message: String },
    Error { message: String },
}

impl LoadState {
    pub fn loading() -> Self {
        LoadState::Loading {
            message: "Loading health-check data...".into(),
        }
    }

    pub fn error(err: impl fmt::Display) -> Self {
        LoadState::Error {
            message: format!("Failed to load data: {err}"),
        }
    }
}

/// Assemble the configured range from `source` and build the view for `selection`.
pub async fn load<S: SnapshotSource>(
    source: &S,
    config: &AppConfig,
    selection: ChartSelection,
) -> Result<DashboardView, DashboardError> {
    let series = load_series(source, config).await?;
    Ok(DashboardView::build(&series, selection))
}

/// Assemble the configured range from `source`.
pub async fn load_series<S: SnapshotSource>(
    source: &S,
    config: &AppConfig,
) -> Result<Series, DashboardError> {
    let range = DateRange::new(config.range.start, config.range.end)?;
    let strategy = FetchStrategy::from_concurrency(config.assembly.concurrency);
    let deadline = config.assembly.deadline_secs.map(Duration::from_secs);
    assemble_within(source, &range, strategy, deadline).await
}
