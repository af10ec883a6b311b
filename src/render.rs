// Chart rendering collaborator and the session that owns its live charts.

use std::collections::BTreeMap;

use crate::calendar::format_date_long;
use crate::dashboard::{ChartSpec, DashboardView, Metric};

/// Draws charts. Implementations own all styling.
pub trait ChartRenderer {
    type Chart;

    fn draw(&mut self, labels: &[String], spec: &ChartSpec) -> Self::Chart;

    /// Release a chart that is being replaced or cleared.
    fn dispose(&mut self, chart: Self::Chart);
}

/// The charts currently on screen, one per metric. Redrawing a metric disposes its
/// previous chart first.
pub struct RenderSession<R: ChartRenderer> {
    renderer: R,
    charts: BTreeMap<Metric, R::Chart>,
}

impl<R: ChartRenderer> RenderSession<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            charts: BTreeMap::new(),
        }
    }

    /// Dispose the chart for `spec.metric` (if any) and draw its replacement.
    pub fn replace(&mut self, labels: &[String], spec: &ChartSpec) -> &R::Chart {
        if let Some(old) = self.charts.remove(&spec.metric) {
            self.renderer.dispose(old);
        }
        let chart = self.renderer.draw(labels, spec);
        self.charts.entry(spec.metric).or_insert(chart)
    }

    /// Draw every chart in `view`. Metrics the view leaves out keep their current chart.
    pub fn render_view(&mut self, view: &DashboardView) {
        for spec in &view.charts {
            self.replace(&view.labels, spec);
        }
    }

    pub fn current(&self, metric: Metric) -> Option<&R::Chart> {
        self.charts.get(&metric)
    }

    pub fn clear(&mut self) {
        for (_, chart) in std::mem::take(&mut self.charts) {
            self.renderer.dispose(chart);
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// Renders charts as log lines; used by the `report` command.
#[derive(Debug, Default)]
pub struct LogRenderer;

#[derive(Debug, Clone, PartialEq)]
pub struct LoggedChart {
    pub metric: Metric,
    pub points: usize,
}

impl ChartRenderer for LogRenderer {
    type Chart = LoggedChart;

    fn draw(&mut self, labels: &[String], spec: &ChartSpec) -> LoggedChart {
        let span = match (labels.first(), labels.last()) {
            (Some(first), Some(last)) => format!(
                "{} - {}",
                long_label(first),
                long_label(last)
            ),
            _ => String::new(),
        };
        for dataset in &spec.datasets {
            let present = dataset.values.iter().filter(|v| !v.is_missing()).count();
            tracing::info!(
                chart = %spec.title,
                dataset = %dataset.label,
                points = dataset.values.len(),
                missing = dataset.values.len() - present,
                "dataset"
            );
        }
        tracing::info!(
            chart = %spec.title,
            span = %span,
            y_min = spec.axis.min,
            y_max = spec.axis.max,
            step = spec.axis.step,
            "chart drawn"
        );
        LoggedChart {
            metric: spec.metric,
            points: labels.len(),
        }
    }

    fn dispose(&mut self, chart: LoggedChart) {
        tracing::debug!(metric = ?chart.metric, "chart disposed");
    }
}

fn long_label(iso: &str) -> String {
    iso.parse()
        .map(format_date_long)
        .unwrap_or_else(|_| iso.to_string())
}
