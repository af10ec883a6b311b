// Series assembly: gap tolerance, ordering, empty range, deadline

mod common;

use common::{ScriptedSource, d, full_snapshot};
use healthboard::calendar::DateRange;
use healthboard::error::{DashboardError, FetchFailure};
use healthboard::models::Value;
use healthboard::series::{FetchStrategy, Series, assemble, assemble_within};
use healthboard::snapshot_repo::FetchOutcome;
use std::time::Duration;

fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
    DateRange::new(d(start.0, start.1, start.2), d(end.0, end.1, end.2)).unwrap()
}

fn dates(series: &Series) -> Vec<chrono::NaiveDate> {
    series.records().iter().map(|r| r.date).collect()
}

#[tokio::test]
async fn gaps_are_skipped() {
    let source = ScriptedSource::new()
        .found(d(2025, 2, 1), full_snapshot(100.0, 10.0))
        .found(d(2025, 2, 3), full_snapshot(300.0, 30.0))
        .found(d(2025, 2, 5), full_snapshot(500.0, 50.0));
    let series = assemble(
        &source,
        &range((2025, 2, 1), (2025, 2, 5)),
        FetchStrategy::Sequential,
    )
    .await
    .unwrap();
    assert_eq!(
        dates(&series),
        vec![d(2025, 2, 1), d(2025, 2, 3), d(2025, 2, 5)]
    );
    assert_eq!(source.calls(), 5);
    assert_eq!(series.records()[1].used_memory_mb, Value::Present(300.0));
}

#[tokio::test]
async fn transport_and_malformed_failures_are_skipped() {
    let source = ScriptedSource::new()
        .found(d(2025, 1, 30), full_snapshot(100.0, 10.0))
        .with(
            d(2025, 1, 31),
            FetchOutcome::TransportError(FetchFailure::Transport("connection reset".into())),
        )
        .with(
            d(2025, 2, 1),
            FetchOutcome::TransportError(FetchFailure::Malformed("expected value".into())),
        )
        .found(d(2025, 2, 2), full_snapshot(120.0, 11.0));
    let series = assemble(
        &source,
        &range((2025, 1, 30), (2025, 2, 2)),
        FetchStrategy::Sequential,
    )
    .await
    .unwrap();
    assert_eq!(dates(&series), vec![d(2025, 1, 30), d(2025, 2, 2)]);
}

#[tokio::test]
async fn all_not_found_is_no_data() {
    let source = ScriptedSource::new();
    let err = assemble(
        &source,
        &range((2025, 1, 31), (2025, 2, 2)),
        FetchStrategy::Sequential,
    )
    .await
    .unwrap_err();
    assert_eq!(
        err,
        DashboardError::NoDataInRange {
            start: d(2025, 1, 31),
            end: d(2025, 2, 2),
        }
    );
    assert_eq!(source.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn concurrent_fetches_complete_out_of_order_but_series_is_sorted() {
    let mut source = ScriptedSource::new();
    for day in 1..=6u32 {
        source = source
            .found(d(2025, 3, day), full_snapshot(f64::from(day) * 10.0, 5.0))
            .delayed(d(2025, 3, day), Duration::from_millis(u64::from(10 - day) * 100));
    }
    let r = range((2025, 3, 1), (2025, 3, 6));

    let concurrent = assemble(&source, &r, FetchStrategy::Concurrent { limit: 6 })
        .await
        .unwrap();
    let sequential = assemble(&source, &r, FetchStrategy::Sequential)
        .await
        .unwrap();

    assert_eq!(concurrent, sequential);
    let got = dates(&concurrent);
    assert!(got.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(got.len(), 6);
    assert_eq!(concurrent.len(), got.len());
    assert_eq!(
        concurrent.records()[0].used_memory_mb,
        Value::Present(10.0)
    );
}

#[tokio::test]
async fn concurrent_failures_do_not_cancel_siblings() {
    let source = ScriptedSource::new()
        .with(
            d(2025, 2, 1),
            FetchOutcome::TransportError(FetchFailure::Transport("timeout".into())),
        )
        .found(d(2025, 2, 2), full_snapshot(100.0, 10.0))
        .found(d(2025, 2, 4), full_snapshot(110.0, 12.0));
    let series = assemble(
        &source,
        &range((2025, 2, 1), (2025, 2, 4)),
        FetchStrategy::Concurrent { limit: 2 },
    )
    .await
    .unwrap();
    assert_eq!(dates(&series), vec![d(2025, 2, 2), d(2025, 2, 4)]);
    assert_eq!(source.calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn deadline_bounds_whole_assembly() {
    let source = ScriptedSource::new()
        .found(d(2025, 2, 1), full_snapshot(100.0, 10.0))
        .delayed(d(2025, 2, 1), Duration::from_secs(60));
    let err = assemble_within(
        &source,
        &range((2025, 2, 1), (2025, 2, 1)),
        FetchStrategy::Sequential,
        Some(Duration::from_secs(5)),
    )
    .await
    .unwrap_err();
    assert_eq!(err, DashboardError::DeadlineExceeded(Duration::from_secs(5)));
}

#[tokio::test]
async fn summary_reports_count_and_span() {
    let source = ScriptedSource::new()
        .found(d(2025, 1, 31), full_snapshot(100.0, 10.0))
        .found(d(2025, 3, 7), full_snapshot(100.0, 10.0));
    let series = assemble_within(
        &source,
        &range((2025, 1, 31), (2025, 3, 7)),
        FetchStrategy::from_concurrency(4),
        None,
    )
    .await
    .unwrap();
    let summary = series.summary();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.first, d(2025, 1, 31));
    assert_eq!(summary.last, d(2025, 3, 7));
    assert_eq!(
        summary.to_string(),
        "2 records loaded (2025-01-31 to 2025-03-07)"
    );
    assert_eq!(source.calls(), 36);
}

#[test]
fn from_records_sorts_and_drops_duplicate_dates() {
    use healthboard::normalizer::normalize;
    let a = normalize(d(2025, 2, 2), &full_snapshot(1.0, 1.0));
    let b = normalize(d(2025, 2, 1), &full_snapshot(2.0, 2.0));
    let dup = normalize(d(2025, 2, 2), &full_snapshot(3.0, 3.0));
    let series = Series::from_records(vec![a, b, dup]).unwrap();
    assert_eq!(dates(&series), vec![d(2025, 2, 1), d(2025, 2, 2)]);
    assert_eq!(series.records()[1].used_memory_mb, Value::Present(1.0));
    assert!(Series::from_records(vec![]).is_none());
}

#[test]
fn strategy_from_concurrency() {
    assert_eq!(FetchStrategy::from_concurrency(0), FetchStrategy::Sequential);
    assert_eq!(FetchStrategy::from_concurrency(1), FetchStrategy::Sequential);
    assert_eq!(
        FetchStrategy::from_concurrency(3),
        FetchStrategy::Concurrent { limit: 3 }
    );
}
