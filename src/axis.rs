// Y-axis ranges derived from a series

use crate::models::{AxisRange, Value};

const MEMORY_ROUNDING_MB: f64 = 50.0;
const MEMORY_HEADROOM_MB: f64 = 50.0;
const DISK_ROUNDING_PERCENT: f64 = 5.0;
const DISK_MIN_CEILING_PERCENT: f64 = 100.0;
const DISK_STEP_PERCENT: f64 = 5.0;

/// Used when a series has no memory readings at all.
pub const DEFAULT_MEMORY_AXIS: AxisRange = AxisRange::new(0.0, MEMORY_HEADROOM_MB, 10.0);
/// Used when a series has no disk readings at all.
pub const DEFAULT_DISK_AXIS: AxisRange =
    AxisRange::new(0.0, DISK_MIN_CEILING_PERCENT, DISK_STEP_PERCENT);
/// Service charts plot 0 (inactive) / 1 (active).
pub const SERVICE_AXIS: AxisRange = AxisRange::new(0.0, 1.0, 1.0);

/// Min and max over present values; `None` if every value is missing.
fn present_bounds<'a>(values: impl IntoIterator<Item = &'a Value>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter_map(|v| v.present())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Memory axis: bounds snapped to 50 MB with 50 MB headroom above the peak.
pub fn memory_axis<'a>(values: impl IntoIterator<Item = &'a Value>) -> Option<AxisRange> {
    let (lo, hi) = present_bounds(values)?;
    let min = ((lo / MEMORY_ROUNDING_MB).floor() * MEMORY_ROUNDING_MB).max(0.0);
    let max = (hi / MEMORY_ROUNDING_MB).ceil() * MEMORY_ROUNDING_MB + MEMORY_HEADROOM_MB;
    Some(AxisRange::new(min, max, memory_step(max - min)))
}

/// Tick step for a memory axis spanning `range` MB.
pub fn memory_step(range: f64) -> f64 {
    if range <= 100.0 {
        10.0
    } else if range <= 300.0 {
        25.0
    } else {
        50.0
    }
}

/// Disk axis: always at least 0–100 %, growing in 5 % steps past that.
pub fn disk_axis<'a>(values: impl IntoIterator<Item = &'a Value>) -> Option<AxisRange> {
    let (_, hi) = present_bounds(values)?;
    let max = ((hi / DISK_ROUNDING_PERCENT).ceil() * DISK_ROUNDING_PERCENT)
        .max(DISK_MIN_CEILING_PERCENT);
    Some(AxisRange::new(0.0, max, DISK_STEP_PERCENT))
}
