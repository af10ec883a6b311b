// Domain models: raw snapshot payloads, normalized daily records, axis ranges

mod axis;
mod record;
mod snapshot;

pub use axis::AxisRange;
pub use record::{DailyRecord, ServiceName, ServiceState, Value};
pub use snapshot::RawSnapshot;
