// Raw snapshot -> DailyRecord

use chrono::NaiveDate;

use crate::models::{DailyRecord, RawSnapshot, ServiceName, ServiceState, Value};

/// Map a raw payload onto the canonical record. Absent or non-numeric measurements become
/// [`Value::Missing`]; a service is active only when its field is exactly `"active"`.
pub fn normalize(date: NaiveDate, raw: &RawSnapshot) -> DailyRecord {
    let services = ServiceName::ALL
        .into_iter()
        .map(|name| (name, ServiceState::from_raw(raw.service(name.wire_field()))))
        .collect();

    DailyRecord {
        date,
        used_memory_mb: Value::from(raw.used_mb()),
        disk_usage_percent: Value::from(raw.disk_usage_percentage()),
        services,
    }
}
