// Snapshot normalization: missing fields, service-flag strictness

mod common;

use common::{d, raw};
use healthboard::models::{RawSnapshot, ServiceName, ServiceState, Value};
use healthboard::normalizer::normalize;
use serde_json::json;

#[test]
fn normalize_full_snapshot() {
    let snapshot = raw(json!({
        "memory": { "used_mb": 312.5, "total_mb": 2048 },
        "disk": { "usage_percentage": 14 },
        "services": { "mitra": "active", "postgresql": "active", "nginx": "inactive" },
        "hostname": "ignored"
    }));
    let record = normalize(d(2025, 2, 1), &snapshot);
    assert_eq!(record.date, d(2025, 2, 1));
    assert_eq!(record.used_memory_mb, Value::Present(312.5));
    assert_eq!(record.disk_usage_percent, Value::Present(14.0));
    assert_eq!(record.service(ServiceName::PrimaryApp), ServiceState::Active);
    assert_eq!(record.service(ServiceName::Database), ServiceState::Active);
    assert_eq!(record.service(ServiceName::ReverseProxy), ServiceState::Inactive);
}

#[test]
fn missing_disk_field_is_missing_not_dropped() {
    let snapshot = raw(json!({
        "memory": { "used_mb": 200 },
        "disk": {},
        "services": { "mitra": "active" }
    }));
    let record = normalize(d(2025, 2, 2), &snapshot);
    assert_eq!(record.used_memory_mb, Value::Present(200.0));
    assert_eq!(record.disk_usage_percent, Value::Missing);
}

#[test]
fn non_numeric_measurements_are_missing() {
    let snapshot = raw(json!({
        "memory": { "used_mb": "200" },
        "disk": "full"
    }));
    let record = normalize(d(2025, 2, 3), &snapshot);
    assert_eq!(record.used_memory_mb, Value::Missing);
    assert_eq!(record.disk_usage_percent, Value::Missing);
}

#[test]
fn only_exact_active_string_is_active() {
    let snapshot = raw(json!({
        "services": { "mitra": "inactive", "postgresql": "unknown", "nginx": "Active" }
    }));
    let record = normalize(d(2025, 2, 4), &snapshot);
    for name in ServiceName::ALL {
        assert_eq!(record.service(name), ServiceState::Inactive, "{name:?}");
    }

    let absent = normalize(d(2025, 2, 4), &RawSnapshot::default());
    for name in ServiceName::ALL {
        assert_eq!(absent.service(name), ServiceState::Inactive, "{name:?}");
    }
    assert_eq!(absent.services.len(), ServiceName::ALL.len());
}

#[test]
fn non_string_service_value_is_inactive() {
    let snapshot = raw(json!({ "services": { "mitra": true, "postgresql": 1, "nginx": null } }));
    let record = normalize(d(2025, 2, 5), &snapshot);
    assert!(
        record
            .services
            .values()
            .all(|s| *s == ServiceState::Inactive)
    );
}

#[test]
fn non_object_payload_fails_to_parse() {
    assert!(RawSnapshot::from_slice(b"[1, 2, 3]").is_err());
    assert!(RawSnapshot::from_slice(b"{ not json").is_err());
    assert!(RawSnapshot::from_slice(b"{}").is_ok());
}

#[test]
fn record_serializes_missing_as_null() {
    let record = normalize(
        d(2025, 2, 6),
        &raw(json!({ "memory": { "used_mb": 100 } })),
    );
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["date"], "2025-02-06");
    assert_eq!(json["usedMemoryMb"], 100.0);
    assert!(json["diskUsagePercent"].is_null());
    assert_eq!(json["services"]["primary-app"], "inactive");
}
