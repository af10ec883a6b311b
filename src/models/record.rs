// Normalized per-day record and its field types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A measurement that may be absent from the day's snapshot. Serializes to a number or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Value {
    Present(f64),
    Missing,
}

impl Value {
    pub fn present(self) -> Option<f64> {
        match self {
            Value::Present(v) => Some(v),
            Value::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self {
        match v {
            Some(v) => Value::Present(v),
            None => Value::Missing,
        }
    }
}

impl From<Value> for Option<f64> {
    fn from(v: Value) -> Self {
        v.present()
    }
}

/// Services tracked by the daily health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceName {
    PrimaryApp,
    Database,
    ReverseProxy,
}

impl ServiceName {
    pub const ALL: [ServiceName; 3] = [
        ServiceName::PrimaryApp,
        ServiceName::Database,
        ServiceName::ReverseProxy,
    ];

    /// Key of this service under `services` in the snapshot payload.
    pub fn wire_field(self) -> &'static str {
        match self {
            ServiceName::PrimaryApp => "mitra",
            ServiceName::Database => "postgresql",
            ServiceName::ReverseProxy => "nginx",
        }
    }

    /// Dataset label shown by the chart layer.
    pub fn label(self) -> &'static str {
        match self {
            ServiceName::PrimaryApp => "Mitra",
            ServiceName::Database => "PostgreSQL",
            ServiceName::ReverseProxy => "Nginx",
        }
    }
}

/// Service state; serializes to lowercase JSON ("active" / "inactive").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Active,
    Inactive,
}

impl ServiceState {
    /// Only the exact string "active" counts; anything else (including absent) is inactive.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("active") => ServiceState::Active,
            _ => ServiceState::Inactive,
        }
    }

    /// Chart level: 1 for active, 0 for inactive.
    pub fn level(self) -> u8 {
        match self {
            ServiceState::Active => 1,
            ServiceState::Inactive => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub used_memory_mb: Value,
    pub disk_usage_percent: Value,
    pub services: BTreeMap<ServiceName, ServiceState>,
}

impl DailyRecord {
    pub fn service(&self, name: ServiceName) -> ServiceState {
        self.services
            .get(&name)
            .copied()
            .unwrap_or(ServiceState::Inactive)
    }
}
