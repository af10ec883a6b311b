// Raw snapshot payload as stored in health-check-YYYY-MM-DD.json

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

/// One day's payload. Any JSON object is accepted; fields are looked up on demand so an
/// absent or oddly-typed field never fails the parse. Non-object payloads are rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawSnapshot(Map<String, JsonValue>);

impl RawSnapshot {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// `memory.used_mb` when present and numeric.
    pub fn used_mb(&self) -> Option<f64> {
        self.number("memory", "used_mb")
    }

    /// `disk.usage_percentage` when present and numeric.
    pub fn disk_usage_percentage(&self) -> Option<f64> {
        self.number("disk", "usage_percentage")
    }

    /// `services.<field>` when present and a string.
    pub fn service(&self, field: &str) -> Option<&str> {
        self.field("services", field).and_then(JsonValue::as_str)
    }

    fn number(&self, section: &str, field: &str) -> Option<f64> {
        self.field(section, field).and_then(JsonValue::as_f64)
    }

    fn field(&self, section: &str, field: &str) -> Option<&JsonValue> {
        self.0.get(section)?.as_object()?.get(field)
    }
}

impl From<Map<String, JsonValue>> for RawSnapshot {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}
