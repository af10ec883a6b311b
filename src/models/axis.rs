// Chart axis scale

use serde::{Deserialize, Serialize};

/// Y-axis bounds and tick step handed to the chart layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}
