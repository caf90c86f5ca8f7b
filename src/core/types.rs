use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const NANOS_PER_MILLI: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One plotted point: `x` in milliseconds since the Unix epoch, `y` the reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A raw reading as delivered by the event stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp_nanos: i64,
    pub value: f64,
}

impl Sample {
    #[must_use]
    pub fn new(timestamp_nanos: i64, value: f64) -> Self {
        Self {
            timestamp_nanos,
            value,
        }
    }

    /// Sample instant in milliseconds, keeping the sub-millisecond fraction.
    #[must_use]
    pub fn x_millis(self) -> f64 {
        self.timestamp_nanos as f64 / NANOS_PER_MILLI
    }

    #[must_use]
    pub fn to_point(self) -> DataPoint {
        DataPoint::new(self.x_millis(), self.value)
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.value.is_finite() {
            return Err(ChartError::InvalidSample(
                "sample value must be finite".to_owned(),
            ));
        }
        Ok(self)
    }
}
