use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::Sample;
use crate::error::{ChartError, ChartResult};

/// Channel on which the event stream delivers new samples.
pub const NEW_POINT_EVENT: &str = "new-point";

/// Reading carried by a `new-point` event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewPointValue {
    /// Nanoseconds since the Unix epoch.
    pub tstamp: i64,
    pub val: f64,
}

/// Wire payload: `{ "label": "...", "value": { "tstamp": 0, "val": 0.0 } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPointEvent {
    pub label: String,
    pub value: NewPointValue,
}

impl NewPointEvent {
    #[must_use]
    pub fn new(label: impl Into<String>, tstamp: i64, val: f64) -> Self {
        Self {
            label: label.into(),
            value: NewPointValue { tstamp, val },
        }
    }

    /// Decodes and validates a payload already parsed as JSON.
    pub fn from_value(payload: &Value) -> ChartResult<Self> {
        let event = Self::deserialize(payload)
            .map_err(|e| ChartError::InvalidSample(format!("malformed new-point payload: {e}")))?;
        event.validate()
    }

    /// Decodes and validates a raw JSON payload.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let event: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidSample(format!("malformed new-point payload: {e}")))?;
        event.validate()
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.label.is_empty() {
            return Err(ChartError::InvalidSample(
                "new-point label must not be empty".to_owned(),
            ));
        }
        self.sample().validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn sample(&self) -> Sample {
        Sample::new(self.value.tstamp, self.value.val)
    }
}
