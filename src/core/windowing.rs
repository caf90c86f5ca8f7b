use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Rolling X window that trails the wall clock by a fixed render delay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealtimeWindow {
    duration_ms: f64,
    delay_ms: f64,
}

impl RealtimeWindow {
    pub fn new(duration_ms: f64, delay_ms: f64) -> ChartResult<Self> {
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(ChartError::InvalidData(
                "window duration must be finite and > 0".to_owned(),
            ));
        }
        if !delay_ms.is_finite() || delay_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "render delay must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            duration_ms,
            delay_ms,
        })
    }

    #[must_use]
    pub fn duration_ms(self) -> f64 {
        self.duration_ms
    }

    #[must_use]
    pub fn delay_ms(self) -> f64 {
        self.delay_ms
    }

    /// Visible `(start, end)` in milliseconds for the wall-clock instant `now_ms`.
    #[must_use]
    pub fn visible_range(self, now_ms: f64) -> (f64, f64) {
        let end = now_ms - self.delay_ms;
        (end - self.duration_ms, end)
    }
}

/// Returns the contiguous run of points needed to draw the window.
///
/// The run spans the first through last in-window point by arrival index, widened
/// by one neighbor on each side so the line reaches the plot edges. Returns an
/// empty slice when no point is inside the window.
#[must_use]
pub fn drawable_slice(points: &[DataPoint], start: f64, end: f64) -> &[DataPoint] {
    let (min_t, max_t) = ordered(start, end);
    let inside = |point: &DataPoint| point.x >= min_t && point.x <= max_t;

    let Some(first) = points.iter().position(inside) else {
        return &[];
    };
    let last = points.iter().rposition(inside).unwrap_or(first);

    let from = first.saturating_sub(1);
    let to = (last + 2).min(points.len());
    &points[from..to]
}

/// Soft Y bounds: widened by the data, never narrowed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestedRange {
    pub min: f64,
    pub max: f64,
}

impl SuggestedRange {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ChartError::InvalidData(
                "suggested range must be finite with min < max".to_owned(),
            ));
        }
        Ok(Self { min, max })
    }

    /// Final Y domain once the given values are taken into account.
    #[must_use]
    pub fn resolve(self, values: impl IntoIterator<Item = f64>) -> (f64, f64) {
        values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold((self.min, self.max), |(lo, hi), value| {
                (lo.min(value), hi.max(value))
            })
    }
}

fn ordered(start: f64, end: f64) -> (f64, f64) {
    if start <= end { (start, end) } else { (end, start) }
}
