use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, LinearScale};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Cubic Bézier segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    pub start: PixelPoint,
    pub control1: PixelPoint,
    pub control2: PixelPoint,
    pub end: PixelPoint,
}

/// Off-screen coordinates are clamped to this magnitude so curve math stays finite.
const PIXEL_LIMIT: f64 = 1.0e9;

/// Maps data points into pixel space, preserving order.
pub fn project_points(
    points: &[DataPoint],
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> ChartResult<Vec<PixelPoint>> {
    points
        .iter()
        .map(|point| {
            Ok(PixelPoint::new(
                clamp_pixel(x_scale.domain_to_pixel(point.x)?),
                clamp_pixel(y_scale.domain_to_pixel(point.y)?),
            ))
        })
        .collect()
}

fn clamp_pixel(pixel: f64) -> f64 {
    pixel.clamp(-PIXEL_LIMIT, PIXEL_LIMIT)
}

/// Builds smoothed curve segments through `pixels`.
///
/// Control points follow a cardinal spline scaled by the relative length of the
/// adjacent legs; the first and last points act as their own neighbors.
/// A tension of `0.0` yields straight segments.
pub fn spline_segments(pixels: &[PixelPoint], tension: f64) -> ChartResult<Vec<CurveSegment>> {
    if !tension.is_finite() || !(0.0..=1.0).contains(&tension) {
        return Err(ChartError::InvalidData(
            "line tension must be finite and in [0, 1]".to_owned(),
        ));
    }
    if pixels.len() < 2 {
        return Ok(Vec::new());
    }

    let last = pixels.len() - 1;
    let controls: Vec<(PixelPoint, PixelPoint)> = (0..pixels.len())
        .map(|i| {
            let current = pixels[i];
            let previous = pixels[i.saturating_sub(1)];
            let next = pixels[(i + 1).min(last)];
            control_points(previous, current, next, tension)
        })
        .collect();

    let segments = pixels
        .windows(2)
        .enumerate()
        .map(|(i, pair)| CurveSegment {
            start: pair[0],
            control1: controls[i].1,
            control2: controls[i + 1].0,
            end: pair[1],
        })
        .collect();
    Ok(segments)
}

fn control_points(
    previous: PixelPoint,
    current: PixelPoint,
    next: PixelPoint,
    tension: f64,
) -> (PixelPoint, PixelPoint) {
    let d01 = previous.distance(current);
    let d12 = current.distance(next);
    let total = d01 + d12;

    let (s01, s12) = if total > 0.0 {
        (d01 / total, d12 / total)
    } else {
        (0.0, 0.0)
    };
    let fa = tension * s01;
    let fb = tension * s12;
    let dx = next.x - previous.x;
    let dy = next.y - previous.y;

    (
        PixelPoint::new(current.x - fa * dx, current.y - fa * dy),
        PixelPoint::new(current.x + fb * dx, current.y + fb * dy),
    )
}
