use crate::error::{ChartError, ChartResult};

/// Linear mapping from a data domain onto a pixel range.
///
/// The pixel range may be reversed (`pixel_start > pixel_end`), which is how
/// the Y axis maps larger values towards the top of the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale pixel range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = self.normalize(value);
        Ok(self.pixel_start + normalized * (self.pixel_end - self.pixel_start))
    }

    /// Position of `value` relative to the domain, `0.0` at start and `1.0` at end.
    ///
    /// Domains wider than `f64::MAX` are measured at half scale so the result stays finite.
    fn normalize(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span.is_finite() {
            return (value - self.domain_start) / span;
        }
        let half_span = self.domain_end * 0.5 - self.domain_start * 0.5;
        (value * 0.5 - self.domain_start * 0.5) / half_span
    }

    /// Value at fraction `t` of the domain, finite for any finite domain.
    #[must_use]
    pub fn interpolate_domain(self, t: f64) -> f64 {
        self.domain_start * (1.0 - t) + self.domain_end * t
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let pixel_span = self.pixel_end - self.pixel_start;
        if pixel_span == 0.0 {
            return Err(ChartError::InvalidData(
                "scale pixel range must be non-empty".to_owned(),
            ));
        }

        let normalized = (pixel - self.pixel_start) / pixel_span;
        Ok(self.interpolate_domain(normalized))
    }
}
