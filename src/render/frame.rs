use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CurvePrimitive, LinePrimitive, RectPrimitive, TextPrimitive};

/// Pixel rectangle that series curves are clipped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    pub fn validate(self) -> ChartResult<()> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|value| value.is_finite());
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(ChartError::InvalidData(
                "plot area must be finite and non-empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// The Cairo backend paints rects first, then lines, then curves clipped to
/// `plot_area`, then texts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub plot_area: PlotArea,
    pub lines: Vec<LinePrimitive>,
    pub curves: Vec<CurvePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, plot_area: PlotArea) -> Self {
        Self {
            viewport,
            plot_area,
            lines: Vec::new(),
            curves: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.plot_area.validate()?;

        for line in &self.lines {
            line.validate()?;
        }
        for curve in &self.curves {
            curve.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }
}
