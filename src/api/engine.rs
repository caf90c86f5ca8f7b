use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    Palette, RealtimeWindow, Sample, Series, SeriesCollection, SuggestedRange, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};

use super::render_frame_builder::{self, ChartLayout, FrameInputs};
use super::{ChartEngineConfig, InvalidationMask, InvalidationTopic};

/// Lifecycle of an engine. `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Bound,
    Destroyed,
}

/// Realtime multi-series line chart bound to one drawing surface.
///
/// Samples are appended synchronously by `add_point`; drawing is deferred to
/// `tick`, which the host calls from its render loop. Repaint requests made
/// between two ticks coalesce into one frame.
pub struct ChartEngine<R: Renderer> {
    renderer: Option<R>,
    config: ChartEngineConfig,
    layout: ChartLayout,
    window: RealtimeWindow,
    suggested_range: SuggestedRange,
    palette: Palette,
    series: SeriesCollection,
    pending: InvalidationMask,
    last_frame_ms: Option<f64>,
}

impl<R: Renderer> ChartEngine<R> {
    /// Binds a new engine to `renderer` with an empty series set and a fresh palette.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let layout = ChartLayout::for_viewport(config.viewport, config.show_legend)?;

        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            window_ms = config.window_duration_ms,
            "chart engine bound"
        );

        Ok(Self {
            renderer: Some(renderer),
            window: config.window()?,
            suggested_range: config.suggested_range()?,
            palette: Palette::realtime_default(config.palette_exhaustion),
            config,
            layout,
            series: SeriesCollection::default(),
            pending: InvalidationMask::full(),
            last_frame_ms: None,
        })
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.renderer.is_some() {
            EngineState::Bound
        } else {
            EngineState::Destroyed
        }
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Appends one sample to the series named `label`, creating the series on first use.
    ///
    /// The timestamp is converted from nanoseconds to milliseconds. When the
    /// series would need a new color and the palette refuses, nothing changes.
    pub fn add_point(&mut self, label: &str, sample: Sample) -> ChartResult<()> {
        self.ensure_bound()?;
        if label.is_empty() {
            return Err(ChartError::InvalidSample(
                "series label must not be empty".to_owned(),
            ));
        }

        let sample = sample.validate()?;

        let series = self.series.find_or_create(label, &mut self.palette)?;
        let point = sample.to_point();
        series.push(point);
        trace!(label, x = point.x, y = point.y, "appended point");

        self.pending.merge(InvalidationMask::series());
        Ok(())
    }

    /// Releases the surface and every series. The engine is inert afterwards.
    ///
    /// Returns the released surface; a second call fails with `UseAfterDestroy`.
    pub fn destroy(&mut self) -> ChartResult<R> {
        let renderer = self.renderer.take().ok_or(ChartError::UseAfterDestroy)?;
        debug!(
            series = self.series.len(),
            points = self.series.point_count(),
            "chart engine destroyed"
        );
        self.series.clear();
        self.pending = InvalidationMask::none();
        self.last_frame_ms = None;
        Ok(renderer)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.ensure_bound()?;
        let config = self.config.with_viewport(viewport).validate()?;
        self.layout = ChartLayout::for_viewport(viewport, config.show_legend)?;
        self.config = config;
        self.pending.merge(InvalidationMask::layout());
        Ok(())
    }

    pub fn series(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    #[must_use]
    pub fn series_by_label(&self, label: &str) -> Option<&Series> {
        self.series.get(label)
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Visible X range in milliseconds for the wall-clock instant `now_ms`.
    #[must_use]
    pub fn visible_range(&self, now_ms: f64) -> (f64, f64) {
        self.window.visible_range(now_ms)
    }

    /// Y domain for `now_ms`: the suggested range widened by visible data.
    #[must_use]
    pub fn y_range(&self, now_ms: f64) -> (f64, f64) {
        let (start, end) = self.visible_range(now_ms);
        let values = self
            .series
            .iter()
            .flat_map(|series| series.points().iter())
            .filter(|point| point.x >= start && point.x <= end)
            .map(|point| point.y);
        self.suggested_range.resolve(values)
    }

    #[must_use]
    pub fn has_pending_invalidation(&self) -> bool {
        !self.pending.is_none()
    }

    pub fn clear_pending_invalidation(&mut self) {
        self.pending = InvalidationMask::none();
    }

    /// Whether a frame is due at `now_ms`, either because content changed or
    /// because the window has scrolled for a full frame interval.
    #[must_use]
    pub fn needs_frame(&self, now_ms: f64) -> bool {
        if self.renderer.is_none() {
            return false;
        }
        if self.has_pending_invalidation() {
            return true;
        }
        match self.last_frame_ms {
            None => true,
            Some(last) => now_ms - last >= self.config.frame_interval_ms(),
        }
    }

    pub fn build_render_frame(&self, now_ms: f64) -> ChartResult<RenderFrame> {
        self.ensure_bound()?;
        if !now_ms.is_finite() {
            return Err(ChartError::InvalidData("frame time must be finite".to_owned()));
        }

        render_frame_builder::build_frame(&FrameInputs {
            config: &self.config,
            layout: self.layout,
            series: &self.series,
            time_range: self.visible_range(now_ms),
            value_range: self.y_range(now_ms),
        })
    }

    /// Draws a frame for `now_ms` unconditionally.
    pub fn render(&mut self, now_ms: f64) -> ChartResult<()> {
        let frame = self.build_render_frame(now_ms)?;
        let renderer = self.renderer.as_mut().ok_or(ChartError::UseAfterDestroy)?;
        trace!(
            series_changed = self.pending.contains(InvalidationTopic::Series),
            layout_changed = self.pending.contains(InvalidationTopic::Layout),
            "drawing frame"
        );
        renderer.render(&frame)?;
        self.pending = InvalidationMask::none();
        self.last_frame_ms = Some(now_ms);
        Ok(())
    }

    /// Draws a frame only when one is due. Returns whether a frame was drawn.
    pub fn tick(&mut self, now_ms: f64) -> ChartResult<bool> {
        self.ensure_bound()?;
        if !self.needs_frame(now_ms) {
            return Ok(false);
        }
        self.render(now_ms)?;
        Ok(true)
    }

    #[must_use]
    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    fn ensure_bound(&self) -> ChartResult<()> {
        if self.renderer.is_none() {
            return Err(ChartError::UseAfterDestroy);
        }
        Ok(())
    }
}
