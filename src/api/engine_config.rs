use serde::{Deserialize, Serialize};

use crate::core::{PaletteExhaustion, RealtimeWindow, SuggestedRange, Viewport};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_WINDOW_DURATION_MS: f64 = 5.0 * 60.0 * 1000.0;
pub const DEFAULT_RENDER_DELAY_MS: f64 = 50.0;
pub const DEFAULT_FRAME_RATE: f64 = 30.0;
pub const DEFAULT_LINE_TENSION: f64 = 0.3;
pub const DEFAULT_LINE_WIDTH: f64 = 3.0;
pub const DEFAULT_SUGGESTED_MIN: f64 = 50.0;
pub const DEFAULT_SUGGESTED_MAX: f64 = 200.0;

/// Public engine bootstrap configuration.
///
/// This type is serializable so embedders can persist/load chart setup
/// without inventing their own ad-hoc format. Every field except `viewport`
/// has a default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default = "default_window_duration_ms")]
    pub window_duration_ms: f64,
    #[serde(default = "default_render_delay_ms")]
    pub render_delay_ms: f64,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    #[serde(default = "default_line_tension")]
    pub line_tension: f64,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default = "default_suggested_min")]
    pub suggested_min: f64,
    #[serde(default = "default_suggested_max")]
    pub suggested_max: f64,
    #[serde(default)]
    pub palette_exhaustion: PaletteExhaustion,
    #[serde(default = "default_show_legend")]
    pub show_legend: bool,
}

impl ChartEngineConfig {
    /// Creates a config with the stock realtime settings.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            window_duration_ms: default_window_duration_ms(),
            render_delay_ms: default_render_delay_ms(),
            frame_rate: default_frame_rate(),
            line_tension: default_line_tension(),
            line_width: default_line_width(),
            suggested_min: default_suggested_min(),
            suggested_max: default_suggested_max(),
            palette_exhaustion: PaletteExhaustion::default(),
            show_legend: default_show_legend(),
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Sets visible window length and how far its right edge trails "now".
    #[must_use]
    pub fn with_window(mut self, duration_ms: f64, delay_ms: f64) -> Self {
        self.window_duration_ms = duration_ms;
        self.render_delay_ms = delay_ms;
        self
    }

    /// Sets how often the window scrolls when no new data arrives.
    #[must_use]
    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    #[must_use]
    pub fn with_line_tension(mut self, tension: f64) -> Self {
        self.line_tension = tension;
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    /// Sets the soft Y range. Data outside it still widens the axis.
    #[must_use]
    pub fn with_suggested_range(mut self, min: f64, max: f64) -> Self {
        self.suggested_min = min;
        self.suggested_max = max;
        self
    }

    #[must_use]
    pub fn with_palette_exhaustion(mut self, exhaustion: PaletteExhaustion) -> Self {
        self.palette_exhaustion = exhaustion;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }

    pub fn window(&self) -> ChartResult<RealtimeWindow> {
        RealtimeWindow::new(self.window_duration_ms, self.render_delay_ms)
    }

    pub fn suggested_range(&self) -> ChartResult<SuggestedRange> {
        SuggestedRange::new(self.suggested_min, self.suggested_max)
    }

    /// Minimum spacing between two unforced frames.
    #[must_use]
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.frame_rate
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.window()?;
        self.suggested_range()?;
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(ChartError::InvalidData(
                "frame rate must be finite and > 0".to_owned(),
            ));
        }
        if !self.line_tension.is_finite() || !(0.0..=1.0).contains(&self.line_tension) {
            return Err(ChartError::InvalidData(
                "line tension must be finite and in [0, 1]".to_owned(),
            ));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line width must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }

    /// Parses and validates a JSON config. Omitted fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()
    }
}

fn default_window_duration_ms() -> f64 {
    DEFAULT_WINDOW_DURATION_MS
}

fn default_render_delay_ms() -> f64 {
    DEFAULT_RENDER_DELAY_MS
}

fn default_frame_rate() -> f64 {
    DEFAULT_FRAME_RATE
}

fn default_line_tension() -> f64 {
    DEFAULT_LINE_TENSION
}

fn default_line_width() -> f64 {
    DEFAULT_LINE_WIDTH
}

fn default_suggested_min() -> f64 {
    DEFAULT_SUGGESTED_MIN
}

fn default_suggested_max() -> f64 {
    DEFAULT_SUGGESTED_MAX
}

fn default_show_legend() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::ChartEngineConfig;
    use crate::core::{PaletteExhaustion, Viewport};

    #[test]
    fn defaults_match_realtime_settings() {
        let config = ChartEngineConfig::new(Viewport::new(800, 400));
        assert_eq!(config.window_duration_ms, 300_000.0);
        assert_eq!(config.render_delay_ms, 50.0);
        assert_eq!(config.line_tension, 0.3);
        assert_eq!((config.suggested_min, config.suggested_max), (50.0, 200.0));
        assert_eq!(config.palette_exhaustion, PaletteExhaustion::Error);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_fills_omitted_fields_with_defaults() {
        let config = ChartEngineConfig::from_json_str(
            r#"{"viewport":{"width":640,"height":320},"palette_exhaustion":"Wrap"}"#,
        )
        .expect("parse");
        assert_eq!(config.viewport, Viewport::new(640, 320));
        assert_eq!(config.window_duration_ms, 300_000.0);
        assert_eq!(config.palette_exhaustion, PaletteExhaustion::Wrap);
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let config = ChartEngineConfig::new(Viewport::new(640, 320)).with_line_tension(0.0);
        let json = config.to_json_pretty().expect("serialize");
        assert_eq!(ChartEngineConfig::from_json_str(&json).expect("parse"), config);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let base = ChartEngineConfig::new(Viewport::new(640, 320));
        assert!(base.with_suggested_range(200.0, 50.0).validate().is_err());
        assert!(base.with_line_tension(2.0).validate().is_err());
        assert!(base.with_frame_rate(0.0).validate().is_err());
        assert!(base.with_window(0.0, 50.0).validate().is_err());
        assert!(base.with_viewport(Viewport::new(0, 320)).validate().is_err());
    }
}
