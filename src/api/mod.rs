mod engine;
mod engine_config;
mod invalidation;
mod render_frame_builder;

pub use engine::{ChartEngine, EngineState};
pub use engine_config::{
    ChartEngineConfig, DEFAULT_FRAME_RATE, DEFAULT_LINE_TENSION, DEFAULT_LINE_WIDTH,
    DEFAULT_RENDER_DELAY_MS, DEFAULT_SUGGESTED_MAX, DEFAULT_SUGGESTED_MIN,
    DEFAULT_WINDOW_DURATION_MS,
};
pub use invalidation::{InvalidationMask, InvalidationTopic};
pub use render_frame_builder::ChartLayout;
