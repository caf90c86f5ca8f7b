//! livechart: realtime multi-series line charts over a rolling time window.
//!
//! Samples tagged with a series label stream in through a host-managed event
//! channel; the engine keeps one colored line per label and draws the last
//! few minutes of data into any `Renderer` surface.

pub mod api;
pub mod core;
pub mod error;
pub mod host;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
pub use host::{ChartHost, ChartLifecycle};
