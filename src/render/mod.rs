mod frame;
mod null_renderer;
mod primitives;

pub use frame::{PlotArea, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, CurvePrimitive, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any drawing surface.
///
/// Surfaces receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from series bookkeeping and host lifecycle.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
