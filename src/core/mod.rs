pub mod line_series;
pub mod palette;
pub mod scale;
pub mod series;
pub mod types;
pub mod windowing;

pub use line_series::{CurveSegment, PixelPoint, project_points, spline_segments};
pub use palette::{Palette, PaletteExhaustion};
pub use scale::LinearScale;
pub use series::{Series, SeriesCollection};
pub use types::{DataPoint, Sample, Viewport};
pub use windowing::{RealtimeWindow, SuggestedRange, drawable_slice};
