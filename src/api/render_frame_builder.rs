use chrono::{DateTime, Utc};

use crate::core::{
    LinearScale, Series, SeriesCollection, Viewport, drawable_slice, project_points,
    spline_segments,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, CurvePrimitive, LinePrimitive, PlotArea, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::ChartEngineConfig;

const LEFT_GUTTER_PX: f64 = 48.0;
const RIGHT_GUTTER_PX: f64 = 12.0;
const BOTTOM_GUTTER_PX: f64 = 24.0;
const TOP_GUTTER_PX: f64 = 8.0;
const LEGEND_HEIGHT_PX: f64 = 24.0;
const LEGEND_SWATCH_PX: f64 = 12.0;
const LEGEND_GAP_PX: f64 = 10.0;
const FONT_SIZE_PX: f64 = 11.0;
const PRICE_TICK_COUNT: usize = 5;
const TIME_TICK_STEP_MS: f64 = 60_000.0;
const MAX_TIME_TICKS: usize = 32;
const MARKER_SIZE_PX: f64 = 4.0;

const GRID_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.1);
const AXIS_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.25);
const LABEL_COLOR: Color = Color::rgb(0.4, 0.4, 0.4);

/// Pixel placement of the plot and legend inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub plot_area: PlotArea,
    pub legend_top: Option<f64>,
}

impl ChartLayout {
    pub fn for_viewport(viewport: Viewport, show_legend: bool) -> ChartResult<Self> {
        let legend_height = if show_legend { LEGEND_HEIGHT_PX } else { 0.0 };
        let width = f64::from(viewport.width) - LEFT_GUTTER_PX - RIGHT_GUTTER_PX;
        let height = f64::from(viewport.height) - TOP_GUTTER_PX - legend_height - BOTTOM_GUTTER_PX;
        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        Ok(Self {
            plot_area: PlotArea::new(
                LEFT_GUTTER_PX,
                TOP_GUTTER_PX + legend_height,
                width,
                height,
            ),
            legend_top: show_legend.then_some(TOP_GUTTER_PX),
        })
    }
}

/// Inputs for one frame, resolved by the engine for a single instant.
pub(super) struct FrameInputs<'a> {
    pub config: &'a ChartEngineConfig,
    pub layout: ChartLayout,
    pub series: &'a SeriesCollection,
    pub time_range: (f64, f64),
    pub value_range: (f64, f64),
}

pub(super) fn build_frame(inputs: &FrameInputs<'_>) -> ChartResult<RenderFrame> {
    let plot = inputs.layout.plot_area;
    let (time_start, time_end) = inputs.time_range;
    let (value_min, value_max) = inputs.value_range;
    let x_scale = LinearScale::new(time_start, time_end, plot.left(), plot.right())?;
    let y_scale = LinearScale::new(value_min, value_max, plot.bottom(), plot.top())?;

    let mut frame = RenderFrame::new(inputs.config.viewport, plot);
    push_price_grid(&mut frame, y_scale)?;
    push_time_grid(&mut frame, x_scale, inputs.time_range)?;
    push_axes(&mut frame);

    for series in inputs.series.iter() {
        push_series(&mut frame, series, inputs, x_scale, y_scale)?;
    }

    if let Some(legend_top) = inputs.layout.legend_top {
        push_legend(&mut frame, inputs.series, legend_top);
    }

    Ok(frame)
}

fn push_series(
    frame: &mut RenderFrame,
    series: &Series,
    inputs: &FrameInputs<'_>,
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> ChartResult<()> {
    let (start, end) = inputs.time_range;
    let visible = drawable_slice(series.points(), start, end);
    let pixels = project_points(visible, x_scale, y_scale)?;

    match pixels.as_slice() {
        [] => {}
        [only] => {
            // a lone point has no segment to stroke
            frame.rects.push(RectPrimitive::new(
                only.x - MARKER_SIZE_PX / 2.0,
                only.y - MARKER_SIZE_PX / 2.0,
                MARKER_SIZE_PX,
                MARKER_SIZE_PX,
                series.color(),
            ));
        }
        _ => {
            let segments = spline_segments(&pixels, inputs.config.line_tension)?;
            frame.curves.push(CurvePrimitive::new(
                segments,
                inputs.config.line_width,
                series.color(),
            ));
        }
    }
    Ok(())
}

fn push_price_grid(frame: &mut RenderFrame, y_scale: LinearScale) -> ChartResult<()> {
    let plot = frame.plot_area;
    let (min, max) = y_scale.domain();
    // span may overflow to infinity
    let precision: usize = if max - min >= 10.0 { 0 } else { 2 };

    for i in 0..PRICE_TICK_COUNT {
        let value = y_scale.interpolate_domain(i as f64 / (PRICE_TICK_COUNT - 1) as f64);
        let y = y_scale.domain_to_pixel(value)?;
        frame.lines.push(LinePrimitive::new(
            plot.left(),
            y,
            plot.right(),
            y,
            1.0,
            GRID_COLOR,
        ));
        frame.texts.push(TextPrimitive::new(
            format!("{value:.precision$}"),
            plot.left() - 6.0,
            y - FONT_SIZE_PX / 2.0,
            FONT_SIZE_PX,
            LABEL_COLOR,
            TextHAlign::Right,
        ));
    }
    Ok(())
}

fn push_time_grid(
    frame: &mut RenderFrame,
    x_scale: LinearScale,
    (start, end): (f64, f64),
) -> ChartResult<()> {
    let plot = frame.plot_area;
    let first = (start / TIME_TICK_STEP_MS).ceil() * TIME_TICK_STEP_MS;
    if !first.is_finite() || first > end {
        return Ok(());
    }
    // step by index: at large timestamps adding a minute may not change the value
    let last_index = ((end - first) / TIME_TICK_STEP_MS).floor() as usize;
    let stride = last_index / MAX_TIME_TICKS + 1;

    for index in (0..=last_index).step_by(stride) {
        let tick = first + index as f64 * TIME_TICK_STEP_MS;
        if tick > end {
            break;
        }
        let x = x_scale.domain_to_pixel(tick)?;
        frame.lines.push(LinePrimitive::new(
            x,
            plot.top(),
            x,
            plot.bottom(),
            1.0,
            GRID_COLOR,
        ));
        if let Some(label) = format_time_label(tick) {
            frame.texts.push(TextPrimitive::new(
                label,
                x,
                plot.bottom() + 4.0,
                FONT_SIZE_PX,
                LABEL_COLOR,
                TextHAlign::Center,
            ));
        }
    }
    Ok(())
}

fn push_axes(frame: &mut RenderFrame) {
    let plot = frame.plot_area;
    frame.lines.push(LinePrimitive::new(
        plot.left(),
        plot.top(),
        plot.left(),
        plot.bottom(),
        1.0,
        AXIS_COLOR,
    ));
    frame.lines.push(LinePrimitive::new(
        plot.left(),
        plot.bottom(),
        plot.right(),
        plot.bottom(),
        1.0,
        AXIS_COLOR,
    ));
}

fn push_legend(frame: &mut RenderFrame, series: &SeriesCollection, top: f64) {
    let mut x = frame.plot_area.left();
    for entry in series.iter() {
        frame.rects.push(
            RectPrimitive::new(
                x,
                top,
                LEGEND_SWATCH_PX,
                LEGEND_SWATCH_PX,
                entry.color().with_alpha(0.5),
            )
            .with_border(1.0, entry.color()),
        );
        frame.texts.push(TextPrimitive::new(
            entry.label(),
            x + LEGEND_SWATCH_PX + 4.0,
            top,
            FONT_SIZE_PX,
            LABEL_COLOR,
            TextHAlign::Left,
        ));
        x += LEGEND_SWATCH_PX + 4.0 + estimate_text_width(entry.label()) + LEGEND_GAP_PX;
    }
}

fn estimate_text_width(text: &str) -> f64 {
    text.chars().count() as f64 * FONT_SIZE_PX * 0.6
}

fn format_time_label(millis: f64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .map(|time| time.format("%H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::{ChartLayout, format_time_label};
    use crate::core::Viewport;

    #[test]
    fn layout_reserves_legend_strip() {
        let with_legend = ChartLayout::for_viewport(Viewport::new(800, 400), true).expect("layout");
        let without = ChartLayout::for_viewport(Viewport::new(800, 400), false).expect("layout");
        assert!(with_legend.plot_area.top() > without.plot_area.top());
        assert_eq!(with_legend.plot_area.bottom(), without.plot_area.bottom());
        assert!(without.legend_top.is_none());
    }

    #[test]
    fn tiny_viewport_has_no_plot_area() {
        assert!(ChartLayout::for_viewport(Viewport::new(40, 400), true).is_err());
        assert!(ChartLayout::for_viewport(Viewport::new(400, 40), true).is_err());
    }

    #[test]
    fn time_labels_are_utc_clock_times() {
        assert_eq!(format_time_label(3_723_000.0).as_deref(), Some("01:02:03"));
    }
}
