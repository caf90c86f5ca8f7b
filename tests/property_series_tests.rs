use livechart::api::{ChartEngine, ChartEngineConfig};
use livechart::core::{
    DataPoint, PixelPoint, Sample, SuggestedRange, Viewport, drawable_slice, spline_segments,
};
use livechart::render::NullRenderer;
use proptest::prelude::*;

fn build_engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(800, 400));
    ChartEngine::new(NullRenderer::default(), config).expect("engine init")
}

proptest! {
    #[test]
    fn distinct_labels_get_distinct_colors(label_count in 1usize..=6) {
        let mut engine = build_engine();
        for i in 0..label_count {
            engine
                .add_point(&format!("series-{i}"), Sample::new(0, 1.0))
                .expect("within palette capacity");
        }

        let colors: Vec<_> = engine.series().map(|series| series.color()).collect();
        prop_assert_eq!(colors.len(), label_count);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                prop_assert_ne!(a, b);
            }
        }
        prop_assert_eq!(engine.palette().remaining(), 6 - label_count);
    }

    #[test]
    fn points_follow_call_order_and_convert_timestamps(
        samples in prop::collection::vec((-1_000_000_000_000i64..1_000_000_000_000_000_000, -1.0e6f64..1.0e6), 1..40)
    ) {
        let mut engine = build_engine();
        for &(tstamp, val) in &samples {
            engine.add_point("s", Sample::new(tstamp, val)).expect("add");
        }

        let series = engine.series_by_label("s").expect("series");
        prop_assert_eq!(series.points().len(), samples.len());
        for (point, &(tstamp, val)) in series.points().iter().zip(&samples) {
            prop_assert_eq!(point.x, tstamp as f64 / 1.0e6);
            prop_assert_eq!(point.y, val);
        }
        let &(last_tstamp, last_val) = samples.last().expect("non-empty");
        prop_assert_eq!(
            series.last_point(),
            Some(DataPoint::new(last_tstamp as f64 / 1.0e6, last_val))
        );
    }

    #[test]
    fn resolved_range_always_contains_suggested_bounds_and_values(
        values in prop::collection::vec(-1.0e4f64..1.0e4, 0..50)
    ) {
        let range = SuggestedRange::new(50.0, 200.0).expect("range");
        let (lo, hi) = range.resolve(values.iter().copied());
        prop_assert!(lo <= 50.0 && hi >= 200.0);
        for value in values {
            prop_assert!(value >= lo && value <= hi);
        }
    }

    #[test]
    fn drawable_slice_is_contiguous_and_covers_window(
        xs in prop::collection::vec(0.0f64..1_000.0, 0..60),
        start in 0.0f64..500.0,
        span in 1.0f64..500.0
    ) {
        let points: Vec<DataPoint> = xs.iter().map(|&x| DataPoint::new(x, 0.0)).collect();
        let end = start + span;
        let slice = drawable_slice(&points, start, end);

        let inside = points.iter().filter(|p| p.x >= start && p.x <= end).count();
        let inside_slice = slice.iter().filter(|p| p.x >= start && p.x <= end).count();
        prop_assert_eq!(inside, inside_slice);
        if inside == 0 {
            prop_assert!(slice.is_empty());
        }
    }

    #[test]
    fn spline_passes_through_every_point(
        ys in prop::collection::vec(-500.0f64..500.0, 2..30),
        tension in 0.0f64..=1.0
    ) {
        let pixels: Vec<PixelPoint> = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| PixelPoint::new(i as f64 * 10.0, y))
            .collect();
        let segments = spline_segments(&pixels, tension).expect("segments");

        prop_assert_eq!(segments.len(), pixels.len() - 1);
        for (segment, pair) in segments.iter().zip(pixels.windows(2)) {
            prop_assert_eq!(segment.start, pair[0]);
            prop_assert_eq!(segment.end, pair[1]);
            prop_assert!(segment.control1.x.is_finite() && segment.control1.y.is_finite());
            prop_assert!(segment.control2.x.is_finite() && segment.control2.y.is_finite());
        }
    }
}
