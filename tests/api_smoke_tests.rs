use livechart::api::{
    ChartEngine, ChartEngineConfig, DEFAULT_FRAME_RATE, DEFAULT_LINE_TENSION,
    DEFAULT_RENDER_DELAY_MS, DEFAULT_WINDOW_DURATION_MS,
};
use livechart::core::{PaletteExhaustion, Sample, Viewport};
use livechart::render::NullRenderer;

#[test]
fn engine_smoke_flow() {
    let now_ms = 1_700_000_000_000.0;
    let renderer = NullRenderer::default();
    let config = ChartEngineConfig::new(Viewport::new(800, 600));
    let mut engine = ChartEngine::new(renderer, config).expect("engine init");

    for step in 0..10_i64 {
        let tstamp = (now_ms as i64 - 10_000 + step * 1_000) * 1_000_000;
        engine
            .add_point("cpu", Sample::new(tstamp, 60.0 + step as f64))
            .expect("add cpu");
        engine
            .add_point("mem", Sample::new(tstamp, 120.0 - step as f64))
            .expect("add mem");
    }

    assert!(engine.tick(now_ms).expect("tick"));
    let renderer = engine.renderer().expect("bound");
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_curve_count, 2);
    assert_eq!(engine.y_range(now_ms), (50.0, 200.0));

    let renderer = engine.destroy().expect("destroy");
    assert_eq!(renderer.frames_rendered, 1);
}

#[test]
fn default_config_matches_realtime_profile() {
    let config = ChartEngineConfig::new(Viewport::new(800, 600));
    assert_eq!(config.window_duration_ms, DEFAULT_WINDOW_DURATION_MS);
    assert_eq!(config.window_duration_ms, 300_000.0);
    assert_eq!(config.render_delay_ms, DEFAULT_RENDER_DELAY_MS);
    assert_eq!(config.frame_rate, DEFAULT_FRAME_RATE);
    assert_eq!(config.line_tension, DEFAULT_LINE_TENSION);
    assert_eq!((config.suggested_min, config.suggested_max), (50.0, 200.0));
    assert_eq!(config.palette_exhaustion, PaletteExhaustion::Error);
    assert!(config.show_legend);
}

#[test]
fn config_json_round_trip_and_defaults() {
    let config = ChartEngineConfig::new(Viewport::new(640, 360))
        .with_window(60_000.0, 100.0)
        .with_palette_exhaustion(PaletteExhaustion::Wrap)
        .with_legend(false);
    let json = config.to_json_pretty().expect("serialize");
    let parsed = ChartEngineConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);

    let minimal = ChartEngineConfig::from_json_str(r#"{"viewport":{"width":640,"height":360}}"#)
        .expect("minimal config");
    assert_eq!(minimal, ChartEngineConfig::new(Viewport::new(640, 360)));

    assert!(
        ChartEngineConfig::from_json_str(r#"{"viewport":{"width":640,"height":360},"line_tension":2.0}"#)
            .is_err()
    );
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let bad_window = ChartEngineConfig::new(Viewport::new(800, 600)).with_window(-1.0, 50.0);
    assert!(ChartEngine::new(NullRenderer::default(), bad_window).is_err());

    let bad_range = ChartEngineConfig::new(Viewport::new(800, 600)).with_suggested_range(10.0, 5.0);
    assert!(ChartEngine::new(NullRenderer::default(), bad_range).is_err());

    let empty = ChartEngineConfig::new(Viewport::new(0, 0));
    assert!(ChartEngine::new(NullRenderer::default(), empty).is_err());
}
