use livechart::api::{ChartEngineConfig, EngineState};
use livechart::core::{DataPoint, Viewport};
use livechart::host::{
    ChartHost, ChartLifecycle, EventSource, HostElement, LocalEventBus, ManualClock,
    NEW_POINT_EVENT,
};
use livechart::render::NullRenderer;
use livechart::{ChartError, ChartResult};
use serde_json::json;

#[derive(Default)]
struct CanvasElement {
    surfaces_acquired: usize,
    broken: bool,
}

impl HostElement for CanvasElement {
    type Surface = NullRenderer;

    fn viewport(&self) -> Viewport {
        Viewport::new(640, 320)
    }

    fn acquire_surface(&mut self) -> ChartResult<NullRenderer> {
        if self.broken {
            return Err(ChartError::InvalidData("no 2d context".to_owned()));
        }
        self.surfaces_acquired += 1;
        Ok(NullRenderer::default())
    }
}

fn build_host(clock: &ManualClock) -> ChartHost<NullRenderer, &ManualClock> {
    ChartHost::with_clock(ChartEngineConfig::new(Viewport::new(1, 1)), clock)
}

fn new_point(label: &str, tstamp: i64, val: f64) -> serde_json::Value {
    json!({ "label": label, "value": { "tstamp": tstamp, "val": val } })
}

#[test]
fn attach_binds_engine_to_element_and_subscribes() {
    let clock = ManualClock::new(0.0);
    let mut host = build_host(&clock);
    let mut element = CanvasElement::default();
    let mut bus = LocalEventBus::new();

    host.attach(&mut element, &mut bus).expect("attach");

    assert!(host.is_attached());
    assert_eq!(element.surfaces_acquired, 1);
    assert_eq!(bus.subscribers(NEW_POINT_EVENT).len(), 1);
    let engine = host.engine().expect("engine");
    assert_eq!(engine.config().viewport, Viewport::new(640, 320));
    assert_eq!(engine.state(), EngineState::Bound);
}

#[test]
fn events_flow_through_bus_into_engine() {
    let clock = ManualClock::new(0.0);
    let mut host = build_host(&clock);
    let mut element = CanvasElement::default();
    let mut bus = LocalEventBus::new();
    host.attach(&mut element, &mut bus).expect("attach");

    let delivered = bus
        .publish(NEW_POINT_EVENT, &new_point("sensorA", 1_000_000_000, 72.0), &mut host)
        .expect("publish");
    assert!(delivered);
    host.handle_event_str(
        NEW_POINT_EVENT,
        r#"{"label":"sensorA","value":{"tstamp":2000000000,"val":75}}"#,
    )
    .expect("raw payload");

    let series = host
        .engine()
        .and_then(|engine| engine.series_by_label("sensorA"))
        .expect("series");
    assert_eq!(
        series.points(),
        &[DataPoint::new(1000.0, 72.0), DataPoint::new(2000.0, 75.0)]
    );
}

#[test]
fn malformed_payload_is_rejected_before_engine() {
    let clock = ManualClock::new(0.0);
    let mut host = build_host(&clock);
    let mut element = CanvasElement::default();
    let mut bus = LocalEventBus::new();
    host.attach(&mut element, &mut bus).expect("attach");

    let err = host
        .handle_event(NEW_POINT_EVENT, &json!({ "value": { "tstamp": 1, "val": 2 } }))
        .expect_err("missing label");
    assert!(matches!(err, ChartError::InvalidSample(_)));
    assert!(matches!(
        host.handle_event_str(NEW_POINT_EVENT, "{not json"),
        Err(ChartError::InvalidSample(_))
    ));
    assert_eq!(host.engine().expect("engine").series_count(), 0);
}

#[test]
fn foreign_channels_are_ignored() {
    let clock = ManualClock::new(0.0);
    let mut host = build_host(&clock);
    let mut element = CanvasElement::default();
    let mut bus = LocalEventBus::new();
    host.attach(&mut element, &mut bus).expect("attach");

    host.handle_event("something-else", &json!({ "garbage": true }))
        .expect("ignored");
    assert_eq!(host.engine().expect("engine").series_count(), 0);
}

#[test]
fn detach_unsubscribes_and_stops_delivery() {
    let clock = ManualClock::new(0.0);
    let mut host = build_host(&clock);
    let mut element = CanvasElement::default();
    let mut bus = LocalEventBus::new();
    host.attach(&mut element, &mut bus).expect("attach");

    host.detach(&mut bus).expect("detach");

    assert!(!host.is_attached());
    assert!(bus.is_empty());
    let delivered = bus
        .publish(NEW_POINT_EVENT, &new_point("late", 1, 1.0), &mut host)
        .expect("publish");
    assert!(!delivered);
    assert!(matches!(
        host.handle_event(NEW_POINT_EVENT, &new_point("late", 1, 1.0)),
        Err(ChartError::NotAttached)
    ));
}

#[test]
fn detach_without_attach_is_noop() {
    let clock = ManualClock::new(0.0);
    let mut host = build_host(&clock);
    let mut bus = LocalEventBus::new();

    host.detach(&mut bus).expect("noop detach");
    host.detach(&mut bus).expect("still noop");
    assert!(!host.tick().expect("tick"));
}

#[test]
fn failed_attach_leaves_host_detached() {
    let clock = ManualClock::new(0.0);
    let mut host = build_host(&clock);
    let mut element = CanvasElement {
        broken: true,
        ..CanvasElement::default()
    };
    let mut bus = LocalEventBus::new();

    assert!(host.attach(&mut element, &mut bus).is_err());
    assert!(!host.is_attached());
    assert!(bus.is_empty());
    host.detach(&mut bus).expect("detach after failed attach");
}

#[test]
fn second_attach_is_rejected() {
    let clock = ManualClock::new(0.0);
    let mut host = build_host(&clock);
    let mut element = CanvasElement::default();
    let mut bus = LocalEventBus::new();
    host.attach(&mut element, &mut bus).expect("attach");

    assert!(matches!(
        host.attach(&mut element, &mut bus),
        Err(ChartError::AlreadyAttached)
    ));
    assert_eq!(element.surfaces_acquired, 1);
    assert_eq!(bus.len(), 1);
}

#[test]
fn reattach_after_detach_starts_fresh() {
    let clock = ManualClock::new(0.0);
    let mut host = build_host(&clock);
    let mut element = CanvasElement::default();
    let mut bus = LocalEventBus::new();

    host.attach(&mut element, &mut bus).expect("attach");
    host.handle_event(NEW_POINT_EVENT, &new_point("a", 1, 1.0))
        .expect("event");
    host.detach(&mut bus).expect("detach");
    host.attach(&mut element, &mut bus).expect("reattach");

    assert_eq!(host.engine().expect("engine").series_count(), 0);
    assert_eq!(bus.subscribers(NEW_POINT_EVENT).len(), 1);
}

#[test]
fn tick_follows_host_clock() {
    let clock = ManualClock::new(1_700_000_000_000.0);
    let mut host = build_host(&clock);
    let mut element = CanvasElement::default();
    let mut bus = LocalEventBus::new();
    host.attach(&mut element, &mut bus).expect("attach");

    assert!(host.tick().expect("initial frame"));
    assert!(!host.tick().expect("same instant"));
    clock.advance(40.0);
    assert!(host.tick().expect("window scrolled"));
    let frames = host
        .engine()
        .and_then(|engine| engine.renderer())
        .map(|renderer| renderer.frames_rendered);
    assert_eq!(frames, Some(2));

    host.detach(&mut bus).expect("detach");
    assert!(!host.tick().expect("detached tick"));
}

#[test]
fn event_source_trait_is_object_agnostic() {
    let mut bus = LocalEventBus::new();
    let id = EventSource::subscribe(&mut bus, NEW_POINT_EVENT);
    assert!(bus.is_subscribed(id));
}
