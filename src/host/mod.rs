//! Binds a `ChartEngine` to a host-managed element and its event stream.
//!
//! The host environment (a page, a widget toolkit, a test harness) owns the
//! drawable element and the named event stream. It calls `attach` when the
//! element is mounted and `detach` when it goes away; in between it routes
//! `new-point` events through `ChartHost::handle_event` and drives frames with
//! `ChartHost::tick`.

mod bus;
mod clock;
mod event;

pub use bus::{EventSink, EventSource, LocalEventBus, SubscriptionId};
pub use clock::{Clock, ManualClock, SystemClock};
pub use event::{NEW_POINT_EVENT, NewPointEvent, NewPointValue};

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::api::{ChartEngine, ChartEngineConfig};
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

/// Element that owns a drawable surface.
pub trait HostElement {
    type Surface: Renderer;

    fn viewport(&self) -> Viewport;

    fn acquire_surface(&mut self) -> ChartResult<Self::Surface>;
}

/// Mount/unmount contract any host environment can drive.
pub trait ChartLifecycle {
    type Surface: Renderer;

    /// Creates the chart on `element` and starts listening to `events`.
    fn attach<E, B>(&mut self, element: &mut E, events: &mut B) -> ChartResult<()>
    where
        E: HostElement<Surface = Self::Surface>,
        B: EventSource;

    /// Stops listening and destroys the chart. No-op when nothing is attached.
    fn detach<B: EventSource>(&mut self, events: &mut B) -> ChartResult<()>;
}

struct AttachedChart<S: Renderer> {
    engine: ChartEngine<S>,
    subscription: SubscriptionId,
}

/// Lifecycle owner for one chart instance.
pub struct ChartHost<S: Renderer, C: Clock = SystemClock> {
    config: ChartEngineConfig,
    clock: C,
    attached: Option<AttachedChart<S>>,
}

impl<S: Renderer> ChartHost<S, SystemClock> {
    /// Host driven by wall-clock time. The config viewport is replaced by the
    /// element's viewport on attach.
    #[must_use]
    pub fn new(config: ChartEngineConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<S: Renderer, C: Clock> ChartHost<S, C> {
    #[must_use]
    pub fn with_clock(config: ChartEngineConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            attached: None,
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    #[must_use]
    pub fn engine(&self) -> Option<&ChartEngine<S>> {
        self.attached.as_ref().map(|attached| &attached.engine)
    }

    pub fn engine_mut(&mut self) -> Option<&mut ChartEngine<S>> {
        self.attached.as_mut().map(|attached| &mut attached.engine)
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Decodes a `new-point` payload and forwards it to the engine.
    ///
    /// Events on other channels are ignored. Malformed payloads are rejected
    /// before they reach the engine.
    pub fn handle_event(&mut self, channel: &str, payload: &Value) -> ChartResult<()> {
        if channel != NEW_POINT_EVENT {
            trace!(channel, "ignoring event on foreign channel");
            return Ok(());
        }
        let attached = self.attached.as_mut().ok_or(ChartError::NotAttached)?;

        let event = NewPointEvent::from_value(payload).inspect_err(|err| {
            warn!(error = %err, "rejected new-point event");
        })?;
        attached.engine.add_point(&event.label, event.sample())
    }

    /// Same as `handle_event` for a raw JSON payload.
    pub fn handle_event_str(&mut self, channel: &str, payload: &str) -> ChartResult<()> {
        let payload: Value = serde_json::from_str(payload)
            .map_err(|e| ChartError::InvalidSample(format!("payload is not valid json: {e}")))?;
        self.handle_event(channel, &payload)
    }

    /// Draws a frame if one is due at the host clock's current time.
    ///
    /// Returns `Ok(false)` when nothing is attached.
    pub fn tick(&mut self) -> ChartResult<bool> {
        let now_ms = self.clock.now_ms();
        match self.attached.as_mut() {
            Some(attached) => attached.engine.tick(now_ms),
            None => Ok(false),
        }
    }
}

impl<S: Renderer, C: Clock> ChartLifecycle for ChartHost<S, C> {
    type Surface = S;

    fn attach<E, B>(&mut self, element: &mut E, events: &mut B) -> ChartResult<()>
    where
        E: HostElement<Surface = S>,
        B: EventSource,
    {
        if self.attached.is_some() {
            return Err(ChartError::AlreadyAttached);
        }

        let surface = element.acquire_surface()?;
        let config = self.config.with_viewport(element.viewport());
        let engine = ChartEngine::new(surface, config)?;
        let subscription = events.subscribe(NEW_POINT_EVENT);
        debug!(subscription = subscription.raw(), "chart host attached");

        self.attached = Some(AttachedChart {
            engine,
            subscription,
        });
        Ok(())
    }

    fn detach<B: EventSource>(&mut self, events: &mut B) -> ChartResult<()> {
        let Some(mut attached) = self.attached.take() else {
            trace!("detach without attached chart");
            return Ok(());
        };

        if !events.unsubscribe(attached.subscription) {
            warn!(
                subscription = attached.subscription.raw(),
                "subscription was already gone on detach"
            );
        }
        attached.engine.destroy()?;
        debug!("chart host detached");
        Ok(())
    }
}

impl<S: Renderer, C: Clock> EventSink for ChartHost<S, C> {
    fn subscription(&self) -> Option<SubscriptionId> {
        self.attached.as_ref().map(|attached| attached.subscription)
    }

    fn handle_event(&mut self, channel: &str, payload: &Value) -> ChartResult<()> {
        ChartHost::handle_event(self, channel, payload)
    }
}
