use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::error::ChartResult;

/// Handle returned by `EventSource::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Registration side of the host's named event stream.
pub trait EventSource {
    fn subscribe(&mut self, channel: &str) -> SubscriptionId;

    /// Removes a subscription. Returns `false` if it was not registered.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// Receiver of decoded-on-demand events.
pub trait EventSink {
    /// Subscription this sink listens through, if any.
    fn subscription(&self) -> Option<SubscriptionId>;

    fn handle_event(&mut self, channel: &str, payload: &Value) -> ChartResult<()>;
}

/// In-memory single-threaded event stream.
#[derive(Debug, Default)]
pub struct LocalEventBus {
    next_id: u64,
    subscriptions: IndexMap<SubscriptionId, String>,
}

impl LocalEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.contains_key(&id)
    }

    #[must_use]
    pub fn subscribers(&self, channel: &str) -> Vec<SubscriptionId> {
        self.subscriptions
            .iter()
            .filter(|(_, subscribed)| subscribed.as_str() == channel)
            .map(|(id, _)| *id)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Delivers `payload` to `sink` when the sink holds a live subscription to `channel`.
    ///
    /// Returns whether the event was delivered.
    pub fn publish(
        &self,
        channel: &str,
        payload: &Value,
        sink: &mut dyn EventSink,
    ) -> ChartResult<bool> {
        let subscribed = sink
            .subscription()
            .and_then(|id| self.subscriptions.get(&id))
            .is_some_and(|subscribed| subscribed.as_str() == channel);
        if !subscribed {
            trace!(channel, "dropping event without live subscription");
            return Ok(false);
        }

        sink.handle_event(channel, payload)?;
        Ok(true)
    }
}

impl EventSource for LocalEventBus {
    fn subscribe(&mut self, channel: &str) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id);
        self.next_id += 1;
        self.subscriptions.insert(id, channel.to_owned());
        trace!(channel, id = id.raw(), "subscribed");
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.shift_remove(&id).is_some()
    }
}
