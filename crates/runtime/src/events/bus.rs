//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use maze_core::{Tick, WorldEvent};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    /// Global tick boundaries
    Ticks,
    /// Spawns, moves, pickups, trap deactivations and destruction
    Objects,
    /// Deaths and items handed to the player
    Player,
    /// Callback failures caught by the isolation boundary
    Diagnostics,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Ticks, Topic::Objects, Topic::Player, Topic::Diagnostics];

    const fn index(self) -> usize {
        match self {
            Topic::Ticks => 0,
            Topic::Objects => 1,
            Topic::Player => 2,
            Topic::Diagnostics => 3,
        }
    }
}

/// A world event stamped with the global tick it happened in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub tick: Tick,
    #[serde(flatten)]
    pub event: WorldEvent,
}

impl Event {
    pub fn new(tick: Tick, event: WorldEvent) -> Self {
        Self { tick, event }
    }

    pub fn topic(&self) -> Topic {
        match self.event {
            WorldEvent::TickStarted { .. } => Topic::Ticks,
            WorldEvent::Spawned { .. }
            | WorldEvent::Moved { .. }
            | WorldEvent::ItemPickedUp { .. }
            | WorldEvent::TrapDeactivated { .. }
            | WorldEvent::Destroyed { .. } => Topic::Objects,
            WorldEvent::PlayerKilled { .. } | WorldEvent::ItemGiven { .. } => Topic::Player,
            WorldEvent::CallbackFailed { .. } => Topic::Diagnostics,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels are created up front, one per topic.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; 4]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL.map(|_| broadcast::channel(capacity).0);
        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels[topic.index()].send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "maze_runtime::events", %topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels[topic.index()].subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
