//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use curse_core::{EventKind, EventRecord};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// What the hero did and what happened to them
    Hero,
    /// Curse interference and its direct effects
    Curse,
    /// Game end
    Lifecycle,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Hero, Topic::Curse, Topic::Lifecycle];

    pub fn of(kind: EventKind) -> Self {
        match kind {
            EventKind::RoomAltered
            | EventKind::ItemCorrupted
            | EventKind::EnemyMutated
            | EventKind::TrapPlaced
            | EventKind::CurseActed
            | EventKind::PowerUsed
            | EventKind::EnemySummoned
            | EventKind::SynergyTriggered => Topic::Curse,
            EventKind::GameEnded => Topic::Lifecycle,
            _ => Topic::Hero,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Slow receivers lag and lose the oldest events;
/// the simulation never waits for them.
#[derive(Clone)]
pub struct EventBus {
    hero: broadcast::Sender<EventRecord>,
    curse: broadcast::Sender<EventRecord>,
    lifecycle: broadcast::Sender<EventRecord>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            hero: broadcast::channel(capacity).0,
            curse: broadcast::channel(capacity).0,
            lifecycle: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<EventRecord> {
        match topic {
            Topic::Hero => &self.hero,
            Topic::Curse => &self.curse,
            Topic::Lifecycle => &self.lifecycle,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, record: EventRecord) {
        let topic = Topic::of(record.kind());
        if self.sender(topic).send(record).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "runtime::events", ?topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<EventRecord> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<EventRecord>> {
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
