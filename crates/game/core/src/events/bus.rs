//! Kind-filtered subscriber registry with bounded history.

use std::collections::VecDeque;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use super::types::{EventKind, EventRecord, GameEvent};

/// Error a subscriber reports back to the bus.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct SubscriberError(pub String);

impl SubscriberError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Receives published events.
///
/// Implemented for every `FnMut(&EventRecord) -> Result<(), SubscriberError>`
/// closure, which is how subscribers are normally written.
pub trait Subscriber: Send {
    fn on_event(&mut self, record: &EventRecord) -> Result<(), SubscriberError>;
}

impl<F> Subscriber for F
where
    F: FnMut(&EventRecord) -> Result<(), SubscriberError> + Send,
{
    fn on_event(&mut self, record: &EventRecord) -> Result<(), SubscriberError> {
        self(record)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// A subscriber that failed while handling one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriberFailure {
    pub subscription: SubscriptionId,
    pub message: String,
}

/// Outcome of one [`EventBus::publish`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub sequence: u64,
    /// Subscribers that handled the event without error.
    pub delivered: usize,
    pub failures: Vec<SubscriberFailure>,
}

impl PublishReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

struct Subscription {
    id: SubscriptionId,
    filter: Option<EventKind>,
    subscriber: Box<dyn Subscriber>,
}

/// Synchronous event bus owned by one game.
///
/// Delivery follows subscription order, regardless of whether a subscriber
/// filters one kind or receives everything. A failing or panicking subscriber
/// is logged and reported without stopping delivery to the rest.
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    history: VecDeque<EventRecord>,
    capacity: usize,
    next_subscription: u64,
    next_sequence: u64,
    turn: u32,
}

impl EventBus {
    pub const DEFAULT_HISTORY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_HISTORY)
    }

    /// Creates a bus retaining at most `capacity` events (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            subscriptions: Vec::new(),
            history: VecDeque::with_capacity(capacity),
            capacity,
            next_subscription: 0,
            next_sequence: 0,
            turn: 0,
        }
    }

    /// Turn stamped onto subsequently published events.
    pub fn set_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        subscriber: impl Subscriber + 'static,
    ) -> SubscriptionId {
        self.register(Some(kind), Box::new(subscriber))
    }

    pub fn subscribe_all(&mut self, subscriber: impl Subscriber + 'static) -> SubscriptionId {
        self.register(None, Box::new(subscriber))
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.id != id);
        before != self.subscriptions.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    fn register(
        &mut self,
        filter: Option<EventKind>,
        subscriber: Box<dyn Subscriber>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.push(Subscription {
            id,
            filter,
            subscriber,
        });
        id
    }

    /// Stamps, records, and delivers `event`.
    pub fn publish(&mut self, event: GameEvent) -> PublishReport {
        let record = EventRecord {
            sequence: self.next_sequence,
            turn: self.turn,
            event,
        };
        self.next_sequence += 1;

        let kind = record.kind();
        tracing::trace!(
            target: "core::events",
            sequence = record.sequence,
            turn = record.turn,
            kind = %kind,
            "publish"
        );

        let mut report = PublishReport {
            sequence: record.sequence,
            ..PublishReport::default()
        };

        for sub in &mut self.subscriptions {
            if sub.filter.is_some_and(|filter| filter != kind) {
                continue;
            }
            let subscriber = &mut sub.subscriber;
            let outcome = catch_unwind(AssertUnwindSafe(|| subscriber.on_event(&record)));
            let message = match outcome {
                Ok(Ok(())) => {
                    report.delivered += 1;
                    continue;
                }
                Ok(Err(err)) => err.0,
                Err(payload) => panic_message(payload.as_ref()),
            };
            tracing::warn!(
                target: "core::events",
                subscription = %sub.id,
                kind = %kind,
                error = %message,
                "subscriber failed"
            );
            report.failures.push(SubscriberFailure {
                subscription: sub.id,
                message,
            });
        }

        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(record);
        report
    }

    /// Retained events, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &EventRecord> {
        self.history.iter()
    }

    pub fn history_of(&self, kind: EventKind) -> impl Iterator<Item = &EventRecord> {
        self.history.iter().filter(move |record| record.kind() == kind)
    }

    /// The last `count` retained events, oldest first.
    pub fn recent(&self, count: usize) -> Vec<EventRecord> {
        let skip = self.history.len().saturating_sub(count);
        self.history.iter().skip(skip).cloned().collect()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .field("history", &self.history.len())
            .field("capacity", &self.capacity)
            .field("turn", &self.turn)
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}
