//! Synchronous publish/subscribe over game events.
//!
//! Every event the hero or the curse causes goes through one [`EventBus`] per
//! game. Subscribers see events in publish order, and the bus keeps a bounded
//! history for snapshots and replays.
mod bus;
mod types;

pub use bus::{
    EventBus, PublishReport, Subscriber, SubscriberError, SubscriberFailure, SubscriptionId,
};
pub use types::{EventKind, EventRecord, GameEvent, SuspicionCause};
