//! Topic-based streaming of core game events to async consumers.

mod bus;

pub use bus::{EventBus, Topic};
