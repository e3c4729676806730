//! Async runtime for the cursed dungeon simulation.
//!
//! A single worker task owns the [`curse_core::Game`]. Clients talk to it
//! through a cloneable [`RuntimeHandle`] and receive game events from an
//! [`EventBus`] split by [`Topic`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the handle and error types
//! - [`events`] provides the topic-based event bus
//! - [`batch`] runs many independent games in parallel
//! - `workers` keeps the simulation task internal to the crate
pub mod api;
pub mod batch;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use batch::{BatchOutcome, run_batch, with_random_seeds};
pub use events::{EventBus, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
