//! Lightweight behavior tree library for turn-based simulations.
//!
//! Trees are evaluated once per turn against a caller-supplied context:
//!
//! - **No delta time**: every tick completes immediately (turn-based semantics)
//! - **Closed node set**: [`Node`] enumerates every node kind, so a tree is
//!   plain data that can be inspected and matched on
//! - **Stable order**: children are always evaluated in declaration order
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait implemented by every node
//! - [`Status`]: Success, Failure, or Running
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Leaf nodes: [`Condition`], [`Action`]
//! - Decorator nodes: [`Inverter`], [`AlwaysSucceed`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod node;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use composite::{Selector, Sequence};
pub use decorator::{AlwaysSucceed, Inverter};
pub use leaf::{Action, Condition};
pub use node::Node;
pub use status::Status;
