//! Leaf behavior nodes.
//!
//! Leaves are where a tree touches the context: [`Condition`] reads it,
//! [`Action`] changes it. Both carry a static name for diagnostics.

use crate::{Behavior, Status};

type Predicate<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;
type Effect<C> = Box<dyn Fn(&mut C) -> Status + Send + Sync>;

/// A pure predicate over the context.
///
/// Returns `Success` when the predicate holds and `Failure` otherwise.
/// The predicate only receives a shared reference, so it cannot change state.
pub struct Condition<C> {
    name: &'static str,
    predicate: Predicate<C>,
}

impl<C> Condition<C> {
    pub fn new(name: &'static str, predicate: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name,
            predicate: Box::new(predicate),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<C> Behavior<C> for Condition<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let holds = (self.predicate)(ctx);
        tracing::trace!(target: "behavior_tree", node = self.name, holds, "condition");
        Status::from(holds)
    }
}

/// A side-effecting step that reports its own status.
pub struct Action<C> {
    name: &'static str,
    effect: Effect<C>,
}

impl<C> Action<C> {
    pub fn new(
        name: &'static str,
        effect: impl Fn(&mut C) -> Status + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            effect: Box::new(effect),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<C> Behavior<C> for Action<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let status = (self.effect)(ctx);
        tracing::trace!(target: "behavior_tree", node = self.name, ?status, "action");
        status
    }
}
