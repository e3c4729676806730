//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the fundamental building blocks for creating complex
//! decision trees: [`Sequence`] (AND logic) and [`Selector`] (OR logic).

use crate::{Behavior, Node, Status};

/// Executes child behaviors in sequence until one does not succeed.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure` or `Running`, the sequence **stops immediately**
///   and returns that status
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
/// - A sequence without children returns `Failure`
///
/// This is analogous to a short-circuited logical AND (&&) operation.
pub struct Sequence<C> {
    children: Vec<Node<C>>,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    pub fn new(children: Vec<Node<C>>) -> Self {
        Self { children }
    }

    /// Child nodes in evaluation order.
    pub fn children(&self) -> &[Node<C>] {
        &self.children
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        if self.children.is_empty() {
            return Status::Failure;
        }

        for child in &self.children {
            match child.tick(ctx) {
                Status::Success => continue,
                other => return other, // Short-circuit
            }
        }
        Status::Success
    }
}

/// Executes child behaviors in sequence until one does not fail.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right:
/// - If a child returns `Success` or `Running`, the selector **stops immediately**
///   and returns that status
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
/// - A selector without children returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation.
pub struct Selector<C> {
    children: Vec<Node<C>>,
}

impl<C> Selector<C> {
    /// Creates a new selector with the given child behaviors.
    pub fn new(children: Vec<Node<C>>) -> Self {
        Self { children }
    }

    /// Child nodes in priority order.
    pub fn children(&self) -> &[Node<C>] {
        &self.children
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            match child.tick(ctx) {
                Status::Failure => continue, // Try next child
                other => return other,
            }
        }
        // All children failed, or there were none
        Status::Failure
    }
}
