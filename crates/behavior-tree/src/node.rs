//! The closed set of node kinds.

use crate::{Action, AlwaysSucceed, Behavior, Condition, Inverter, Selector, Sequence, Status};

/// Any node a tree can be built from.
///
/// Dispatch is a `match` over this enum. New decision logic is expressed by
/// composing these kinds, never by adding node types at runtime.
pub enum Node<C> {
    Sequence(Sequence<C>),
    Selector(Selector<C>),
    Condition(Condition<C>),
    Action(Action<C>),
    Inverter(Inverter<C>),
    AlwaysSucceed(AlwaysSucceed<C>),
}

impl<C> Node<C> {
    /// Short label for the node kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Sequence(_) => "sequence",
            Node::Selector(_) => "selector",
            Node::Condition(_) => "condition",
            Node::Action(_) => "action",
            Node::Inverter(_) => "inverter",
            Node::AlwaysSucceed(_) => "always_succeed",
        }
    }

    /// Direct children of a composite node; empty for every other kind.
    pub fn children(&self) -> &[Node<C>] {
        match self {
            Node::Sequence(seq) => seq.children(),
            Node::Selector(sel) => sel.children(),
            _ => &[],
        }
    }
}

impl<C> Behavior<C> for Node<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        match self {
            Node::Sequence(node) => node.tick(ctx),
            Node::Selector(node) => node.tick(ctx),
            Node::Condition(node) => node.tick(ctx),
            Node::Action(node) => node.tick(ctx),
            Node::Inverter(node) => node.tick(ctx),
            Node::AlwaysSucceed(node) => node.tick(ctx),
        }
    }
}
