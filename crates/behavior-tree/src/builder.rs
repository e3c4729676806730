//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose
//! `Node::Sequence(Sequence::new(vec![...]))`, you can use shorter functions
//! like `sequence(vec![...])`.

use crate::{Action, AlwaysSucceed, Condition, Inverter, Node, Selector, Sequence, Status};

/// Creates a sequence node.
#[inline]
pub fn sequence<C>(children: Vec<Node<C>>) -> Node<C> {
    Node::Sequence(Sequence::new(children))
}

/// Creates a selector node.
#[inline]
pub fn selector<C>(children: Vec<Node<C>>) -> Node<C> {
    Node::Selector(Selector::new(children))
}

/// Creates a condition leaf.
#[inline]
pub fn condition<C>(
    name: &'static str,
    predicate: impl Fn(&C) -> bool + Send + Sync + 'static,
) -> Node<C> {
    Node::Condition(Condition::new(name, predicate))
}

/// Creates an action leaf.
#[inline]
pub fn action<C>(
    name: &'static str,
    effect: impl Fn(&mut C) -> Status + Send + Sync + 'static,
) -> Node<C> {
    Node::Action(Action::new(name, effect))
}

/// Creates an inverter node.
#[inline]
pub fn inverter<C>(child: Node<C>) -> Node<C> {
    Node::Inverter(Inverter::new(child))
}

/// Creates an always-succeed node.
#[inline]
pub fn always_succeed<C>(child: Node<C>) -> Node<C> {
    Node::AlwaysSucceed(AlwaysSucceed::new(child))
}
