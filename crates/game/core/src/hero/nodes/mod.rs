//! Leaf functions for the hero tree.
//!
//! Conditions take `&HeroContext` and never mutate. Actions take
//! `&mut HeroContext`, mutate the world, publish events, and record a
//! [`HeroAction`](super::HeroAction).
pub mod actions;
pub mod conditions;
