//! The evaluation trait shared by every node.

use crate::Status;

/// Anything that can be ticked against a context `C`.
///
/// A tick runs to completion and reports a [`Status`]. Conditions only read
/// `ctx`; actions may change it.
pub trait Behavior<C>: Send + Sync {
    fn tick(&self, ctx: &mut C) -> Status;
}

impl<C, B: Behavior<C> + ?Sized> Behavior<C> for &B {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Condition;

    #[test]
    fn references_tick_like_the_node() {
        let even = Condition::new("even", |v: &u32| v % 2 == 0);
        let by_ref = &even;

        assert_eq!(by_ref.tick(&mut 4), Status::Success);
        assert_eq!(by_ref.tick(&mut 5), Status::Failure);
    }
}
