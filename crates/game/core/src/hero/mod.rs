//! Hero AI: a behavior tree over a borrowed view of the world.
//!
//! Each tick the tree is evaluated once in strict priority order: heal, fight,
//! loot, explore. The first branch that succeeds decides the turn.
mod context;
pub mod nodes;
mod tree;

use behavior_tree::Behavior;
use tracing::debug;

pub use context::{HeroAction, HeroContext};
pub use tree::hero_tree;

use crate::config::HeroTuning;
use crate::world::World;

/// Drives the hero one decision per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeroAi {
    tuning: HeroTuning,
}

impl HeroAi {
    pub fn new(tuning: HeroTuning) -> Self {
        Self { tuning }
    }

    /// Evaluates the tree once against `world`.
    ///
    /// A dead hero does nothing. A hero that cannot move reports
    /// [`HeroAction::Stuck`] and leaves the world untouched.
    pub fn tick(&self, world: &mut World) -> HeroAction {
        if !world.hero.is_alive() {
            return HeroAction::Idle;
        }
        let mut ctx = HeroContext::new(world, self.tuning);
        let status = hero_tree().tick(&mut ctx);
        let action = ctx.take_action().unwrap_or(HeroAction::Idle);
        debug!(target: "core::hero", ?status, ?action, "hero decision");
        action
    }
}
