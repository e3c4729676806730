//! Mutable state shared by the hero and the curse.

use crate::dungeon::Dungeon;
use crate::events::{EventBus, GameEvent, PublishReport, SuspicionCause};
use crate::rng::RandomSource;
use crate::state::Hero;

/// The hero, the dungeon, the event bus, and the game's single random source.
///
/// Both actors mutate the world through `&mut World`, so a curse action can
/// never interleave with a half-finished hero decision.
pub struct World {
    pub hero: Hero,
    pub dungeon: Dungeon,
    pub events: EventBus,
    rng: Box<dyn RandomSource>,
}

impl World {
    pub fn new(hero: Hero, dungeon: Dungeon, events: EventBus, rng: Box<dyn RandomSource>) -> Self {
        Self {
            hero,
            dungeon,
            events,
            rng,
        }
    }

    pub fn rng(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    pub fn publish(&mut self, event: GameEvent) -> PublishReport {
        self.events.publish(event)
    }

    /// Splits the world into disjoint borrows for the hero's decision context.
    pub(crate) fn parts(
        &mut self,
    ) -> (&mut Hero, &mut Dungeon, &mut EventBus, &mut dyn RandomSource) {
        (
            &mut self.hero,
            &mut self.dungeon,
            &mut self.events,
            self.rng.as_mut(),
        )
    }
}

/// Raises hero suspicion and publishes the change, if any.
pub(crate) fn raise_suspicion(
    hero: &mut Hero,
    events: &mut EventBus,
    amount: u8,
    cause: SuspicionCause,
) -> u8 {
    let added = hero.raise_suspicion(amount);
    if added > 0 {
        events.publish(GameEvent::SuspicionIncreased {
            amount: added,
            level: hero.suspicion(),
            cause,
        });
    }
    added
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("hero", &self.hero)
            .field("rooms", &self.dungeon.len())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
