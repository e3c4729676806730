//! Blackboard for one hero decision.

use crate::config::HeroTuning;
use crate::dungeon::Dungeon;
use crate::events::{EventBus, GameEvent, SuspicionCause};
use crate::rng::RandomSource;
use crate::state::{Hero, Item, ItemEffect, Room, RoomId};
use crate::world::{World, raise_suspicion};

/// What the hero did this tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "action", rename_all = "snake_case"))]
pub enum HeroAction {
    Healed {
        item: String,
        amount: i32,
        health: i32,
    },
    Attacked {
        room: RoomId,
        enemy: usize,
        damage: i32,
        killed: bool,
        counter_damage: Option<i32>,
    },
    Looted {
        room: RoomId,
        item: Item,
        effect: ItemEffect,
    },
    /// A suspicious hero walked away from tainted loot. The item is gone.
    LeftLoot {
        room: RoomId,
        item: Item,
    },
    Moved {
        from: Option<RoomId>,
        to: RoomId,
        traps_sprung: usize,
        trap_damage: i32,
    },
    /// The current room has no exits.
    Stuck {
        room: RoomId,
    },
    /// The hero refers to a room the dungeon does not have.
    Lost {
        room: RoomId,
    },
    /// A time freeze cost the hero this turn.
    Frozen,
    /// Nothing happened (the hero is dead).
    Idle,
}

/// Borrowed view of the world for the hero's behavior tree.
///
/// Conditions read it; actions mutate it and record the resulting
/// [`HeroAction`] with [`set_action`](Self::set_action).
pub struct HeroContext<'w> {
    pub hero: &'w mut Hero,
    pub dungeon: &'w mut Dungeon,
    pub events: &'w mut EventBus,
    pub rng: &'w mut dyn RandomSource,
    pub tuning: HeroTuning,
    action: Option<HeroAction>,
}

impl<'w> HeroContext<'w> {
    pub fn new(world: &'w mut World, tuning: HeroTuning) -> Self {
        let (hero, dungeon, events, rng) = world.parts();
        Self {
            hero,
            dungeon,
            events,
            rng,
            tuning,
            action: None,
        }
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.hero
            .current_room()
            .and_then(|id| self.dungeon.room(id))
    }

    pub fn publish(&mut self, event: GameEvent) {
        self.events.publish(event);
    }

    pub fn raise_suspicion(&mut self, amount: u8, cause: SuspicionCause) -> u8 {
        raise_suspicion(self.hero, self.events, amount, cause)
    }

    pub fn set_action(&mut self, action: HeroAction) {
        self.action = Some(action);
    }

    pub fn take_action(&mut self) -> Option<HeroAction> {
        self.action.take()
    }
}
