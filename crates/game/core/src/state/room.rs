use std::collections::BTreeSet;

use bitflags::bitflags;

use super::{Enemy, Item, RoomId, Trap, TrapKind};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RoomKind {
    Entrance,
    Normal,
    Treasure,
    Boss,
}

bitflags! {
    /// Sticky room markers. Once set, never cleared.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RoomFlags: u8 {
        const VISITED = 1 << 0;
        const ALTERED = 1 << 1;
    }
}

/// One entry per trap sprung by [`Room::spring_traps`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SprungTrap {
    pub index: usize,
    pub kind: TrapKind,
    pub damage: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    id: RoomId,
    kind: RoomKind,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub traps: Vec<Trap>,
    connections: BTreeSet<RoomId>,
    flags: RoomFlags,
}

impl Room {
    pub fn new(id: RoomId, kind: RoomKind) -> Self {
        Self {
            id,
            kind,
            enemies: Vec::new(),
            items: Vec::new(),
            traps: Vec::new(),
            connections: BTreeSet::new(),
            flags: RoomFlags::empty(),
        }
    }

    pub fn with_enemy(mut self, enemy: Enemy) -> Self {
        self.enemies.push(enemy);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_trap(mut self, trap: Trap) -> Self {
        self.traps.push(trap);
        self
    }

    /// Declares one side of an edge. [`crate::Dungeon::from_rooms`] checks that
    /// the other side matches.
    pub fn with_connection(mut self, other: RoomId) -> Self {
        self.connections.insert(other);
        self
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    pub fn flags(&self) -> RoomFlags {
        self.flags
    }

    pub fn is_visited(&self) -> bool {
        self.flags.contains(RoomFlags::VISITED)
    }

    pub fn is_altered(&self) -> bool {
        self.flags.contains(RoomFlags::ALTERED)
    }

    pub fn connections(&self) -> &BTreeSet<RoomId> {
        &self.connections
    }

    pub fn is_connected_to(&self, other: RoomId) -> bool {
        self.connections.contains(&other)
    }

    /// Only the dungeon may wire rooms, so both sides stay in sync.
    pub(crate) fn link(&mut self, other: RoomId) -> bool {
        self.connections.insert(other)
    }

    pub(crate) fn mark_visited(&mut self) {
        self.flags.insert(RoomFlags::VISITED);
    }

    /// Returns true if the room was not altered before.
    pub(crate) fn mark_altered(&mut self) -> bool {
        let fresh = !self.is_altered();
        self.flags.insert(RoomFlags::ALTERED);
        fresh
    }

    pub fn has_living_enemies(&self) -> bool {
        self.enemies.iter().any(Enemy::is_alive)
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = (usize, &Enemy)> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.is_alive())
    }

    pub fn armed_traps(&self) -> impl Iterator<Item = (usize, &Trap)> {
        self.traps
            .iter()
            .enumerate()
            .filter(|(_, trap)| trap.is_armed())
    }

    /// Triggers every armed trap, in order.
    pub fn spring_traps(&mut self) -> Vec<SprungTrap> {
        self.traps
            .iter_mut()
            .enumerate()
            .filter_map(|(index, trap)| {
                trap.trigger().map(|damage| SprungTrap {
                    index,
                    kind: trap.kind,
                    damage,
                })
            })
            .collect()
    }
}
