//! Room graph and procedural generation.
mod generator;
mod tables;

use std::collections::{BTreeSet, VecDeque};

pub use generator::DungeonGenerator;
pub(crate) use generator::random_trap_kind;
pub use tables::{VANILLA_BOSS, VANILLA_ENEMIES, VANILLA_ITEMS};

use crate::error::ConfigError;
use crate::state::{Room, RoomId, RoomKind};

/// An undirected, connected graph of rooms. Room `i` has id `i`; room 0 is the
/// entrance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dungeon {
    rooms: Vec<Room>,
}

impl Dungeon {
    /// Accepts a hand-built layout.
    ///
    /// Ids must be dense and in order, room 0 must be the only entrance, every
    /// connection must point at an existing other room and be declared on both
    /// sides, and every room must be reachable from the entrance.
    pub fn from_rooms(rooms: Vec<Room>) -> Result<Self, ConfigError> {
        if rooms.is_empty() {
            return Err(ConfigError::MalformedDungeon("no rooms".into()));
        }
        for (index, room) in rooms.iter().enumerate() {
            if room.id() != RoomId::from(index) {
                return Err(ConfigError::MalformedDungeon(format!(
                    "room at position {index} has id {}",
                    room.id()
                )));
            }
            let is_entrance = room.kind() == RoomKind::Entrance;
            if is_entrance != room.id().is_entrance() {
                return Err(ConfigError::MalformedDungeon(format!(
                    "{} must {}be the entrance",
                    room.id(),
                    if is_entrance { "not " } else { "" }
                )));
            }
            for &other in room.connections() {
                if other == room.id() {
                    return Err(ConfigError::MalformedDungeon(format!(
                        "{} connects to itself",
                        room.id()
                    )));
                }
                let Some(peer) = rooms.get(other.index()) else {
                    return Err(ConfigError::MalformedDungeon(format!(
                        "{} connects to missing {other}",
                        room.id()
                    )));
                };
                if !peer.is_connected_to(room.id()) {
                    return Err(ConfigError::MalformedDungeon(format!(
                        "edge {} -> {other} is not symmetric",
                        room.id()
                    )));
                }
            }
        }

        let dungeon = Self { rooms };
        if !dungeon.is_connected() {
            return Err(ConfigError::MalformedDungeon(
                "not every room is reachable from the entrance".into(),
            ));
        }
        Ok(dungeon)
    }

    /// Wires `rooms` into a chain 0-1-...-n and validates the result.
    pub fn chain(mut rooms: Vec<Room>) -> Result<Self, ConfigError> {
        for index in 1..rooms.len() {
            let (prev, next) = (RoomId::from(index - 1), RoomId::from(index));
            rooms[index - 1].link(next);
            rooms[index].link(prev);
        }
        Self::from_rooms(rooms)
    }

    pub(crate) fn from_generated(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn entrance(&self) -> RoomId {
        RoomId::ENTRANCE
    }

    pub fn boss_room(&self) -> Option<RoomId> {
        self.rooms
            .iter()
            .find(|room| room.kind() == RoomKind::Boss)
            .map(Room::id)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.index())
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Room contents may change; ids and connections may not.
    pub(crate) fn rooms_mut(&mut self) -> impl Iterator<Item = &mut Room> {
        self.rooms.iter_mut()
    }

    /// Connected room ids in ascending order. Empty for an unknown room.
    pub fn neighbours(&self, id: RoomId) -> Vec<RoomId> {
        self.room(id)
            .map(|room| room.connections().iter().copied().collect())
            .unwrap_or_default()
    }

    /// Adds the undirected edge `a-b`. Returns false if either room is missing,
    /// the rooms are the same, or the edge already exists.
    pub(crate) fn connect(&mut self, a: RoomId, b: RoomId) -> bool {
        if a == b || a.index() >= self.rooms.len() || b.index() >= self.rooms.len() {
            return false;
        }
        let added = self.rooms[a.index()].link(b);
        self.rooms[b.index()].link(a);
        added
    }

    pub fn edge_count(&self) -> usize {
        self.rooms
            .iter()
            .map(|room| room.connections().len())
            .sum::<usize>()
            / 2
    }

    /// Breadth-first search from the entrance reaches every room.
    pub fn is_connected(&self) -> bool {
        if self.rooms.is_empty() {
            return false;
        }
        let mut seen = BTreeSet::from([RoomId::ENTRANCE]);
        let mut queue = VecDeque::from([RoomId::ENTRANCE]);
        while let Some(id) = queue.pop_front() {
            for &next in self.rooms[id.index()].connections() {
                if next.index() < self.rooms.len() && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen.len() == self.rooms.len()
    }
}
