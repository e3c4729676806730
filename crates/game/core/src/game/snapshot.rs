//! Read-only views of a game for front ends and batch reports.

use crate::curse::CurseStatus;
use crate::events::EventRecord;
use crate::state::{Hero, Room, RoomId, RoomKind};

use super::GamePhase;

/// What an observer can see of one room.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomSummary {
    pub id: RoomId,
    pub kind: RoomKind,
    pub living_enemies: usize,
    pub items: usize,
    pub armed_traps: usize,
    pub altered: bool,
    pub exits: Vec<RoomId>,
}

impl From<&Room> for RoomSummary {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id(),
            kind: room.kind(),
            living_enemies: room.living_enemies().count(),
            items: room.items.len(),
            armed_traps: room.armed_traps().count(),
            altered: room.is_altered(),
            exits: room.connections().iter().copied().collect(),
        }
    }
}

/// Point-in-time state of a game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub turn: u32,
    pub hero: Hero,
    pub curse_energy: u32,
    pub max_curse_energy: u32,
    pub curse_status: CurseStatus,
    /// The hero's room, once they have entered the dungeon.
    pub room: Option<RoomSummary>,
    pub recent_events: Vec<EventRecord>,
}

/// Final tally of a game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSummary {
    pub phase: GamePhase,
    pub turns: u32,
    pub hero_alive: bool,
    pub hero_health: i32,
    pub suspicion: u8,
    pub gold: i32,
    pub rooms_visited: usize,
    pub total_rooms: usize,
    pub curse_actions: u32,
    pub curse_energy: u32,
    /// Combos the curse completed.
    pub synergies: u32,
}
