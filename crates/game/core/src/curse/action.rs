use crate::state::{ItemQuality, RoomId, TrapKind};

use super::Synergy;

/// The five base curse actions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CurseActionKind {
    TriggerTrap,
    AlterRoom,
    CorruptLoot,
    MutateEnemy,
    SpawnTrap,
}

impl CurseActionKind {
    pub const fn cost(self) -> u32 {
        match self {
            Self::TriggerTrap => 5,
            Self::AlterRoom => 20,
            Self::CorruptLoot => 15,
            Self::MutateEnemy => 25,
            Self::SpawnTrap => 15,
        }
    }

    /// Suspicion the hero gains when this action succeeds.
    pub const fn suspicion(self) -> u8 {
        match self {
            Self::TriggerTrap => 2,
            Self::AlterRoom => 5,
            Self::CorruptLoot => 10,
            Self::MutateEnemy => 15,
            Self::SpawnTrap => 5,
        }
    }

    /// Whether the action addresses one entity in the room by index.
    pub const fn targets_entity(self) -> bool {
        matches!(
            self,
            Self::TriggerTrap | Self::CorruptLoot | Self::MutateEnemy
        )
    }
}

/// A request to act on one room. `index` picks a specific trap, item, or
/// enemy; `None` picks the first valid one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurseCommand {
    pub action: CurseActionKind,
    pub room: RoomId,
    pub index: Option<usize>,
}

impl CurseCommand {
    pub const fn new(action: CurseActionKind, room: RoomId) -> Self {
        Self {
            action,
            room,
            index: None,
        }
    }

    pub const fn at(action: CurseActionKind, room: RoomId, index: usize) -> Self {
        Self {
            action,
            room,
            index: Some(index),
        }
    }
}

/// What a successful curse action changed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "effect", rename_all = "snake_case"))]
pub enum CurseEffect {
    TrapTriggered {
        trap: usize,
        damage: i32,
        hero_hit: bool,
    },
    RoomAltered {
        trap: usize,
        trap_kind: TrapKind,
        damage: i32,
    },
    LootCorrupted {
        item: usize,
        quality: ItemQuality,
        value: i32,
    },
    EnemyMutated {
        enemy: usize,
        attack: i32,
        defense: i32,
        health: i32,
        max_health: i32,
    },
    TrapSpawned {
        trap: usize,
        trap_kind: TrapKind,
        damage: i32,
    },
}

/// Receipt for a successful curse action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurseOutcome {
    pub action: CurseActionKind,
    /// Custom power used, if any.
    pub power: Option<String>,
    pub room: RoomId,
    pub cost: u32,
    pub energy_left: u32,
    /// Suspicion actually added (less than the nominal amount near the cap).
    pub suspicion_added: u8,
    pub effect: CurseEffect,
    /// Combo completed by this action, if any.
    pub synergy: Option<Synergy>,
}
