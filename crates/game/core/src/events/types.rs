use crate::curse::{AdvancedPower, CurseActionKind, Synergy};
use crate::game::GamePhase;
use crate::state::{EnemyKind, ItemEffect, ItemQuality, RoomId, RoomKind, TrapKind};

/// Why the hero grew more suspicious.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SuspicionCause {
    MutatedFoe,
    TaintedLoot,
    SuspiciousRoom,
    Curse(CurseActionKind),
    Power(AdvancedPower),
}

/// Everything that can happen during a game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum GameEvent {
    HeroMoved {
        from: Option<RoomId>,
        to: RoomId,
    },
    RoomEntered {
        room: RoomId,
        room_kind: RoomKind,
        first_visit: bool,
    },
    TrapTriggered {
        room: RoomId,
        trap: usize,
        trap_kind: TrapKind,
        damage: i32,
        by_curse: bool,
    },
    HeroAttacked {
        room: RoomId,
        enemy: usize,
        enemy_kind: EnemyKind,
        damage: i32,
        enemy_health: i32,
    },
    HeroDamaged {
        room: Option<RoomId>,
        damage: i32,
        health: i32,
    },
    EnemyDied {
        room: RoomId,
        enemy: usize,
        enemy_kind: EnemyKind,
    },
    HeroDied {
        room: Option<RoomId>,
    },
    HeroLooted {
        room: RoomId,
        item: String,
        quality: ItemQuality,
        taken: bool,
        effect: Option<ItemEffect>,
    },
    HeroHealed {
        amount: i32,
        health: i32,
    },
    SuspicionIncreased {
        amount: u8,
        level: u8,
        cause: SuspicionCause,
    },
    RoomAltered {
        room: RoomId,
    },
    ItemCorrupted {
        room: RoomId,
        item: usize,
        quality: ItemQuality,
        value: i32,
    },
    EnemyMutated {
        room: RoomId,
        enemy: usize,
        enemy_kind: EnemyKind,
    },
    TrapPlaced {
        room: RoomId,
        trap: usize,
        trap_kind: TrapKind,
        damage: i32,
    },
    CurseActed {
        action: CurseActionKind,
        room: RoomId,
        cost: u32,
        energy_left: u32,
    },
    PowerUsed {
        power: AdvancedPower,
        room: Option<RoomId>,
        cost: u32,
        energy_left: u32,
    },
    HeroTeleported {
        from: Option<RoomId>,
        to: RoomId,
    },
    EnemySummoned {
        room: RoomId,
        enemy: usize,
        enemy_kind: EnemyKind,
    },
    DoomTriggered {
        damage: i32,
        health: i32,
    },
    SynergyTriggered {
        synergy: Synergy,
        energy_refund: u32,
    },
    GameEnded {
        phase: GamePhase,
    },
}

impl GameEvent {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::HeroMoved { .. } => EventKind::HeroMoved,
            Self::RoomEntered { .. } => EventKind::RoomEntered,
            Self::TrapTriggered { .. } => EventKind::TrapTriggered,
            Self::HeroAttacked { .. } => EventKind::HeroAttacked,
            Self::HeroDamaged { .. } => EventKind::HeroDamaged,
            Self::EnemyDied { .. } => EventKind::EnemyDied,
            Self::HeroDied { .. } => EventKind::HeroDied,
            Self::HeroLooted { .. } => EventKind::HeroLooted,
            Self::HeroHealed { .. } => EventKind::HeroHealed,
            Self::SuspicionIncreased { .. } => EventKind::SuspicionIncreased,
            Self::RoomAltered { .. } => EventKind::RoomAltered,
            Self::ItemCorrupted { .. } => EventKind::ItemCorrupted,
            Self::EnemyMutated { .. } => EventKind::EnemyMutated,
            Self::TrapPlaced { .. } => EventKind::TrapPlaced,
            Self::CurseActed { .. } => EventKind::CurseActed,
            Self::PowerUsed { .. } => EventKind::PowerUsed,
            Self::HeroTeleported { .. } => EventKind::HeroTeleported,
            Self::EnemySummoned { .. } => EventKind::EnemySummoned,
            Self::DoomTriggered { .. } => EventKind::DoomTriggered,
            Self::SynergyTriggered { .. } => EventKind::SynergyTriggered,
            Self::GameEnded { .. } => EventKind::GameEnded,
        }
    }
}

/// Discriminant of [`GameEvent`], used as a subscription filter.
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
    strum::EnumIter,
    strum::EnumCount,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    HeroMoved,
    RoomEntered,
    TrapTriggered,
    HeroAttacked,
    HeroDamaged,
    EnemyDied,
    HeroDied,
    HeroLooted,
    HeroHealed,
    SuspicionIncreased,
    RoomAltered,
    ItemCorrupted,
    EnemyMutated,
    TrapPlaced,
    CurseActed,
    PowerUsed,
    HeroTeleported,
    EnemySummoned,
    DoomTriggered,
    SynergyTriggered,
    GameEnded,
}

/// A published event, stamped with its turn and global sequence number.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRecord {
    pub sequence: u64,
    pub turn: u32,
    pub event: GameEvent,
}

impl EventRecord {
    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }
}
