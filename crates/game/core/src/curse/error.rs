use crate::error::{ErrorSeverity, GameError};
use crate::state::RoomId;

use super::CurseActionKind;

/// Why a curse action was refused. Nothing changed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectReason {
    #[error("insufficient energy: need {required}, have {available}")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("{0} does not exist")]
    UnknownRoom(RoomId),

    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no armed trap")]
    NoArmedTrap,

    #[error("trap {0} already triggered")]
    TrapAlreadyTriggered(usize),

    #[error("room already altered")]
    RoomAlreadyAltered,

    #[error("no items")]
    NoItems,

    #[error("item {0} is already cursed")]
    ItemAlreadyCursed(usize),

    #[error("no living, unmutated enemy")]
    NoMutableEnemy,

    #[error("enemy {0} is already mutated")]
    EnemyAlreadyMutated(usize),

    #[error("enemy {0} is dead")]
    EnemyDead(usize),

    #[error("unknown curse power '{0}'")]
    UnknownPower(String),

    #[error("on cooldown for {remaining} more turns")]
    OnCooldown { remaining: u32 },

    #[error("hero has not entered the dungeon")]
    HeroOutsideDungeon,

    #[error("no other room to teleport to")]
    NoTeleportTarget,

    #[error("every item is already cursed")]
    NothingToCorrupt,

    #[error("hero is already doomed")]
    AlreadyDoomed,

    #[error("hero is dead")]
    HeroDead,

    #[error("game is over")]
    GameFinished,
}

impl RejectReason {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InsufficientEnergy { .. } => "CURSE_INSUFFICIENT_ENERGY",
            Self::UnknownRoom(_) => "CURSE_UNKNOWN_ROOM",
            Self::IndexOutOfRange { .. } => "CURSE_INDEX_OUT_OF_RANGE",
            Self::NoArmedTrap => "CURSE_NO_ARMED_TRAP",
            Self::TrapAlreadyTriggered(_) => "CURSE_TRAP_ALREADY_TRIGGERED",
            Self::RoomAlreadyAltered => "CURSE_ROOM_ALREADY_ALTERED",
            Self::NoItems => "CURSE_NO_ITEMS",
            Self::ItemAlreadyCursed(_) => "CURSE_ITEM_ALREADY_CURSED",
            Self::NoMutableEnemy => "CURSE_NO_MUTABLE_ENEMY",
            Self::EnemyAlreadyMutated(_) => "CURSE_ENEMY_ALREADY_MUTATED",
            Self::EnemyDead(_) => "CURSE_ENEMY_DEAD",
            Self::UnknownPower(_) => "CURSE_UNKNOWN_POWER",
            Self::OnCooldown { .. } => "CURSE_ON_COOLDOWN",
            Self::HeroOutsideDungeon => "CURSE_HERO_OUTSIDE_DUNGEON",
            Self::NoTeleportTarget => "CURSE_NO_TELEPORT_TARGET",
            Self::NothingToCorrupt => "CURSE_NOTHING_TO_CORRUPT",
            Self::AlreadyDoomed => "CURSE_ALREADY_DOOMED",
            Self::HeroDead => "CURSE_HERO_DEAD",
            Self::GameFinished => "CURSE_GAME_FINISHED",
        }
    }
}

/// A refused curse action.
///
/// `action` is `None` only when the request named a power that does not exist.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("curse action rejected: {reason}")]
pub struct Rejection {
    pub action: Option<CurseActionKind>,
    pub reason: RejectReason,
}

impl Rejection {
    pub const fn new(action: CurseActionKind, reason: RejectReason) -> Self {
        Self {
            action: Some(action),
            reason,
        }
    }

    pub fn unknown_power(id: impl Into<String>) -> Self {
        Self {
            action: None,
            reason: RejectReason::UnknownPower(id.into()),
        }
    }
}

impl GameError for Rejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        self.reason.code()
    }
}
