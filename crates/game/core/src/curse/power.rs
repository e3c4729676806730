//! Advanced and ultimate powers: effects beyond the base actions, each with
//! its own cooldown.
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EnemyKind, RoomId};

use super::{RejectReason, Synergy};

/// Turns a doomed hero has left.
pub const DOOM_TURNS: u32 = 5;
/// Damage dealt when doom runs out.
pub const DOOM_DAMAGE: i32 = 75;
/// Turns a dark blessing lasts.
pub const BLESSING_TURNS: u32 = 5;
/// Longest freeze, raised by one while blessed.
pub const MAX_FREEZE_TURNS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PowerTier {
    Basic,
    Advanced,
    Ultimate,
}

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
pub enum AdvancedPower {
    Teleport,
    TimeFreeze,
    MassCorruption,
    Summon,
    Doom,
    DarkBlessing,
}

impl AdvancedPower {
    pub const fn cost(self) -> u32 {
        match self {
            Self::Teleport => 35,
            Self::TimeFreeze => 50,
            Self::MassCorruption => 45,
            Self::Summon => 30,
            Self::Doom => 80,
            Self::DarkBlessing => 100,
        }
    }

    pub const fn suspicion(self) -> u8 {
        match self {
            Self::Teleport => 40,
            Self::TimeFreeze => 30,
            Self::MassCorruption => 35,
            Self::Summon => 20,
            Self::Doom => 50,
            Self::DarkBlessing => 45,
        }
    }

    /// Turns that must pass before the power can be used again.
    pub const fn cooldown(self) -> u32 {
        match self {
            Self::Teleport => 5,
            Self::TimeFreeze => 6,
            Self::MassCorruption => 5,
            Self::Summon => 3,
            Self::Doom => 10,
            Self::DarkBlessing => 15,
        }
    }

    pub const fn tier(self) -> PowerTier {
        match self {
            Self::Doom | Self::DarkBlessing => PowerTier::Ultimate,
            _ => PowerTier::Advanced,
        }
    }
}

/// A request to use an advanced power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "power", rename_all = "snake_case"))]
pub enum PowerCommand {
    /// Moves the hero to a random other room.
    Teleport,
    /// Skips the hero's next `turns` decisions. Clamped to `1..=3`.
    TimeFreeze { turns: u32 },
    /// Corrupts every item in the room that is not cursed yet.
    MassCorruption { room: RoomId },
    /// Adds a fresh enemy of `kind` with vanilla stats.
    Summon { room: RoomId, kind: EnemyKind },
    /// Hits the hero hard once the countdown runs out.
    Doom,
    /// Cheaper, quieter, stronger curse actions for a few turns.
    DarkBlessing,
}

impl PowerCommand {
    pub const fn power(&self) -> AdvancedPower {
        match self {
            Self::Teleport => AdvancedPower::Teleport,
            Self::TimeFreeze { .. } => AdvancedPower::TimeFreeze,
            Self::MassCorruption { .. } => AdvancedPower::MassCorruption,
            Self::Summon { .. } => AdvancedPower::Summon,
            Self::Doom => AdvancedPower::Doom,
            Self::DarkBlessing => AdvancedPower::DarkBlessing,
        }
    }

    /// The targeted room, for powers that target one.
    pub const fn room(&self) -> Option<RoomId> {
        match self {
            Self::MassCorruption { room } | Self::Summon { room, .. } => Some(*room),
            _ => None,
        }
    }
}

/// What a successful power changed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "effect", rename_all = "snake_case"))]
pub enum PowerEffect {
    Teleported { from: Option<RoomId>, to: RoomId },
    Frozen { turns: u32 },
    LootCorrupted { items: usize },
    Summoned {
        enemy: usize,
        health: i32,
        attack: i32,
        defense: i32,
    },
    Doomed { countdown: u32 },
    Blessed { turns: u32 },
}

/// Receipt for a successful power.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerOutcome {
    pub power: AdvancedPower,
    pub room: Option<RoomId>,
    pub cost: u32,
    pub energy_left: u32,
    pub suspicion_added: u8,
    pub effect: PowerEffect,
    /// Combo completed by this power, if any.
    pub synergy: Option<Synergy>,
}

/// Lingering curse effects, counted in turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurseStatus {
    pub frozen_turns: u32,
    pub blessing_turns: u32,
    /// Turns until doom strikes, while the hero is doomed.
    pub doom_countdown: Option<u32>,
}

impl CurseStatus {
    pub fn is_hero_frozen(&self) -> bool {
        self.frozen_turns > 0
    }

    pub fn is_blessed(&self) -> bool {
        self.blessing_turns > 0
    }
}

/// Lingering effects resolved at the start of a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnStart {
    /// The hero loses this turn's decision.
    pub hero_frozen: bool,
    /// Damage doom dealt this turn.
    pub doom_damage: Option<i32>,
}

/// A refused power. Nothing changed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{power} rejected: {reason}")]
pub struct PowerRejection {
    pub power: AdvancedPower,
    pub reason: RejectReason,
}

impl PowerRejection {
    pub const fn new(power: AdvancedPower, reason: RejectReason) -> Self {
        Self { power, reason }
    }
}

impl GameError for PowerRejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        self.reason.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_doom_and_blessing_are_ultimate() {
        use strum::IntoEnumIterator;

        let ultimate: Vec<AdvancedPower> = AdvancedPower::iter()
            .filter(|power| power.tier() == PowerTier::Ultimate)
            .collect();
        assert_eq!(
            ultimate,
            vec![AdvancedPower::Doom, AdvancedPower::DarkBlessing]
        );
    }

    #[test]
    fn commands_name_their_power_and_room() {
        let summon = PowerCommand::Summon {
            room: RoomId(2),
            kind: EnemyKind::Orc,
        };
        assert_eq!(summon.power(), AdvancedPower::Summon);
        assert_eq!(summon.room(), Some(RoomId(2)));
        assert_eq!(PowerCommand::Doom.room(), None);
        assert_eq!(
            "time_freeze".parse::<AdvancedPower>().ok(),
            Some(AdvancedPower::TimeFreeze)
        );
    }
}
