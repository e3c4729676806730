//! Combos: fixed runs of consecutive curse actions that pay a bonus.
use std::collections::{BTreeMap, VecDeque};

use strum::IntoEnumIterator;

use super::{AdvancedPower, CurseActionKind};

/// One successful curse action, as the tracker sees it. Custom powers count
/// as their base action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CurseStep {
    Action(CurseActionKind),
    Power(AdvancedPower),
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
    strum::EnumIter,
    strum::EnumCount,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Synergy {
    /// Three corruptions in a row.
    CorruptionChain,
    /// Spawn, alter, trigger. Every armed trap hits half again as hard.
    TrapGauntlet,
    /// Two mutations, then a summon.
    MutationSurge,
    /// Freeze, mass corruption, doom. Doom strikes two turns sooner.
    DoomCombo,
}

impl Synergy {
    /// The steps that complete the combo, oldest first.
    pub const fn sequence(self) -> &'static [CurseStep] {
        use CurseActionKind::*;
        use CurseStep::{Action, Power};

        match self {
            Self::CorruptionChain => &[
                Action(CorruptLoot),
                Action(CorruptLoot),
                Action(CorruptLoot),
            ],
            Self::TrapGauntlet => &[Action(SpawnTrap), Action(AlterRoom), Action(TriggerTrap)],
            Self::MutationSurge => &[
                Action(MutateEnemy),
                Action(MutateEnemy),
                Power(AdvancedPower::Summon),
            ],
            Self::DoomCombo => &[
                Power(AdvancedPower::TimeFreeze),
                Power(AdvancedPower::MassCorruption),
                Power(AdvancedPower::Doom),
            ],
        }
    }

    /// Share of the curse's maximum energy refunded, in percent.
    pub const fn refund_percent(self) -> u32 {
        match self {
            Self::CorruptionChain => 20,
            Self::TrapGauntlet => 25,
            Self::MutationSurge => 15,
            Self::DoomCombo => 30,
        }
    }
}

/// Remembers the most recent steps and spots completed combos.
///
/// The steps of a completed combo are consumed, so one run of actions pays
/// out once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynergyTracker {
    recent: VecDeque<CurseStep>,
    capacity: usize,
    triggered: BTreeMap<Synergy, u32>,
}

impl SynergyTracker {
    pub const DEFAULT_HISTORY: usize = 10;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            recent: VecDeque::with_capacity(capacity),
            capacity,
            triggered: BTreeMap::new(),
        }
    }

    pub fn recent(&self) -> impl Iterator<Item = CurseStep> + '_ {
        self.recent.iter().copied()
    }

    /// Records a step and returns the combo it completed, if any. Combos are
    /// checked in declaration order.
    pub fn record(&mut self, step: CurseStep) -> Option<Synergy> {
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(step);

        for synergy in Synergy::iter() {
            let sequence = synergy.sequence();
            let found = self
                .recent
                .make_contiguous()
                .windows(sequence.len())
                .position(|window| window == sequence);
            if let Some(start) = found {
                self.recent.drain(start..start + sequence.len());
                *self.triggered.entry(synergy).or_default() += 1;
                return Some(synergy);
            }
        }
        None
    }

    /// How many leading steps of `synergy` the latest steps already match.
    pub fn progress(&self, synergy: Synergy) -> usize {
        let sequence = synergy.sequence();
        let longest = sequence.len().min(self.recent.len());
        (1..=longest)
            .rev()
            .find(|&matched| {
                self.recent
                    .iter()
                    .skip(self.recent.len() - matched)
                    .eq(sequence[..matched].iter())
            })
            .unwrap_or(0)
    }

    pub fn times_triggered(&self, synergy: Synergy) -> u32 {
        self.triggered.get(&synergy).copied().unwrap_or(0)
    }

    pub fn total_triggered(&self) -> u32 {
        self.triggered.values().sum()
    }
}

impl Default for SynergyTracker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HISTORY)
    }
}
