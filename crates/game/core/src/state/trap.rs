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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TrapKind {
    Spike,
    Poison,
    Arrow,
    Fire,
}

/// A one-shot trap. Once triggered it stays spent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trap {
    pub kind: TrapKind,
    pub damage: i32,
    triggered: bool,
}

impl Trap {
    pub fn new(kind: TrapKind, damage: i32) -> Self {
        Self {
            kind,
            damage,
            triggered: false,
        }
    }

    pub fn is_armed(&self) -> bool {
        !self.triggered
    }

    /// Springs the trap. Returns its damage, or `None` if it was already spent.
    pub fn trigger(&mut self) -> Option<i32> {
        if self.triggered {
            return None;
        }
        self.triggered = true;
        Some(self.damage)
    }
}
