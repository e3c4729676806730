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
pub enum EnemyKind {
    Goblin,
    Orc,
    Skeleton,
    Dragon,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    kind: EnemyKind,
    name: String,
    health: i32,
    max_health: i32,
    attack: i32,
    defense: i32,
    mutated: bool,
}

impl Enemy {
    pub fn new(
        kind: EnemyKind,
        name: impl Into<String>,
        health: i32,
        attack: i32,
        defense: i32,
    ) -> Self {
        let health = health.max(1);
        Self {
            kind,
            name: name.into(),
            health,
            max_health: health,
            attack: attack.max(0),
            defense: defense.max(0),
            mutated: false,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn attack(&self) -> i32 {
        self.attack
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    pub fn is_mutated(&self) -> bool {
        self.mutated
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies `amount` damage, clamping health at zero. Returns the damage
    /// actually absorbed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health - amount.max(0)).max(0);
        before - self.health
    }

    /// Empowers a living enemy once.
    ///
    /// Attack x1.5, defense x1.3, max health x1.4, and current health x1.4
    /// capped at the new max. All products are floored. Returns `false` when
    /// the enemy is dead or already mutated.
    pub fn mutate(&mut self) -> bool {
        if self.mutated || !self.is_alive() {
            return false;
        }
        self.attack = self.attack.saturating_mul(3) / 2;
        self.defense = self.defense.saturating_mul(13) / 10;
        self.max_health = self.max_health.saturating_mul(14) / 10;
        self.health = (self.health.saturating_mul(14) / 10).min(self.max_health);
        self.mutated = true;
        true
    }

    /// Attack and defense x1.25, floored.
    pub(crate) fn empower(&mut self) {
        self.attack = self.attack.saturating_mul(5) / 4;
        self.defense = self.defense.saturating_mul(5) / 4;
    }
}
