//! Game configuration and tunable parameters.
//!
//! Everything here is plain data with a `Default`, so a partially specified TOML
//! file (see `curse-content`) fills the gaps from the defaults. Call
//! [`GameConfig::validate`] before building a game; [`crate::Game::new`] does.

use crate::error::ConfigError;
use crate::state::{HeroStats, MAX_STAT, scale};

/// Preset hero builds.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HeroArchetype {
    #[default]
    Classic,
    Warrior,
    Rogue,
    Paladin,
    Mage,
    Berserker,
    Ranger,
}

impl HeroArchetype {
    pub const fn stats(self) -> HeroStats {
        match self {
            Self::Classic => HeroStats::new(100, 15, 5),
            Self::Warrior => HeroStats::new(120, 18, 10),
            Self::Rogue => HeroStats::new(80, 22, 4),
            Self::Paladin => HeroStats::new(100, 14, 12),
            Self::Mage => HeroStats::new(70, 25, 3),
            Self::Berserker => HeroStats::new(90, 20, 6),
            Self::Ranger => HeroStats::new(85, 16, 5),
        }
    }
}

/// Either a named archetype (`hero = "rogue"`) or explicit stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum HeroSetup {
    Archetype(HeroArchetype),
    Custom(HeroStats),
}

impl HeroSetup {
    pub const fn base_stats(self) -> HeroStats {
        match self {
            Self::Archetype(archetype) => archetype.stats(),
            Self::Custom(stats) => stats,
        }
    }
}

impl Default for HeroSetup {
    fn default() -> Self {
        Self::Archetype(HeroArchetype::default())
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Nightmare,
}

impl Difficulty {
    pub const fn settings(self) -> DifficultySettings {
        match self {
            Self::Easy => DifficultySettings {
                hero_health: 1.5,
                hero_attack: 1.2,
                enemy_damage: 0.8,
                trap_damage: 0.8,
                curse_energy_regen: 8,
                starting_curse_energy: 150,
                max_curse_energy: 150,
            },
            Self::Normal => DifficultySettings {
                hero_health: 1.0,
                hero_attack: 1.0,
                enemy_damage: 1.0,
                trap_damage: 1.0,
                curse_energy_regen: 5,
                starting_curse_energy: 100,
                max_curse_energy: 100,
            },
            Self::Hard => DifficultySettings {
                hero_health: 0.8,
                hero_attack: 0.9,
                enemy_damage: 1.3,
                trap_damage: 1.2,
                curse_energy_regen: 3,
                starting_curse_energy: 80,
                max_curse_energy: 100,
            },
            Self::Nightmare => DifficultySettings {
                hero_health: 0.6,
                hero_attack: 0.8,
                enemy_damage: 1.5,
                trap_damage: 1.5,
                curse_energy_regen: 2,
                starting_curse_energy: 50,
                max_curse_energy: 100,
            },
        }
    }
}

/// Multipliers and curse energy budget for one difficulty level.
///
/// Multipliers scale the hero's base stats and the generator's enemy attack
/// and trap damage. Products are floored.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultySettings {
    pub hero_health: f64,
    pub hero_attack: f64,
    pub enemy_damage: f64,
    pub trap_damage: f64,
    pub curse_energy_regen: u32,
    pub starting_curse_energy: u32,
    pub max_curse_energy: u32,
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Difficulty::default().settings()
    }
}

impl DifficultySettings {
    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("difficulty.hero_health", self.hero_health),
            ("difficulty.hero_attack", self.hero_attack),
            ("difficulty.enemy_damage", self.enemy_damage),
            ("difficulty.trap_damage", self.trap_damage),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("multiplier must be positive and finite, got {value}"),
                });
            }
        }
        if self.max_curse_energy == 0 {
            return Err(ConfigError::InvalidValue {
                field: "difficulty.max_curse_energy",
                reason: "must be greater than zero".into(),
            });
        }
        if self.starting_curse_energy > self.max_curse_energy {
            return Err(ConfigError::EnergyAboveMax {
                starting: self.starting_curse_energy,
                max: self.max_curse_energy,
            });
        }
        Ok(())
    }
}

/// Either a named preset (`difficulty = "hard"`) or explicit settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DifficultySetup {
    Preset(Difficulty),
    Custom(DifficultySettings),
}

impl DifficultySetup {
    pub const fn settings(self) -> DifficultySettings {
        match self {
            Self::Preset(difficulty) => difficulty.settings(),
            Self::Custom(settings) => settings,
        }
    }
}

impl Default for DifficultySetup {
    fn default() -> Self {
        Self::Preset(Difficulty::default())
    }
}

/// Dungeon generator probabilities.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    pub enemy_chance: f64,
    pub item_chance: f64,
    pub trap_chance: f64,
    pub shortcut_chance: f64,
    /// Upper bound on shortcut edges. `None` means the room count.
    pub max_shortcuts: Option<usize>,
    /// Chance that a random draw uses a custom catalogue entry, when any exist.
    pub custom_content_chance: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enemy_chance: 0.5,
            item_chance: 0.4,
            trap_chance: 0.3,
            shortcut_chance: 0.3,
            max_shortcuts: None,
            custom_content_chance: 0.3,
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("generator.enemy_chance", self.enemy_chance),
            ("generator.item_chance", self.item_chance),
            ("generator.trap_chance", self.trap_chance),
            ("generator.shortcut_chance", self.shortcut_chance),
            ("generator.custom_content_chance", self.custom_content_chance),
        ] {
            check_probability(field, value)?;
        }
        Ok(())
    }
}

/// Hero decision thresholds and suspicion increments.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeroTuning {
    /// Heal when health is strictly below this percentage of max.
    pub heal_below_percent: u8,
    pub mutated_foe_suspicion: u8,
    pub tainted_loot_suspicion: u8,
    pub suspicious_room_suspicion: u8,
    /// A room with more traps than this looks suspicious.
    pub suspicious_trap_count: usize,
    /// Chance that a suspicious hero walks away from tainted loot.
    pub loot_skip_chance: f64,
}

impl Default for HeroTuning {
    fn default() -> Self {
        Self {
            heal_below_percent: 30,
            mutated_foe_suspicion: 5,
            tainted_loot_suspicion: 5,
            suspicious_room_suspicion: 10,
            suspicious_trap_count: 2,
            loot_skip_chance: 0.5,
        }
    }
}

impl HeroTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.heal_below_percent > 100 {
            return Err(ConfigError::InvalidValue {
                field: "hero_tuning.heal_below_percent",
                reason: format!("must be at most 100, got {}", self.heal_below_percent),
            });
        }
        check_probability("hero_tuning.loot_skip_chance", self.loot_skip_chance)
    }
}

/// Top-level configuration for one game.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub room_count: usize,
    pub hero_name: String,
    pub hero: HeroSetup,
    pub difficulty: DifficultySetup,
    pub seed: u64,
    pub max_turns: u32,
    /// Number of events the bus retains.
    pub history_capacity: usize,
    /// Number of recent events included in a snapshot.
    pub snapshot_events: usize,
    pub generator: GeneratorConfig,
    pub hero_tuning: HeroTuning,
}

impl GameConfig {
    pub const DEFAULT_ROOM_COUNT: usize = 10;
    pub const MIN_ROOM_COUNT: usize = 3;
    pub const DEFAULT_MAX_TURNS: u32 = 200;
    pub const DEFAULT_HISTORY_CAPACITY: usize = 256;
    pub const DEFAULT_SNAPSHOT_EVENTS: usize = 20;

    pub fn new() -> Self {
        Self {
            room_count: Self::DEFAULT_ROOM_COUNT,
            hero_name: "Hero".into(),
            hero: HeroSetup::default(),
            difficulty: DifficultySetup::default(),
            seed: 0,
            max_turns: Self::DEFAULT_MAX_TURNS,
            history_capacity: Self::DEFAULT_HISTORY_CAPACITY,
            snapshot_events: Self::DEFAULT_SNAPSHOT_EVENTS,
            generator: GeneratorConfig::default(),
            hero_tuning: HeroTuning::default(),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_room_count(mut self, room_count: usize) -> Self {
        self.room_count = room_count;
        self
    }

    #[must_use]
    pub fn with_archetype(mut self, archetype: HeroArchetype) -> Self {
        self.hero = HeroSetup::Archetype(archetype);
        self
    }

    #[must_use]
    pub fn with_hero_stats(mut self, stats: HeroStats) -> Self {
        self.hero = HeroSetup::Custom(stats);
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = DifficultySetup::Preset(difficulty);
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn difficulty_settings(&self) -> DifficultySettings {
        self.difficulty.settings()
    }

    /// Base stats with the difficulty's hero multipliers applied.
    pub fn hero_stats(&self) -> HeroStats {
        let base = self.hero.base_stats();
        let settings = self.difficulty_settings();
        HeroStats {
            health: scale(base.health, settings.hero_health),
            attack: scale(base.attack, settings.hero_attack),
            defense: base.defense,
        }
    }

    /// Checks every field. The room count is checked by the generator, since a
    /// hand-built dungeon does not need one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.hero.base_stats();
        if base.health <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "hero.health",
                reason: format!("must be positive, got {}", base.health),
            });
        }
        if base.attack < 0 || base.defense < 0 {
            return Err(ConfigError::InvalidValue {
                field: "hero",
                reason: "attack and defense must not be negative".into(),
            });
        }
        if [base.health, base.attack, base.defense]
            .iter()
            .any(|&stat| stat > MAX_STAT)
        {
            return Err(ConfigError::InvalidValue {
                field: "hero",
                reason: format!("stats must be at most {MAX_STAT}"),
            });
        }
        if self.max_turns == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_turns",
                reason: "must be greater than zero".into(),
            });
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history_capacity",
                reason: "must be greater than zero".into(),
            });
        }
        self.difficulty_settings().validate()?;
        self.generator.validate()?;
        self.hero_tuning.validate()?;
        if self.hero_stats().health <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "difficulty.hero_health",
                reason: "scaled hero health rounds down to zero".into(),
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { field, value })
    }
}
