//! Custom content: pure-data stat blocks keyed by identifier.
//!
//! A [`ContentPack`] is what one source (a RON file, usually) provides. Packs
//! are validated and merged into a [`ContentCatalog`]; the generator draws from
//! the catalogue and the curse controller exposes its powers.

use std::collections::BTreeMap;

use crate::curse::CurseActionKind;
use crate::error::ConfigError;
use crate::state::{
    Enemy, EnemyKind, Item, ItemKind, MAX_STAT, SUSPICION_MAX, Trap, TrapKind, scale,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub name: String,
    pub kind: EnemyKind,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
}

impl EnemyTemplate {
    /// Instantiates the enemy with attack scaled by `enemy_damage`.
    pub fn spawn(&self, enemy_damage: f64) -> Enemy {
        Enemy::new(
            self.kind,
            self.name.clone(),
            self.health,
            scale(self.attack, enemy_damage),
            self.defense,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub name: String,
    pub kind: ItemKind,
    pub value: i32,
}

impl ItemTemplate {
    pub fn create(&self) -> Item {
        Item::new(self.kind, self.name.clone(), self.value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrapTemplate {
    pub kind: TrapKind,
    pub damage: i32,
}

impl TrapTemplate {
    pub fn arm(&self, trap_damage: f64) -> Trap {
        Trap::new(self.kind, scale(self.damage, trap_damage))
    }
}

/// A named variant of a base curse action with its own price and suspicion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CursePowerTemplate {
    pub name: String,
    pub base: CurseActionKind,
    pub cost: u32,
    pub suspicion: u8,
    /// Turns before the power can be used again. Zero means every turn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
}

/// Content from one source, in load order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContentPack {
    pub name: String,
    pub enemies: Vec<(String, EnemyTemplate)>,
    pub items: Vec<(String, ItemTemplate)>,
    pub traps: Vec<(String, TrapTemplate)>,
    pub curse_powers: Vec<(String, CursePowerTemplate)>,
}

impl ContentPack {
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
            && self.items.is_empty()
            && self.traps.is_empty()
            && self.curse_powers.is_empty()
    }

    /// Checks every entry without touching any catalogue.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (id, enemy) in &self.enemies {
            check_id("enemy", id)?;
            if enemy.health <= 0 {
                return Err(malformed("enemy", id, "health must be positive"));
            }
            if enemy.attack < 0 || enemy.defense < 0 {
                return Err(malformed(
                    "enemy",
                    id,
                    "attack and defense must not be negative",
                ));
            }
            if [enemy.health, enemy.attack, enemy.defense]
                .iter()
                .any(|&stat| stat > MAX_STAT)
            {
                return Err(malformed("enemy", id, "stats must be at most 10000"));
            }
        }
        for (id, item) in &self.items {
            check_id("item", id)?;
            if item.value < 0 {
                return Err(malformed("item", id, "value must not be negative"));
            }
            if item.value > MAX_STAT {
                return Err(malformed("item", id, "value must be at most 10000"));
            }
        }
        for (id, trap) in &self.traps {
            check_id("trap", id)?;
            if trap.damage <= 0 {
                return Err(malformed("trap", id, "damage must be positive"));
            }
            if trap.damage > MAX_STAT {
                return Err(malformed("trap", id, "damage must be at most 10000"));
            }
        }
        for (id, power) in &self.curse_powers {
            check_id("curse_power", id)?;
            if power.cost == 0 {
                return Err(malformed("curse_power", id, "cost must be positive"));
            }
            if power.suspicion > SUSPICION_MAX {
                return Err(malformed(
                    "curse_power",
                    id,
                    "suspicion must be at most 100",
                ));
            }
        }
        Ok(())
    }
}

/// Counts from one [`ContentCatalog::merge`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added: usize,
    pub overridden: usize,
}

/// Merged, validated content available to a game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentCatalog {
    enemies: BTreeMap<String, EnemyTemplate>,
    items: BTreeMap<String, ItemTemplate>,
    traps: BTreeMap<String, TrapTemplate>,
    curse_powers: BTreeMap<String, CursePowerTemplate>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pack(pack: ContentPack) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        catalog.merge(pack)?;
        Ok(catalog)
    }

    /// Validates `pack` and merges it in. Nothing is merged if any entry is
    /// malformed. Identifiers already present are replaced, last load wins.
    pub fn merge(&mut self, pack: ContentPack) -> Result<MergeReport, ConfigError> {
        pack.validate()?;

        let mut report = MergeReport::default();
        let source = pack.name;
        insert_all(&mut self.enemies, "enemy", &source, pack.enemies, &mut report);
        insert_all(&mut self.items, "item", &source, pack.items, &mut report);
        insert_all(&mut self.traps, "trap", &source, pack.traps, &mut report);
        insert_all(
            &mut self.curse_powers,
            "curse_power",
            &source,
            pack.curse_powers,
            &mut report,
        );

        tracing::debug!(
            target: "content::catalog",
            source = %source,
            added = report.added,
            overridden = report.overridden,
            "merged content pack"
        );
        Ok(report)
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
            && self.items.is_empty()
            && self.traps.is_empty()
            && self.curse_powers.is_empty()
    }

    pub fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }

    pub fn item(&self, id: &str) -> Option<&ItemTemplate> {
        self.items.get(id)
    }

    pub fn trap(&self, id: &str) -> Option<&TrapTemplate> {
        self.traps.get(id)
    }

    pub fn curse_power(&self, id: &str) -> Option<&CursePowerTemplate> {
        self.curse_powers.get(id)
    }

    pub fn enemies(&self) -> impl Iterator<Item = (&str, &EnemyTemplate)> {
        self.enemies.iter().map(|(id, t)| (id.as_str(), t))
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, &ItemTemplate)> {
        self.items.iter().map(|(id, t)| (id.as_str(), t))
    }

    pub fn traps(&self) -> impl Iterator<Item = (&str, &TrapTemplate)> {
        self.traps.iter().map(|(id, t)| (id.as_str(), t))
    }

    pub fn curse_powers(&self) -> &BTreeMap<String, CursePowerTemplate> {
        &self.curse_powers
    }

    pub(crate) fn enemy_list(&self) -> Vec<&EnemyTemplate> {
        self.enemies.values().collect()
    }

    pub(crate) fn item_list(&self) -> Vec<&ItemTemplate> {
        self.items.values().collect()
    }

    pub(crate) fn trap_list(&self) -> Vec<&TrapTemplate> {
        self.traps.values().collect()
    }
}

fn insert_all<T>(
    map: &mut BTreeMap<String, T>,
    section: &'static str,
    source: &str,
    entries: Vec<(String, T)>,
    report: &mut MergeReport,
) {
    for (id, template) in entries {
        if map.insert(id.clone(), template).is_some() {
            tracing::warn!(
                target: "content::catalog",
                section,
                id = %id,
                source = %source,
                "duplicate content id, later definition wins"
            );
            report.overridden += 1;
        } else {
            report.added += 1;
        }
    }
}

fn check_id(section: &'static str, id: &str) -> Result<(), ConfigError> {
    if id.trim().is_empty() {
        Err(malformed(section, id, "identifier must not be empty"))
    } else {
        Ok(())
    }
}

fn malformed(section: &'static str, id: &str, reason: &str) -> ConfigError {
    ConfigError::MalformedContent {
        section,
        id: id.to_string(),
        reason: reason.to_string(),
    }
}
