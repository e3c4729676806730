use std::collections::BTreeSet;

use super::{Item, ItemKind, RoomId};

/// Suspicion ceiling.
pub const SUSPICION_MAX: u8 = 100;

/// Above this level the hero starts refusing tainted loot.
pub const SUSPICIOUS_THRESHOLD: u8 = 50;

/// Base combat statistics for a hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroStats {
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
}

impl HeroStats {
    pub const fn new(health: i32, attack: i32, defense: i32) -> Self {
        Self {
            health,
            attack,
            defense,
        }
    }
}

/// What picking up an item did to the hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Attack changed by the given amount (after clamping at zero).
    Attack(i32),
    /// Defense changed by the given amount (after clamping at zero).
    Defense(i32),
    /// Gold changed by the given amount (after clamping at zero).
    Gold(i32),
    /// A drinkable potion went into the pack.
    PotionStored,
    /// A cursed potion burned the hero on contact.
    CursedPotion { damage: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hero {
    name: String,
    health: i32,
    max_health: i32,
    attack: i32,
    defense: i32,
    gold: i32,
    inventory: Vec<Item>,
    current_room: Option<RoomId>,
    visited: BTreeSet<RoomId>,
    suspicion: u8,
}

impl Hero {
    pub fn new(name: impl Into<String>, stats: HeroStats) -> Self {
        let health = stats.health.max(1);
        Self {
            name: name.into(),
            health,
            max_health: health,
            attack: stats.attack.max(0),
            defense: stats.defense.max(0),
            gold: 0,
            inventory: Vec::new(),
            current_room: None,
            visited: BTreeSet::new(),
            suspicion: 0,
        }
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

    pub fn gold(&self) -> i32 {
        self.gold
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn current_room(&self) -> Option<RoomId> {
        self.current_room
    }

    pub fn visited(&self) -> &BTreeSet<RoomId> {
        &self.visited
    }

    pub fn has_visited(&self, room: RoomId) -> bool {
        self.visited.contains(&room)
    }

    pub fn suspicion(&self) -> u8 {
        self.suspicion
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Strictly above [`SUSPICIOUS_THRESHOLD`].
    pub fn is_suspicious(&self) -> bool {
        self.suspicion > SUSPICIOUS_THRESHOLD
    }

    /// True when health is strictly below `percent` of max health.
    pub fn health_below_percent(&self, percent: u8) -> bool {
        i64::from(self.health) * 100 < i64::from(self.max_health) * i64::from(percent)
    }

    /// Index of the first potion that is not cursed.
    pub fn first_usable_potion(&self) -> Option<usize> {
        self.inventory
            .iter()
            .position(|item| item.kind == ItemKind::Potion && !item.is_cursed())
    }

    /// Clamps at zero. Returns the damage actually absorbed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health - amount.max(0)).max(0);
        before - self.health
    }

    /// Clamps at max health. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
        self.health - before
    }

    /// Raises suspicion, saturating at [`SUSPICION_MAX`]. Returns the amount
    /// actually added. Suspicion never goes down.
    pub fn raise_suspicion(&mut self, amount: u8) -> u8 {
        let before = self.suspicion;
        self.suspicion = self.suspicion.saturating_add(amount).min(SUSPICION_MAX);
        self.suspicion - before
    }

    /// Moves into `room`. Returns true on the first visit.
    pub fn enter(&mut self, room: RoomId) -> bool {
        self.current_room = Some(room);
        self.visited.insert(room)
    }

    /// Removes and returns the inventory item at `index`.
    pub fn take_item(&mut self, index: usize) -> Option<Item> {
        if index < self.inventory.len() {
            Some(self.inventory.remove(index))
        } else {
            None
        }
    }

    /// Picks up `item`, applying its effect and adding it to the inventory.
    ///
    /// Weapons, armor, and treasure adjust attack, defense, and gold by their
    /// value. A cursed potion damages the hero by its magnitude but never
    /// below 1 health; any other potion is stored for later.
    pub fn acquire(&mut self, item: Item) -> ItemEffect {
        let effect = match item.kind {
            ItemKind::Weapon => {
                let before = self.attack;
                self.attack = self.attack.saturating_add(item.value).max(0);
                ItemEffect::Attack(self.attack - before)
            }
            ItemKind::Armor => {
                let before = self.defense;
                self.defense = self.defense.saturating_add(item.value).max(0);
                ItemEffect::Defense(self.defense - before)
            }
            ItemKind::Treasure => {
                let before = self.gold;
                self.gold = self.gold.saturating_add(item.value).max(0);
                ItemEffect::Gold(self.gold - before)
            }
            ItemKind::Potion if item.is_cursed() => {
                let before = self.health;
                self.health = self.health.saturating_add(item.value).max(1).min(before);
                ItemEffect::CursedPotion {
                    damage: before - self.health,
                }
            }
            ItemKind::Potion => ItemEffect::PotionStored,
        };
        self.inventory.push(item);
        effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ItemQuality;

    fn classic() -> Hero {
        Hero::new("Hero", HeroStats::new(100, 15, 5))
    }

    #[test]
    fn suspicion_saturates_and_never_drops() {
        let mut hero = classic();
        assert_eq!(hero.raise_suspicion(60), 60);
        assert!(hero.is_suspicious());
        assert_eq!(hero.raise_suspicion(60), 40);
        assert_eq!(hero.suspicion(), SUSPICION_MAX);
        assert_eq!(hero.raise_suspicion(5), 0);
    }

    #[test]
    fn suspicious_is_strictly_above_threshold() {
        let mut hero = classic();
        hero.raise_suspicion(SUSPICIOUS_THRESHOLD);
        assert!(!hero.is_suspicious());
        hero.raise_suspicion(1);
        assert!(hero.is_suspicious());
    }

    #[test]
    fn health_clamps_both_ways() {
        let mut hero = classic();
        assert_eq!(hero.take_damage(30), 30);
        assert_eq!(hero.heal(50), 30);
        assert_eq!(hero.health(), 100);
        assert_eq!(hero.take_damage(500), 100);
        assert!(!hero.is_alive());
    }

    #[test]
    fn oversized_items_saturate_instead_of_overflowing() {
        let mut hero = classic();
        hero.acquire(Item::new(ItemKind::Weapon, "Godslayer", i32::MAX));
        hero.acquire(Item::new(ItemKind::Treasure, "Dragon Hoard", i32::MAX));
        hero.acquire(Item::new(ItemKind::Treasure, "Second Hoard", i32::MAX));

        assert_eq!(hero.attack(), i32::MAX);
        assert_eq!(hero.gold(), i32::MAX);
        assert_eq!(hero.heal(i32::MAX), 0);
        hero.take_damage(50);
        assert_eq!(hero.heal(i32::MAX), 50);
    }

    #[test]
    fn low_health_threshold_is_strict() {
        let mut hero = classic();
        hero.take_damage(70);
        assert!(!hero.health_below_percent(30));
        hero.take_damage(1);
        assert!(hero.health_below_percent(30));
    }

    #[test]
    fn cursed_potion_never_kills() {
        let mut hero = classic();
        hero.take_damage(95);
        let mut potion = Item::new(ItemKind::Potion, "Health Potion", 20);
        potion.corrupt();
        potion.corrupt();
        assert_eq!(potion.quality(), ItemQuality::Cursed);

        let effect = hero.acquire(potion);
        assert_eq!(effect, ItemEffect::CursedPotion { damage: 4 });
        assert_eq!(hero.health(), 1);
        assert_eq!(hero.first_usable_potion(), None);
        assert_eq!(hero.inventory().len(), 1);
    }

    #[test]
    fn equipment_adjusts_stats_with_floor() {
        let mut hero = classic();
        assert_eq!(
            hero.acquire(Item::new(ItemKind::Weapon, "Sword", 5)),
            ItemEffect::Attack(5)
        );
        assert_eq!(hero.attack(), 20);

        let mut armor = Item::new(ItemKind::Armor, "Shield", 4);
        armor.corrupt();
        armor.corrupt();
        assert_eq!(hero.acquire(armor), ItemEffect::Defense(-2));
        assert_eq!(hero.defense(), 3);

        let mut coins = Item::new(ItemKind::Treasure, "Gold Coins", 40);
        coins.corrupt();
        coins.corrupt();
        assert_eq!(hero.acquire(coins), ItemEffect::Gold(0));
        assert_eq!(hero.gold(), 0);
    }

    #[test]
    fn entering_tracks_first_visits() {
        let mut hero = classic();
        assert!(hero.enter(RoomId::ENTRANCE));
        assert!(hero.enter(RoomId(1)));
        assert!(!hero.enter(RoomId::ENTRANCE));
        assert_eq!(hero.current_room(), Some(RoomId::ENTRANCE));
        assert_eq!(hero.visited().len(), 2);
    }
}
