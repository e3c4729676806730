//! Built-in stat tables used when no custom content is drawn.

use crate::state::{EnemyKind, ItemKind};

/// `(kind, name, health, attack, defense)` for ordinary room enemies.
pub const VANILLA_ENEMIES: [(EnemyKind, &str, i32, i32, i32); 3] = [
    (EnemyKind::Goblin, "Goblin", 30, 8, 2),
    (EnemyKind::Orc, "Orc", 50, 12, 5),
    (EnemyKind::Skeleton, "Skeleton", 40, 10, 3),
];

pub const VANILLA_BOSS: (EnemyKind, &str, i32, i32, i32) =
    (EnemyKind::Dragon, "Ancient Dragon", 150, 25, 10);

/// `(kind, name, min value, max value)` for ordinary room loot.
pub const VANILLA_ITEMS: [(ItemKind, &str, i32, i32); 4] = [
    (ItemKind::Potion, "Health Potion", 20, 40),
    (ItemKind::Weapon, "Sword", 3, 8),
    (ItemKind::Armor, "Shield", 2, 5),
    (ItemKind::Treasure, "Gold Coins", 10, 50),
];

pub const TRAP_DAMAGE: (i32, i32) = (5, 15);

pub const TREASURE_GOLD: (i32, i32) = (50, 150);
pub const TREASURE_GOLD_PILES: (i32, i32) = (2, 4);
pub const TREASURE_WEAPON: (i32, i32) = (10, 20);
pub const TREASURE_ARMOR: (i32, i32) = (5, 10);

pub const BOSS_HOARD: (i32, i32) = (100, 200);
pub const BOSS_HOARD_PILES: usize = 3;
