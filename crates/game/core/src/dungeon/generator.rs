use tracing::debug;

use super::Dungeon;
use super::tables::{
    BOSS_HOARD, BOSS_HOARD_PILES, TRAP_DAMAGE, TREASURE_ARMOR, TREASURE_GOLD, TREASURE_GOLD_PILES,
    TREASURE_WEAPON, VANILLA_BOSS, VANILLA_ENEMIES, VANILLA_ITEMS,
};
use crate::config::{DifficultySettings, GeneratorConfig};
use crate::content::ContentCatalog;
use crate::error::ConfigError;
use crate::rng::{RandomSource, pick};
use crate::state::{Enemy, Item, ItemKind, Room, RoomId, RoomKind, Trap, TrapKind, scale};

const TRAP_KINDS: [TrapKind; 4] = [
    TrapKind::Spike,
    TrapKind::Poison,
    TrapKind::Arrow,
    TrapKind::Fire,
];

/// Builds a dungeon from the generator tuning, the content catalogue, and the
/// difficulty multipliers.
///
/// Layout for `n` rooms: entrance, `n - 3` normal rooms, a treasure room, and
/// the boss room, wired as a chain plus random two-step shortcuts.
pub struct DungeonGenerator<'a> {
    config: &'a GeneratorConfig,
    catalog: &'a ContentCatalog,
    difficulty: DifficultySettings,
}

impl<'a> DungeonGenerator<'a> {
    pub fn new(
        config: &'a GeneratorConfig,
        catalog: &'a ContentCatalog,
        difficulty: DifficultySettings,
    ) -> Self {
        Self {
            config,
            catalog,
            difficulty,
        }
    }

    pub fn generate(
        &self,
        room_count: usize,
        rng: &mut dyn RandomSource,
    ) -> Result<Dungeon, ConfigError> {
        if room_count < 3 {
            return Err(ConfigError::InvalidRoomCount(room_count));
        }

        let mut rooms = Vec::with_capacity(room_count);
        rooms.push(Room::new(RoomId::ENTRANCE, RoomKind::Entrance));
        for index in 1..room_count - 2 {
            rooms.push(self.normal_room(RoomId::from(index), rng));
        }
        rooms.push(self.treasure_room(RoomId::from(room_count - 2), rng));
        rooms.push(self.boss_room(RoomId::from(room_count - 1), rng));

        let mut dungeon = Dungeon::from_generated(rooms);
        for index in 1..room_count {
            dungeon.connect(RoomId::from(index - 1), RoomId::from(index));
        }

        let max_shortcuts = self.config.max_shortcuts.unwrap_or(room_count);
        let mut shortcuts = 0;
        for index in 1..room_count.saturating_sub(3) {
            if shortcuts >= max_shortcuts {
                break;
            }
            let target = index + 2;
            if target < room_count - 1
                && rng.chance(self.config.shortcut_chance)
                && dungeon.connect(RoomId::from(index), RoomId::from(target))
            {
                shortcuts += 1;
            }
        }

        debug!(
            target: "core::dungeon",
            rooms = room_count,
            edges = dungeon.edge_count(),
            shortcuts,
            "generated dungeon"
        );
        Ok(dungeon)
    }

    fn normal_room(&self, id: RoomId, rng: &mut dyn RandomSource) -> Room {
        let mut room = Room::new(id, RoomKind::Normal);
        if rng.chance(self.config.enemy_chance) {
            let count = rng.range(1, 2);
            for _ in 0..count {
                room.enemies.push(self.enemy(rng, false));
            }
        }
        if rng.chance(self.config.item_chance) {
            let count = rng.range(1, 2);
            for _ in 0..count {
                room.items.push(self.item(rng));
            }
        }
        if rng.chance(self.config.trap_chance) {
            room.traps.push(self.trap(rng));
        }
        room
    }

    fn treasure_room(&self, id: RoomId, rng: &mut dyn RandomSource) -> Room {
        let mut room = Room::new(id, RoomKind::Treasure);
        for _ in 0..2 {
            room.enemies.push(self.enemy(rng, true));
        }
        let piles = rng.range(TREASURE_GOLD_PILES.0, TREASURE_GOLD_PILES.1);
        for _ in 0..piles {
            let value = rng.range(TREASURE_GOLD.0, TREASURE_GOLD.1);
            room.items
                .push(Item::new(ItemKind::Treasure, "Gold Pile", value));
        }
        let weapon = rng.range(TREASURE_WEAPON.0, TREASURE_WEAPON.1);
        room.items
            .push(Item::new(ItemKind::Weapon, "Enchanted Sword", weapon));
        let armor = rng.range(TREASURE_ARMOR.0, TREASURE_ARMOR.1);
        room.items
            .push(Item::new(ItemKind::Armor, "Dragon Scale Armor", armor));
        room
    }

    fn boss_room(&self, id: RoomId, rng: &mut dyn RandomSource) -> Room {
        let (kind, name, health, attack, defense) = VANILLA_BOSS;
        let boss = Enemy::new(
            kind,
            name,
            health,
            scale(attack, self.difficulty.enemy_damage),
            defense,
        );
        let mut room = Room::new(id, RoomKind::Boss).with_enemy(boss);
        for _ in 0..BOSS_HOARD_PILES {
            let value = rng.range(BOSS_HOARD.0, BOSS_HOARD.1);
            room.items
                .push(Item::new(ItemKind::Treasure, "Dragon Hoard", value));
        }
        room
    }

    fn enemy(&self, rng: &mut dyn RandomSource, strong: bool) -> Enemy {
        let custom = self.catalog.enemy_list();
        if !custom.is_empty()
            && rng.chance(self.config.custom_content_chance)
            && let Some(template) = pick(rng, &custom)
        {
            return template.spawn(self.difficulty.enemy_damage);
        }
        let table = if strong {
            &VANILLA_ENEMIES[1..]
        } else {
            &VANILLA_ENEMIES[..]
        };
        let (kind, name, health, attack, defense) = table[rng.index(table.len())];
        Enemy::new(
            kind,
            name,
            health,
            scale(attack, self.difficulty.enemy_damage),
            defense,
        )
    }

    fn item(&self, rng: &mut dyn RandomSource) -> Item {
        let custom = self.catalog.item_list();
        if !custom.is_empty()
            && rng.chance(self.config.custom_content_chance)
            && let Some(template) = pick(rng, &custom)
        {
            return template.create();
        }
        let (kind, name, min, max) = VANILLA_ITEMS[rng.index(VANILLA_ITEMS.len())];
        Item::new(kind, name, rng.range(min, max))
    }

    fn trap(&self, rng: &mut dyn RandomSource) -> Trap {
        let custom = self.catalog.trap_list();
        if !custom.is_empty()
            && rng.chance(self.config.custom_content_chance)
            && let Some(template) = pick(rng, &custom)
        {
            return template.arm(self.difficulty.trap_damage);
        }
        let damage = rng.range(TRAP_DAMAGE.0, TRAP_DAMAGE.1);
        Trap::new(
            random_trap_kind(rng),
            scale(damage, self.difficulty.trap_damage),
        )
    }
}

pub(crate) fn random_trap_kind(rng: &mut dyn RandomSource) -> TrapKind {
    TRAP_KINDS[rng.index(TRAP_KINDS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::content::{ContentPack, EnemyTemplate};
    use crate::rng::PcgRng;
    use crate::state::EnemyKind;

    fn generate(rooms: usize, seed: u64) -> Result<Dungeon, ConfigError> {
        let config = GeneratorConfig::default();
        let catalog = ContentCatalog::new();
        DungeonGenerator::new(&config, &catalog, Difficulty::Normal.settings())
            .generate(rooms, &mut PcgRng::new(seed))
    }

    #[test]
    fn too_few_rooms_is_a_config_error() {
        assert_eq!(generate(2, 0), Err(ConfigError::InvalidRoomCount(2)));
        assert_eq!(generate(0, 0), Err(ConfigError::InvalidRoomCount(0)));
    }

    #[test]
    fn layout_has_entrance_treasure_and_boss() {
        let dungeon = generate(10, 11).unwrap();
        assert_eq!(dungeon.len(), 10);

        let entrance = dungeon.room(RoomId(0)).unwrap();
        assert_eq!(entrance.kind(), RoomKind::Entrance);
        assert!(entrance.enemies.is_empty() && entrance.items.is_empty());
        assert!(entrance.traps.is_empty());

        for index in 1..8 {
            assert_eq!(dungeon.room(RoomId(index)).unwrap().kind(), RoomKind::Normal);
        }

        let treasure = dungeon.room(RoomId(8)).unwrap();
        assert_eq!(treasure.kind(), RoomKind::Treasure);
        assert_eq!(treasure.enemies.len(), 2);
        assert!(
            treasure
                .enemies
                .iter()
                .all(|e| matches!(e.kind(), EnemyKind::Orc | EnemyKind::Skeleton))
        );
        let gold = treasure
            .items
            .iter()
            .filter(|i| i.kind == ItemKind::Treasure)
            .count();
        assert!((2..=4).contains(&gold));
        assert_eq!(treasure.items.len(), gold + 2);

        let boss = dungeon.room(RoomId(9)).unwrap();
        assert_eq!(boss.kind(), RoomKind::Boss);
        assert_eq!(boss.enemies.len(), 1);
        assert_eq!(boss.enemies[0].kind(), EnemyKind::Dragon);
        assert_eq!(boss.enemies[0].health(), 150);
        assert_eq!(boss.items.len(), 3);
        assert!(boss.items.iter().all(|i| (100..=200).contains(&i.value)));
    }

    #[test]
    fn every_room_is_reachable_for_many_seeds() {
        for seed in 0..200 {
            for rooms in [3, 4, 5, 10, 25] {
                let dungeon = generate(rooms, seed).unwrap();
                assert!(dungeon.is_connected(), "seed {seed}, {rooms} rooms");
                assert!(dungeon.edge_count() >= rooms - 1);
            }
        }
    }

    #[test]
    fn shortcuts_skip_one_room_and_respect_the_cap() {
        let mut config = GeneratorConfig::default();
        config.shortcut_chance = 1.0;
        config.max_shortcuts = Some(2);
        let catalog = ContentCatalog::new();
        let dungeon = DungeonGenerator::new(&config, &catalog, Difficulty::Normal.settings())
            .generate(10, &mut PcgRng::new(5))
            .unwrap();

        assert_eq!(dungeon.edge_count(), 9 + 2);
        assert!(dungeon.room(RoomId(1)).unwrap().is_connected_to(RoomId(3)));
        assert!(dungeon.room(RoomId(2)).unwrap().is_connected_to(RoomId(4)));
        assert!(!dungeon.room(RoomId(3)).unwrap().is_connected_to(RoomId(5)));
    }

    #[test]
    fn same_seed_same_dungeon() {
        assert_eq!(generate(12, 99).unwrap(), generate(12, 99).unwrap());
    }

    #[test]
    fn custom_enemies_are_drawn() {
        let mut config = GeneratorConfig::default();
        config.enemy_chance = 1.0;
        config.custom_content_chance = 1.0;
        let catalog = ContentCatalog::from_pack(ContentPack {
            name: "test".into(),
            enemies: vec![(
                "wraith".into(),
                EnemyTemplate {
                    name: "Wraith".into(),
                    kind: EnemyKind::Skeleton,
                    health: 45,
                    attack: 11,
                    defense: 4,
                },
            )],
            ..ContentPack::default()
        })
        .unwrap();

        let dungeon = DungeonGenerator::new(&config, &catalog, Difficulty::Normal.settings())
            .generate(6, &mut PcgRng::new(1))
            .unwrap();
        let normal = dungeon.room(RoomId(1)).unwrap();
        assert!(!normal.enemies.is_empty());
        assert!(normal.enemies.iter().all(|e| e.name() == "Wraith"));
    }
}
