//! Game configuration loader.

use std::path::Path;

use curse_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a `GameConfig` from a TOML file.
    ///
    /// Missing fields take their defaults, so an empty file is the default
    /// configuration.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curse_core::{Difficulty, DifficultySetup, HeroArchetype, HeroSetup, HeroStats};
    use std::io::Write;

    #[test]
    fn empty_file_is_the_default_config() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn presets_and_tuning_are_read() {
        let config = ConfigLoader::parse(
            r#"
            room_count = 12
            seed = 99
            hero = "rogue"
            difficulty = "nightmare"

            [generator]
            shortcut_chance = 0.5
            max_shortcuts = 2

            [hero_tuning]
            loot_skip_chance = 0.75
            "#,
        )
        .unwrap();

        assert_eq!(config.room_count, 12);
        assert_eq!(config.seed, 99);
        assert_eq!(config.hero, HeroSetup::Archetype(HeroArchetype::Rogue));
        assert_eq!(
            config.difficulty,
            DifficultySetup::Preset(Difficulty::Nightmare)
        );
        assert_eq!(config.generator.max_shortcuts, Some(2));
        assert_eq!(config.generator.enemy_chance, 0.5);
        assert_eq!(config.hero_tuning.loot_skip_chance, 0.75);
    }

    #[test]
    fn explicit_stats_and_custom_difficulty() {
        let config = ConfigLoader::parse(
            r#"
            [hero]
            health = 140
            attack = 12
            defense = 9

            [difficulty]
            hero_health = 1.0
            hero_attack = 1.0
            enemy_damage = 2.0
            trap_damage = 1.0
            curse_energy_regen = 10
            starting_curse_energy = 40
            max_curse_energy = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.hero, HeroSetup::Custom(HeroStats::new(140, 12, 9)));
        let settings = config.difficulty_settings();
        assert_eq!(settings.max_curse_energy, 60);
        assert_eq!(settings.enemy_damage, 2.0);
    }

    #[test]
    fn invalid_values_are_rejected_with_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[generator]\ntrap_chance = 1.5").unwrap();

        let err = ConfigLoader::load(file.path()).unwrap_err().to_string();
        assert!(err.contains("trap_chance"), "{err}");
        assert!(err.contains(&file.path().display().to_string()), "{err}");
    }

    #[test]
    fn starting_energy_above_max_is_rejected() {
        let err = ConfigLoader::parse(
            r#"
            [difficulty]
            hero_health = 1.0
            hero_attack = 1.0
            enemy_damage = 1.0
            trap_damage = 1.0
            curse_energy_regen = 5
            starting_curse_energy = 150
            max_curse_energy = 100
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("150"), "{err}");
    }
}
