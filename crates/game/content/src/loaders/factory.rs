//! Content factory for building games from a data directory.

use std::path::{Path, PathBuf};

use curse_core::{ContentCatalog, Game, GameConfig, MergeReport};

use crate::loaders::{ConfigLoader, ContentLoader, LoadResult};

/// Loads everything a game needs from one data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml        (optional, defaults otherwise)
/// └── content/           (optional, merged in file-name order)
///     ├── 10_crypt.ron
///     └── 20_hexes.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load and merge every pack under `content/`.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let mut catalog = ContentCatalog::new();
        self.load_catalog_into(&mut catalog)?;
        Ok(catalog)
    }

    /// Merge every pack under `content/` on top of `catalog`.
    pub fn load_catalog_into(&self, catalog: &mut ContentCatalog) -> LoadResult<MergeReport> {
        let dir = self.data_dir.join("content");
        if !dir.is_dir() {
            return Ok(MergeReport::default());
        }
        ContentLoader::merge_dir(catalog, &dir)
    }

    /// Build a ready-to-run game from the directory's config and content.
    pub fn build_game(&self) -> LoadResult<Game> {
        let config = self.load_config()?;
        let catalog = self.load_catalog()?;
        Ok(Game::with_content(config, &catalog)?)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_builds_a_default_game() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert!(factory.load_catalog().unwrap().is_empty());
        let game = factory.build_game().unwrap();
        assert_eq!(game.dungeon().len(), GameConfig::DEFAULT_ROOM_COUNT);
    }

    #[test]
    fn config_and_content_reach_the_game() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "room_count = 5\nseed = 8\n").unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();
        fs::write(
            dir.path().join("content").join("hexes.ron"),
            r#"(curse_powers: [("hex", (name: "Hex", base: spawn_trap, cost: 9, suspicion: 2))])"#,
        )
        .unwrap();

        let game = ContentFactory::new(dir.path()).build_game().unwrap();
        assert_eq!(game.dungeon().len(), 5);
        assert_eq!(game.config().seed, 8);
        assert!(game.curse().powers().contains_key("hex"));
    }

    #[test]
    fn room_count_below_minimum_fails_to_build() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "room_count = 2\n").unwrap();
        let err = ContentFactory::new(dir.path()).build_game().unwrap_err();
        assert!(err.to_string().contains("at least 3"), "{err}");
    }
}
