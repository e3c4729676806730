use std::path::PathBuf;

use curse_content::ContentFactory;
use curse_core::{AutoCurse, Difficulty, DifficultySetup, HeroArchetype, HeroSetup};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn shipped_config_loads() {
    let config = ContentFactory::new(data_dir())
        .load_config()
        .expect("sample config is valid");
    assert_eq!(config.room_count, 12);
    assert_eq!(config.hero, HeroSetup::Archetype(HeroArchetype::Paladin));
    assert_eq!(config.difficulty, DifficultySetup::Preset(Difficulty::Hard));
}

#[test]
fn shipped_content_merges() {
    let catalog = ContentFactory::new(data_dir())
        .load_catalog()
        .expect("sample content is valid");
    assert_eq!(catalog.enemies().count(), 3);
    assert_eq!(catalog.items().count(), 3);
    assert_eq!(catalog.traps().count(), 2);
    assert_eq!(catalog.curse_powers().len(), 3);
}

#[test]
fn shipped_data_plays_to_the_end() {
    let mut game = ContentFactory::new(data_dir())
        .build_game()
        .expect("sample data builds a game");
    let summary = game
        .run_to_end(Some(&AutoCurse::default()))
        .expect("game runs");
    assert!(summary.phase.is_terminal());
    assert_eq!(summary.total_rooms, 12);
}
