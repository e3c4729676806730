//! Deterministic rules of the cursed dungeon.
//!
//! `curse-core` owns the entity model, the dungeon generator, the hero's
//! behavior-tree controller, the curse controller, and the turn loop. All
//! state of one simulation lives in a [`Game`]; every random draw goes through
//! that game's [`RandomSource`], so the same seed and config always replay the
//! same event history.
pub mod config;
pub mod content;
pub mod curse;
pub mod dungeon;
pub mod error;
pub mod events;
pub mod game;
pub mod hero;
pub mod rng;
pub mod state;
pub mod world;

pub use config::{
    Difficulty, DifficultySettings, DifficultySetup, GameConfig, GeneratorConfig, HeroArchetype,
    HeroSetup, HeroTuning,
};
pub use content::{
    ContentCatalog, ContentPack, CursePowerTemplate, EnemyTemplate, ItemTemplate, MergeReport,
    TrapTemplate,
};
pub use curse::{
    AdvancedPower, AutoCurse, Curse, CurseActionKind, CurseCommand, CurseEffect, CurseOutcome,
    CurseStatus, CurseStep, PowerCommand, PowerEffect, PowerOutcome, PowerRejection, PowerTier,
    RejectReason, Rejection, Synergy, SynergyTracker, TurnStart,
};
pub use dungeon::{Dungeon, DungeonGenerator};
pub use error::{
    ConfigError, ErrorContext, ErrorSeverity, GameError, InvariantViolation, SimulationError,
};
pub use events::{
    EventBus, EventKind, EventRecord, GameEvent, PublishReport, Subscriber, SubscriberError,
    SubscriberFailure, SubscriptionId, SuspicionCause,
};
pub use game::{Game, GamePhase, GameSnapshot, GameSummary, RoomSummary, TickReport, TickResult};
pub use hero::{HeroAction, HeroAi};
pub use rng::{PcgRng, RandomSource};
pub use state::{
    Enemy, EnemyKind, Hero, HeroStats, Item, ItemEffect, ItemKind, ItemQuality, MAX_STAT, Room,
    RoomFlags, RoomId, RoomKind, Trap, TrapKind,
};
pub use world::World;
