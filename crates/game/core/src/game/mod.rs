//! The turn loop tying the hero, the curse, and the dungeon together.
//!
//! [`Game`] owns everything one simulation needs, including its random
//! source, so independent games never share state.
mod phase;
mod snapshot;

use tracing::{debug, info};

pub use phase::{GamePhase, TickReport, TickResult};
pub use snapshot::{GameSnapshot, GameSummary, RoomSummary};

use crate::config::GameConfig;
use crate::content::ContentCatalog;
use crate::curse::{
    AutoCurse, Curse, CurseCommand, CurseOutcome, PowerCommand, PowerOutcome, PowerRejection,
    RejectReason, Rejection,
};
use crate::dungeon::{Dungeon, DungeonGenerator};
use crate::error::{ConfigError, ErrorContext, InvariantViolation, SimulationError};
use crate::events::{EventBus, EventKind, GameEvent, Subscriber, SubscriptionId};
use crate::hero::{HeroAction, HeroAi};
use crate::rng::{PcgRng, RandomSource};
use crate::state::{Hero, RoomId, RoomKind};
use crate::world::World;

#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    phase: GamePhase,
    turn: u32,
    world: World,
    curse: Curse,
    hero_ai: HeroAi,
}

impl Game {
    /// Generates a dungeon from vanilla content, seeded from the config.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_content(config, &ContentCatalog::new())
    }

    /// Generates a dungeon that also draws from `catalog` and exposes its
    /// curse powers.
    pub fn with_content(config: GameConfig, catalog: &ContentCatalog) -> Result<Self, ConfigError> {
        let rng = Box::new(PcgRng::new(config.seed));
        Self::with_rng(config, catalog, rng)
    }

    /// Like [`Game::with_content`] with a caller-supplied random source.
    pub fn with_rng(
        config: GameConfig,
        catalog: &ContentCatalog,
        mut rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator =
            DungeonGenerator::new(&config.generator, catalog, config.difficulty_settings());
        let dungeon = generator.generate(config.room_count, rng.as_mut())?;
        let curse = Curse::from_settings(&config.difficulty_settings())
            .with_powers(catalog.curse_powers().clone());
        Ok(Self::assemble(config, dungeon, rng, curse))
    }

    /// Plays a hand-built dungeon. `room_count` is ignored.
    pub fn with_dungeon(config: GameConfig, dungeon: Dungeon) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = Box::new(PcgRng::new(config.seed));
        let curse = Curse::from_settings(&config.difficulty_settings());
        Ok(Self::assemble(config, dungeon, rng, curse))
    }

    fn assemble(
        config: GameConfig,
        dungeon: Dungeon,
        rng: Box<dyn RandomSource>,
        curse: Curse,
    ) -> Self {
        let hero = Hero::new(config.hero_name.clone(), config.hero_stats());
        let events = EventBus::with_capacity(config.history_capacity);
        info!(
            target: "core::game",
            rooms = dungeon.len(),
            seed = config.seed,
            hero_health = hero.health(),
            curse_energy = curse.energy(),
            "game created"
        );
        Self {
            hero_ai: HeroAi::new(config.hero_tuning),
            world: World::new(hero, dungeon, events, rng),
            curse,
            phase: GamePhase::Setup,
            turn: 0,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn hero(&self) -> &Hero {
        &self.world.hero
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.world.dungeon
    }

    pub fn events(&self) -> &EventBus {
        &self.world.events
    }

    pub fn curse(&self) -> &Curse {
        &self.curse
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        subscriber: impl Subscriber + 'static,
    ) -> SubscriptionId {
        self.world.events.subscribe(kind, subscriber)
    }

    pub fn subscribe_all(&mut self, subscriber: impl Subscriber + 'static) -> SubscriptionId {
        self.world.events.subscribe_all(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.world.events.unsubscribe(id)
    }

    /// Advances the game by one hero decision.
    pub fn tick(&mut self) -> Result<TickReport, SimulationError> {
        if self.phase.is_terminal() {
            return Err(SimulationError::Finished { turn: self.turn });
        }
        if self.phase == GamePhase::Setup {
            self.transition(GamePhase::Running);
        }

        self.turn += 1;
        self.world.events.set_turn(self.turn);
        if self.turn > self.config.max_turns {
            self.finish(GamePhase::TurnLimitReached);
            return Ok(self.report(TickResult::TurnLimit, HeroAction::Idle));
        }

        let start = self.curse.begin_turn(self.turn, &mut self.world);
        if start.doom_damage.is_some() && self.check_hero_death() {
            return Ok(self.report(TickResult::CurseVictory, HeroAction::Idle));
        }
        let action = if start.hero_frozen {
            debug!(target: "core::game", turn = self.turn, "hero frozen");
            HeroAction::Frozen
        } else {
            self.hero_ai.tick(&mut self.world)
        };
        match action {
            HeroAction::Stuck { room } => {
                return Err(InvariantViolation::HeroStuck {
                    room,
                    context: ErrorContext::new(self.turn).with_room(room),
                }
                .into());
            }
            HeroAction::Lost { room } => {
                return Err(InvariantViolation::MissingRoom {
                    room,
                    context: ErrorContext::new(self.turn).with_room(room),
                }
                .into());
            }
            _ => {}
        }

        let result = if self.check_hero_death() {
            TickResult::CurseVictory
        } else if self.boss_cleared() {
            self.finish(GamePhase::VictoryForHero);
            TickResult::HeroVictory
        } else {
            let gained = self.curse.regenerate();
            debug!(
                target: "core::game",
                turn = self.turn,
                gained,
                energy = self.curse.energy(),
                "curse regenerated"
            );
            TickResult::Continue
        };
        Ok(self.report(result, action))
    }

    /// Applies a curse action between ticks.
    pub fn invoke_curse(&mut self, command: CurseCommand) -> Result<CurseOutcome, Rejection> {
        if self.phase.is_terminal() {
            return Err(Rejection::new(command.action, RejectReason::GameFinished));
        }
        let outcome = self.curse.invoke(&mut self.world, command)?;
        self.check_hero_death();
        Ok(outcome)
    }

    /// Applies a custom curse power from the content catalogue.
    pub fn invoke_power(
        &mut self,
        id: &str,
        room: RoomId,
        index: Option<usize>,
    ) -> Result<CurseOutcome, Rejection> {
        if self.phase.is_terminal() {
            return Err(Rejection {
                action: self.curse.powers().get(id).map(|power| power.base),
                reason: RejectReason::GameFinished,
            });
        }
        let outcome = self.curse.invoke_power(&mut self.world, id, room, index)?;
        self.check_hero_death();
        Ok(outcome)
    }

    /// Uses an advanced curse power between ticks.
    pub fn invoke_advanced(
        &mut self,
        command: PowerCommand,
    ) -> Result<PowerOutcome, PowerRejection> {
        if self.phase.is_terminal() {
            return Err(PowerRejection::new(
                command.power(),
                RejectReason::GameFinished,
            ));
        }
        let outcome = self.curse.invoke_advanced(&mut self.world, command)?;
        self.check_hero_death();
        Ok(outcome)
    }

    /// Commands the curse could execute right now.
    pub fn available_curse_actions(&self) -> Vec<CurseCommand> {
        if self.phase.is_terminal() {
            return Vec::new();
        }
        self.curse.available_actions(&self.world)
    }

    /// Ticks until the game ends, letting `auto` act after each live turn.
    pub fn run_to_end(&mut self, auto: Option<&AutoCurse>) -> Result<GameSummary, SimulationError> {
        while !self.phase.is_terminal() {
            self.tick()?;
            if self.phase.is_terminal() {
                break;
            }
            let Some(auto) = auto else {
                continue;
            };
            if let Some(Err(rejection)) = auto.act(&mut self.curse, &mut self.world) {
                debug!(target: "core::game", turn = self.turn, %rejection, "auto curse rejected");
            }
            self.check_hero_death();
        }
        Ok(self.summary())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let hero = &self.world.hero;
        GameSnapshot {
            phase: self.phase,
            turn: self.turn,
            hero: hero.clone(),
            curse_energy: self.curse.energy(),
            max_curse_energy: self.curse.max_energy(),
            curse_status: self.curse.status(),
            room: hero
                .current_room()
                .and_then(|id| self.world.dungeon.room(id))
                .map(RoomSummary::from),
            recent_events: self.world.events.recent(self.config.snapshot_events),
        }
    }

    pub fn summary(&self) -> GameSummary {
        let hero = &self.world.hero;
        GameSummary {
            phase: self.phase,
            turns: self.turn,
            hero_alive: hero.is_alive(),
            hero_health: hero.health(),
            suspicion: hero.suspicion(),
            gold: hero.gold(),
            rooms_visited: hero.visited().len(),
            total_rooms: self.world.dungeon.len(),
            curse_actions: self.curse.actions_taken(),
            curse_energy: self.curse.energy(),
            synergies: self.curse.synergies().total_triggered(),
        }
    }

    /// Ends the game for the curse if the hero has fallen. Returns whether it
    /// did.
    fn check_hero_death(&mut self) -> bool {
        if self.world.hero.is_alive() || self.phase.is_terminal() {
            return false;
        }
        let room = self.world.hero.current_room();
        self.world.publish(GameEvent::HeroDied { room });
        self.finish(GamePhase::VictoryForCurse);
        true
    }

    fn boss_cleared(&self) -> bool {
        let Some(current) = self.world.hero.current_room() else {
            return false;
        };
        self.world
            .dungeon
            .room(current)
            .is_some_and(|room| room.kind() == RoomKind::Boss && !room.has_living_enemies())
    }

    fn finish(&mut self, phase: GamePhase) {
        self.transition(phase);
        self.world.publish(GameEvent::GameEnded { phase });
    }

    fn transition(&mut self, to: GamePhase) {
        info!(target: "core::game", from = %self.phase, %to, turn = self.turn, "phase transition");
        self.phase = to;
    }

    fn report(&self, result: TickResult, action: HeroAction) -> TickReport {
        TickReport {
            result,
            turn: self.turn,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curse::CurseActionKind;
    use crate::state::{Enemy, EnemyKind, HeroStats, Room};

    fn config() -> GameConfig {
        GameConfig::new().with_seed(11)
    }

    fn corridor(boss: Room) -> Dungeon {
        Dungeon::chain(vec![
            Room::new(RoomId(0), RoomKind::Entrance),
            Room::new(RoomId(1), RoomKind::Normal),
            boss,
        ])
        .unwrap()
    }

    #[test]
    fn first_tick_starts_the_game() {
        let mut game = Game::new(config()).unwrap();
        assert_eq!(game.phase(), GamePhase::Setup);
        let report = game.tick().unwrap();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(report.turn, 1);
        assert_eq!(report.result, TickResult::Continue);
        assert_eq!(game.hero().current_room(), Some(RoomId(0)));
    }

    #[test]
    fn turn_limit_ends_without_a_decision() {
        let mut game = Game::new(config().with_max_turns(2)).unwrap();
        game.tick().unwrap();
        game.tick().unwrap();
        let position = game.hero().current_room();

        let report = game.tick().unwrap();
        assert_eq!(report.result, TickResult::TurnLimit);
        assert_eq!(report.action, HeroAction::Idle);
        assert_eq!(game.hero().current_room(), position);
        assert_eq!(game.phase(), GamePhase::TurnLimitReached);
        assert_eq!(
            game.tick().unwrap_err(),
            SimulationError::Finished { turn: 3 }
        );
    }

    #[test]
    fn empty_boss_room_is_an_immediate_victory() {
        let mut game =
            Game::with_dungeon(config(), corridor(Room::new(RoomId(2), RoomKind::Boss))).unwrap();
        let results: Vec<TickResult> = (0..3).map(|_| game.tick().unwrap().result).collect();
        assert_eq!(
            results,
            vec![
                TickResult::Continue,
                TickResult::Continue,
                TickResult::HeroVictory
            ]
        );
        let ended = game.events().history_of(EventKind::GameEnded).count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn regeneration_only_on_continuing_turns() {
        let mut game =
            Game::with_dungeon(config(), corridor(Room::new(RoomId(2), RoomKind::Boss))).unwrap();
        game.invoke_curse(CurseCommand::new(CurseActionKind::SpawnTrap, RoomId(1)))
            .unwrap();
        assert_eq!(game.curse().energy(), 85);
        game.tick().unwrap();
        assert_eq!(game.curse().energy(), 90);
    }

    #[test]
    fn curse_is_rejected_after_the_end() {
        let mut game =
            Game::with_dungeon(config(), corridor(Room::new(RoomId(2), RoomKind::Boss))).unwrap();
        while !game.is_finished() {
            game.tick().unwrap();
        }
        let err = game
            .invoke_curse(CurseCommand::new(CurseActionKind::SpawnTrap, RoomId(1)))
            .unwrap_err();
        assert_eq!(err.reason, RejectReason::GameFinished);
        assert!(game.available_curse_actions().is_empty());
    }

    #[test]
    fn lethal_curse_trap_hands_victory_to_the_curse() {
        let config = config().with_hero_stats(HeroStats::new(5, 15, 5));
        let dragon = Enemy::new(EnemyKind::Dragon, "Dragon", 150, 25, 10);
        let mut game = Game::with_dungeon(
            config,
            corridor(Room::new(RoomId(2), RoomKind::Boss).with_enemy(dragon)),
        )
        .unwrap();
        game.tick().unwrap();
        game.invoke_curse(CurseCommand::new(CurseActionKind::SpawnTrap, RoomId(0)))
            .unwrap();
        game.invoke_curse(CurseCommand::new(CurseActionKind::TriggerTrap, RoomId(0)))
            .unwrap();

        assert_eq!(game.phase(), GamePhase::VictoryForCurse);
        assert_eq!(game.events().history_of(EventKind::HeroDied).count(), 1);
        assert!(game.tick().is_err());
    }

    #[test]
    fn stuck_hero_is_an_invariant_violation() {
        let dungeon = Dungeon::from_rooms(vec![Room::new(RoomId(0), RoomKind::Entrance)]).unwrap();
        let mut game = Game::with_dungeon(config(), dungeon).unwrap();
        game.tick().unwrap();
        let err = game.tick().unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Invariant(InvariantViolation::HeroStuck {
                room: RoomId(0),
                ..
            })
        ));
    }

    #[test]
    fn snapshot_shows_the_current_room() {
        let mut game = Game::new(config()).unwrap();
        assert!(game.snapshot().room.is_none());
        game.tick().unwrap();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Running);
        assert_eq!(snapshot.room.map(|room| room.id), Some(RoomId(0)));
        assert!(!snapshot.recent_events.is_empty());
        assert_eq!(snapshot.curse_energy, 100);
    }

    #[test]
    fn run_to_end_always_terminates() {
        for seed in 0..10 {
            let mut game = Game::new(GameConfig::new().with_seed(seed)).unwrap();
            let summary = game.run_to_end(Some(&AutoCurse::default())).unwrap();
            assert!(summary.phase.is_terminal());
            assert!(summary.turns <= GameConfig::DEFAULT_MAX_TURNS + 1);
            assert!(summary.curse_energy <= game.curse().max_energy());
        }
    }

    #[test]
    fn a_frozen_hero_loses_turns() {
        let dragon = Enemy::new(EnemyKind::Dragon, "Dragon", 150, 25, 10);
        let mut game = Game::with_dungeon(
            config(),
            corridor(Room::new(RoomId(2), RoomKind::Boss).with_enemy(dragon)),
        )
        .unwrap();
        game.tick().unwrap();
        game.invoke_advanced(PowerCommand::TimeFreeze { turns: 2 }).unwrap();
        assert_eq!(game.snapshot().curse_status.frozen_turns, 2);

        assert_eq!(game.tick().unwrap().action, HeroAction::Frozen);
        assert_eq!(game.tick().unwrap().action, HeroAction::Frozen);
        assert_eq!(game.hero().current_room(), Some(RoomId(0)));
        assert!(matches!(
            game.tick().unwrap().action,
            HeroAction::Moved {
                to: RoomId(1),
                ..
            }
        ));
    }

    #[test]
    fn doom_can_end_the_game() {
        let mut rooms = vec![Room::new(RoomId(0), RoomKind::Entrance)];
        rooms.extend((1..7).map(|id| Room::new(RoomId(id), RoomKind::Normal)));
        rooms.push(
            Room::new(RoomId(7), RoomKind::Boss)
                .with_enemy(Enemy::new(EnemyKind::Dragon, "Dragon", 150, 25, 10)),
        );
        let config = config().with_hero_stats(HeroStats::new(60, 15, 5));
        let mut game = Game::with_dungeon(config, Dungeon::chain(rooms).unwrap()).unwrap();
        game.tick().unwrap();
        game.invoke_advanced(PowerCommand::Doom).unwrap();

        let results: Vec<TickResult> = (0..5).map(|_| game.tick().unwrap().result).collect();
        assert_eq!(results.last(), Some(&TickResult::CurseVictory));
        assert_eq!(results.len(), 5);
        assert_eq!(game.turn(), 6);
        assert_eq!(game.phase(), GamePhase::VictoryForCurse);
        assert_eq!(game.events().history_of(EventKind::DoomTriggered).count(), 1);

        let err = game.invoke_advanced(PowerCommand::DarkBlessing).unwrap_err();
        assert_eq!(err.reason, RejectReason::GameFinished);
    }
}
