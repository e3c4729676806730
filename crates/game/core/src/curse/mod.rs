//! The curse: an energy-limited adversary that tampers with the dungeon.
//!
//! Every action is validated in full before anything changes. A rejected
//! action leaves energy, cooldowns, the dungeon, the hero, and the event
//! history exactly as they were.
mod action;
mod auto;
mod error;
mod power;
mod synergy;

use std::collections::BTreeMap;

use tracing::debug;

pub use action::{CurseActionKind, CurseCommand, CurseEffect, CurseOutcome};
pub use auto::AutoCurse;
pub use error::{RejectReason, Rejection};
pub use power::{
    AdvancedPower, BLESSING_TURNS, CurseStatus, DOOM_DAMAGE, DOOM_TURNS, MAX_FREEZE_TURNS,
    PowerCommand, PowerEffect, PowerOutcome, PowerRejection, PowerTier, TurnStart,
};
pub use synergy::{CurseStep, Synergy, SynergyTracker};

use crate::config::DifficultySettings;
use crate::content::CursePowerTemplate;
use crate::dungeon::{Dungeon, VANILLA_BOSS, VANILLA_ENEMIES, random_trap_kind};
use crate::events::{EventBus, GameEvent, SuspicionCause};
use crate::rng::RandomSource;
use crate::state::{Enemy, EnemyKind, Hero, Room, RoomId, Trap};
use crate::world::{World, raise_suspicion};

/// Damage range of the trap an alter adds.
const ALTER_TRAP_DAMAGE: (i32, i32) = (10, 30);
/// Damage range of a spawned trap.
const SPAWN_TRAP_DAMAGE: (i32, i32) = (15, 25);

/// Names a power for cooldown bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum CooldownKey {
    Advanced(AdvancedPower),
    Custom(String),
}

/// What an action costs, plus the id and cooldown of a custom power.
struct Pricing<'a> {
    cost: u32,
    suspicion: u8,
    custom: Option<(&'a str, u32)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curse {
    energy: u32,
    max_energy: u32,
    regen: u32,
    actions_taken: u32,
    turn: u32,
    powers: BTreeMap<String, CursePowerTemplate>,
    /// First turn each power may be used again.
    cooldowns: BTreeMap<CooldownKey, u32>,
    status: CurseStatus,
    synergies: SynergyTracker,
}

impl Curse {
    /// Starting energy is capped at `max_energy`.
    pub fn new(starting: u32, max_energy: u32, regen: u32) -> Self {
        Self {
            energy: starting.min(max_energy),
            max_energy,
            regen,
            actions_taken: 0,
            turn: 0,
            powers: BTreeMap::new(),
            cooldowns: BTreeMap::new(),
            status: CurseStatus::default(),
            synergies: SynergyTracker::default(),
        }
    }

    pub fn from_settings(settings: &DifficultySettings) -> Self {
        Self::new(
            settings.starting_curse_energy,
            settings.max_curse_energy,
            settings.curse_energy_regen,
        )
    }

    #[must_use]
    pub fn with_powers(mut self, powers: BTreeMap<String, CursePowerTemplate>) -> Self {
        self.powers = powers;
        self
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn max_energy(&self) -> u32 {
        self.max_energy
    }

    pub fn regen(&self) -> u32 {
        self.regen
    }

    pub fn actions_taken(&self) -> u32 {
        self.actions_taken
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn powers(&self) -> &BTreeMap<String, CursePowerTemplate> {
        &self.powers
    }

    pub fn status(&self) -> CurseStatus {
        self.status
    }

    pub fn synergies(&self) -> &SynergyTracker {
        &self.synergies
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.energy >= cost
    }

    /// What `cost` actually debits right now. A dark blessing takes a quarter
    /// off everything but ultimate powers.
    pub fn effective_cost(&self, cost: u32, tier: PowerTier) -> u32 {
        if self.status.is_blessed() && tier != PowerTier::Ultimate {
            (u64::from(cost) * 3 / 4) as u32
        } else {
            cost
        }
    }

    /// Suspicion an action adds right now. Halved while blessed.
    pub fn effective_suspicion(&self, suspicion: u8) -> u8 {
        if self.status.is_blessed() {
            suspicion / 2
        } else {
            suspicion
        }
    }

    /// Turns until an advanced power is ready. Zero when ready.
    pub fn power_cooldown(&self, power: AdvancedPower) -> u32 {
        self.cooldown_remaining(&CooldownKey::Advanced(power))
    }

    /// Turns until a custom power is ready. Zero when ready or unknown.
    pub fn custom_cooldown(&self, id: &str) -> u32 {
        self.cooldown_remaining(&CooldownKey::Custom(id.to_string()))
    }

    /// Adds one turn of regeneration, capped at max. Returns the gain.
    pub fn regenerate(&mut self) -> u32 {
        let before = self.energy;
        self.energy = self.energy.saturating_add(self.regen).min(self.max_energy);
        self.energy - before
    }

    /// Moves the curse's clock to `turn` and resolves lingering effects.
    ///
    /// A pending freeze costs the hero this turn's decision. Doom strikes when
    /// its countdown runs out.
    pub fn begin_turn(&mut self, turn: u32, world: &mut World) -> TurnStart {
        self.turn = turn;
        let hero_frozen = self.status.is_hero_frozen();
        self.status.frozen_turns = self.status.frozen_turns.saturating_sub(1);
        self.status.blessing_turns = self.status.blessing_turns.saturating_sub(1);

        let mut doom_damage = None;
        match self.status.doom_countdown {
            Some(countdown) if countdown <= 1 => {
                self.status.doom_countdown = None;
                let hero = &mut world.hero;
                let damage = hero.take_damage(DOOM_DAMAGE);
                let (room, health) = (hero.current_room(), hero.health());
                world.publish(GameEvent::DoomTriggered { damage, health });
                world.publish(GameEvent::HeroDamaged {
                    room,
                    damage,
                    health,
                });
                debug!(target: "core::curse", turn, damage, health, "doom struck");
                doom_damage = Some(damage);
            }
            Some(countdown) => self.status.doom_countdown = Some(countdown - 1),
            None => {}
        }
        TurnStart {
            hero_frozen,
            doom_damage,
        }
    }

    /// Executes a base action at its catalogue price.
    pub fn invoke(
        &mut self,
        world: &mut World,
        command: CurseCommand,
    ) -> Result<CurseOutcome, Rejection> {
        let action = command.action;
        let pricing = Pricing {
            cost: action.cost(),
            suspicion: action.suspicion(),
            custom: None,
        };
        self.execute(world, command, pricing)
    }

    /// Executes a custom power: its base action's effect at the power's price.
    pub fn invoke_power(
        &mut self,
        world: &mut World,
        id: &str,
        room: RoomId,
        index: Option<usize>,
    ) -> Result<CurseOutcome, Rejection> {
        let Some(power) = self.powers.get(id) else {
            return Err(Rejection::unknown_power(id));
        };
        let command = CurseCommand {
            action: power.base,
            room,
            index,
        };
        let pricing = Pricing {
            cost: power.cost,
            suspicion: power.suspicion,
            custom: Some((id, power.cooldown)),
        };
        self.execute(world, command, pricing)
    }

    /// Uses an advanced power. Energy is checked first, then the cooldown,
    /// then the power's own preconditions.
    pub fn invoke_advanced(
        &mut self,
        world: &mut World,
        command: PowerCommand,
    ) -> Result<PowerOutcome, PowerRejection> {
        let power = command.power();
        let reject = |reason| PowerRejection::new(power, reason);

        let cost = self.effective_cost(power.cost(), power.tier());
        if !self.can_afford(cost) {
            return Err(reject(RejectReason::InsufficientEnergy {
                required: cost,
                available: self.energy,
            }));
        }
        let remaining = self.power_cooldown(power);
        if remaining > 0 {
            return Err(reject(RejectReason::OnCooldown { remaining }));
        }
        let (hero, dungeon, events, rng) = world.parts();
        plan_power(command, hero, dungeon, &self.status).map_err(reject)?;

        self.energy -= cost;
        self.actions_taken += 1;
        self.start_cooldown(CooldownKey::Advanced(power), power.cooldown());
        let suspicion = self.effective_suspicion(power.suspicion());
        let effect = self.apply_power(command, hero, dungeon, events, rng);
        let suspicion_added =
            raise_suspicion(hero, events, suspicion, SuspicionCause::Power(power));
        events.publish(GameEvent::PowerUsed {
            power,
            room: command.room(),
            cost,
            energy_left: self.energy,
        });
        let synergy = self.record_step(CurseStep::Power(power), dungeon, events);

        debug!(
            target: "core::curse",
            %power,
            cost,
            energy = self.energy,
            suspicion_added,
            ?effect,
            ?synergy,
            "curse power used"
        );
        Ok(PowerOutcome {
            power,
            room: command.room(),
            cost,
            energy_left: self.energy,
            suspicion_added,
            effect,
            synergy,
        })
    }

    /// Every affordable, valid command in the hero's room and its neighbours.
    ///
    /// Entity-targeting actions are listed once per valid index.
    pub fn available_actions(&self, world: &World) -> Vec<CurseCommand> {
        let Some(current) = world.hero.current_room() else {
            return Vec::new();
        };
        let mut rooms = vec![current];
        rooms.extend(world.dungeon.neighbours(current));
        rooms.sort_unstable();
        rooms.dedup();

        let mut commands = Vec::new();
        for room_id in rooms {
            let Some(room) = world.dungeon.room(room_id) else {
                continue;
            };
            for action in <CurseActionKind as strum::IntoEnumIterator>::iter() {
                if !self.can_afford(self.effective_cost(action.cost(), PowerTier::Basic)) {
                    continue;
                }
                if action.targets_entity() {
                    let len = match action {
                        CurseActionKind::TriggerTrap => room.traps.len(),
                        CurseActionKind::CorruptLoot => room.items.len(),
                        _ => room.enemies.len(),
                    };
                    commands.extend(
                        (0..len)
                            .filter(|&index| plan(action, room, Some(index)).is_ok())
                            .map(|index| CurseCommand::at(action, room_id, index)),
                    );
                } else if plan(action, room, None).is_ok() {
                    commands.push(CurseCommand::new(action, room_id));
                }
            }
        }
        commands
    }

    fn execute(
        &mut self,
        world: &mut World,
        command: CurseCommand,
        pricing: Pricing<'_>,
    ) -> Result<CurseOutcome, Rejection> {
        let action = command.action;
        let reject = |reason| Rejection::new(action, reason);

        let cost = self.effective_cost(pricing.cost, PowerTier::Basic);
        if !self.can_afford(cost) {
            return Err(reject(RejectReason::InsufficientEnergy {
                required: cost,
                available: self.energy,
            }));
        }
        if let Some((id, _)) = pricing.custom {
            let remaining = self.custom_cooldown(id);
            if remaining > 0 {
                return Err(reject(RejectReason::OnCooldown { remaining }));
            }
        }
        let (hero, dungeon, events, rng) = world.parts();
        let Some(room) = dungeon.room_mut(command.room) else {
            return Err(reject(RejectReason::UnknownRoom(command.room)));
        };
        let target = plan(action, room, command.index).map_err(reject)?;

        self.energy -= cost;
        self.actions_taken += 1;
        if let Some((id, cooldown)) = pricing.custom {
            self.start_cooldown(CooldownKey::Custom(id.to_string()), cooldown);
        }
        let blessed = self.status.is_blessed();
        let suspicion = self.effective_suspicion(pricing.suspicion);
        let effect = apply(action, room, target, blessed, hero, events, rng);
        let suspicion_added =
            raise_suspicion(hero, events, suspicion, SuspicionCause::Curse(action));
        events.publish(GameEvent::CurseActed {
            action,
            room: command.room,
            cost,
            energy_left: self.energy,
        });
        let synergy = self.record_step(CurseStep::Action(action), dungeon, events);

        let power = pricing.custom.map(|(id, _)| id.to_string());
        debug!(
            target: "core::curse",
            %action,
            power = power.as_deref(),
            room = %command.room,
            cost,
            energy = self.energy,
            suspicion_added,
            ?effect,
            ?synergy,
            "curse acted"
        );
        Ok(CurseOutcome {
            action,
            power,
            room: command.room,
            cost,
            energy_left: self.energy,
            suspicion_added,
            effect,
            synergy,
        })
    }

    fn cooldown_remaining(&self, key: &CooldownKey) -> u32 {
        self.cooldowns
            .get(key)
            .map_or(0, |ready| ready.saturating_sub(self.turn))
    }

    fn start_cooldown(&mut self, key: CooldownKey, cooldown: u32) {
        if cooldown > 0 {
            self.cooldowns.insert(key, self.turn.saturating_add(cooldown));
        }
    }

    /// Feeds a successful step to the tracker and pays out a completed combo.
    fn record_step(
        &mut self,
        step: CurseStep,
        dungeon: &mut Dungeon,
        events: &mut EventBus,
    ) -> Option<Synergy> {
        let synergy = self.synergies.record(step)?;
        let percent = u64::from(synergy.refund_percent());
        let refund = (u64::from(self.max_energy) * percent / 100) as u32;
        let before = self.energy;
        self.energy = self.energy.saturating_add(refund).min(self.max_energy);
        let energy_refund = self.energy - before;

        match synergy {
            Synergy::TrapGauntlet => {
                for room in dungeon.rooms_mut() {
                    for trap in room.traps.iter_mut().filter(|trap| trap.is_armed()) {
                        trap.damage = trap.damage.saturating_mul(3) / 2;
                    }
                }
            }
            Synergy::DoomCombo => {
                if let Some(countdown) = self.status.doom_countdown.as_mut() {
                    *countdown = countdown.saturating_sub(2).max(1);
                }
            }
            Synergy::CorruptionChain | Synergy::MutationSurge => {}
        }
        events.publish(GameEvent::SynergyTriggered {
            synergy,
            energy_refund,
        });
        debug!(target: "core::curse", %synergy, energy_refund, "synergy triggered");
        Some(synergy)
    }

    fn apply_power(
        &mut self,
        command: PowerCommand,
        hero: &mut Hero,
        dungeon: &mut Dungeon,
        events: &mut EventBus,
        rng: &mut dyn RandomSource,
    ) -> PowerEffect {
        let blessed = self.status.is_blessed();
        match command {
            PowerCommand::Teleport => {
                let from = hero.current_room();
                let targets: Vec<RoomId> = dungeon
                    .rooms()
                    .iter()
                    .map(Room::id)
                    .filter(|id| Some(*id) != from)
                    .collect();
                let to = targets[rng.index(targets.len())];
                if let Some(room) = dungeon.room_mut(to) {
                    room.mark_visited();
                }
                hero.enter(to);
                events.publish(GameEvent::HeroTeleported { from, to });
                PowerEffect::Teleported { from, to }
            }
            PowerCommand::TimeFreeze { turns } => {
                let mut turns = turns.clamp(1, MAX_FREEZE_TURNS);
                if blessed {
                    turns += 1;
                }
                self.status.frozen_turns = self.status.frozen_turns.max(turns);
                PowerEffect::Frozen {
                    turns: self.status.frozen_turns,
                }
            }
            PowerCommand::MassCorruption { room: room_id } => {
                let passes = if blessed { 2 } else { 1 };
                let mut items = 0;
                if let Some(room) = dungeon.room_mut(room_id) {
                    for (index, item) in room.items.iter_mut().enumerate() {
                        let mut changed = false;
                        for _ in 0..passes {
                            changed |= item.corrupt();
                        }
                        if changed {
                            items += 1;
                            events.publish(GameEvent::ItemCorrupted {
                                room: room_id,
                                item: index,
                                quality: item.quality(),
                                value: item.value,
                            });
                        }
                    }
                }
                PowerEffect::LootCorrupted { items }
            }
            PowerCommand::Summon {
                room: room_id,
                kind,
            } => {
                let enemy = summoned(kind, blessed);
                let (health, attack, defense) = (enemy.health(), enemy.attack(), enemy.defense());
                let mut index = 0;
                if let Some(room) = dungeon.room_mut(room_id) {
                    room.enemies.push(enemy);
                    index = room.enemies.len() - 1;
                    events.publish(GameEvent::EnemySummoned {
                        room: room_id,
                        enemy: index,
                        enemy_kind: kind,
                    });
                }
                PowerEffect::Summoned {
                    enemy: index,
                    health,
                    attack,
                    defense,
                }
            }
            PowerCommand::Doom => {
                self.status.doom_countdown = Some(DOOM_TURNS);
                PowerEffect::Doomed {
                    countdown: DOOM_TURNS,
                }
            }
            PowerCommand::DarkBlessing => {
                self.status.blessing_turns = BLESSING_TURNS;
                PowerEffect::Blessed {
                    turns: BLESSING_TURNS,
                }
            }
        }
    }
}

/// Checks preconditions and resolves the target index, without mutating.
fn plan(
    action: CurseActionKind,
    room: &Room,
    index: Option<usize>,
) -> Result<Option<usize>, RejectReason> {
    match action {
        CurseActionKind::TriggerTrap => match index {
            Some(index) => {
                let trap = room.traps.get(index).ok_or(RejectReason::IndexOutOfRange {
                    index,
                    len: room.traps.len(),
                })?;
                if trap.is_armed() {
                    Ok(Some(index))
                } else {
                    Err(RejectReason::TrapAlreadyTriggered(index))
                }
            }
            None => room
                .armed_traps()
                .next()
                .map(|(index, _)| Some(index))
                .ok_or(RejectReason::NoArmedTrap),
        },
        CurseActionKind::AlterRoom => {
            if room.is_altered() {
                Err(RejectReason::RoomAlreadyAltered)
            } else {
                Ok(None)
            }
        }
        CurseActionKind::CorruptLoot => {
            if room.items.is_empty() {
                return Err(RejectReason::NoItems);
            }
            let index = match index {
                Some(index) if index >= room.items.len() => {
                    return Err(RejectReason::IndexOutOfRange {
                        index,
                        len: room.items.len(),
                    });
                }
                Some(index) => index,
                None => room
                    .items
                    .iter()
                    .position(|item| !item.is_cursed())
                    .unwrap_or(0),
            };
            if room.items[index].is_cursed() {
                Err(RejectReason::ItemAlreadyCursed(index))
            } else {
                Ok(Some(index))
            }
        }
        CurseActionKind::MutateEnemy => match index {
            Some(index) => {
                let enemy = room.enemies.get(index).ok_or(RejectReason::IndexOutOfRange {
                    index,
                    len: room.enemies.len(),
                })?;
                if !enemy.is_alive() {
                    Err(RejectReason::EnemyDead(index))
                } else if enemy.is_mutated() {
                    Err(RejectReason::EnemyAlreadyMutated(index))
                } else {
                    Ok(Some(index))
                }
            }
            None => room
                .enemies
                .iter()
                .position(|enemy| enemy.is_alive() && !enemy.is_mutated())
                .map(Some)
                .ok_or(RejectReason::NoMutableEnemy),
        },
        CurseActionKind::SpawnTrap => Ok(None),
    }
}

/// Applies a planned action. Preconditions already hold. A blessing makes
/// mutations and spawned traps stronger.
fn apply(
    action: CurseActionKind,
    room: &mut Room,
    target: Option<usize>,
    blessed: bool,
    hero: &mut Hero,
    events: &mut EventBus,
    rng: &mut dyn RandomSource,
) -> CurseEffect {
    let room_id = room.id();
    let index = target.unwrap_or_default();
    match action {
        CurseActionKind::TriggerTrap => {
            let trap = &mut room.traps[index];
            let damage = trap.trigger().unwrap_or(0);
            let trap_kind = trap.kind;
            let hero_hit = hero.current_room() == Some(room_id);
            events.publish(GameEvent::TrapTriggered {
                room: room_id,
                trap: index,
                trap_kind,
                damage,
                by_curse: true,
            });
            if hero_hit {
                let taken = hero.take_damage(damage);
                events.publish(GameEvent::HeroDamaged {
                    room: Some(room_id),
                    damage: taken,
                    health: hero.health(),
                });
            }
            CurseEffect::TrapTriggered {
                trap: index,
                damage,
                hero_hit,
            }
        }
        CurseActionKind::AlterRoom => {
            room.mark_altered();
            let (trap, trap_kind, damage) = place_trap(room, rng, ALTER_TRAP_DAMAGE);
            events.publish(GameEvent::RoomAltered { room: room_id });
            events.publish(GameEvent::TrapPlaced {
                room: room_id,
                trap,
                trap_kind,
                damage,
            });
            CurseEffect::RoomAltered {
                trap,
                trap_kind,
                damage,
            }
        }
        CurseActionKind::CorruptLoot => {
            let item = &mut room.items[index];
            item.corrupt();
            let (quality, value) = (item.quality(), item.value);
            events.publish(GameEvent::ItemCorrupted {
                room: room_id,
                item: index,
                quality,
                value,
            });
            CurseEffect::LootCorrupted {
                item: index,
                quality,
                value,
            }
        }
        CurseActionKind::MutateEnemy => {
            let enemy = &mut room.enemies[index];
            enemy.mutate();
            if blessed {
                enemy.empower();
            }
            let effect = CurseEffect::EnemyMutated {
                enemy: index,
                attack: enemy.attack(),
                defense: enemy.defense(),
                health: enemy.health(),
                max_health: enemy.max_health(),
            };
            events.publish(GameEvent::EnemyMutated {
                room: room_id,
                enemy: index,
                enemy_kind: enemy.kind(),
            });
            effect
        }
        CurseActionKind::SpawnTrap => {
            let (trap, trap_kind, mut damage) = place_trap(room, rng, SPAWN_TRAP_DAMAGE);
            if blessed {
                damage = damage * 3 / 2;
                room.traps[trap].damage = damage;
            }
            events.publish(GameEvent::TrapPlaced {
                room: room_id,
                trap,
                trap_kind,
                damage,
            });
            CurseEffect::TrapSpawned {
                trap,
                trap_kind,
                damage,
            }
        }
    }
}

fn place_trap(
    room: &mut Room,
    rng: &mut dyn RandomSource,
    (min, max): (i32, i32),
) -> (usize, crate::state::TrapKind, i32) {
    let damage = rng.range(min, max);
    let kind = random_trap_kind(rng);
    room.traps.push(Trap::new(kind, damage));
    (room.traps.len() - 1, kind, damage)
}

/// Checks an advanced power's own preconditions, without mutating.
fn plan_power(
    command: PowerCommand,
    hero: &Hero,
    dungeon: &Dungeon,
    status: &CurseStatus,
) -> Result<(), RejectReason> {
    match command {
        PowerCommand::Teleport => {
            if hero.current_room().is_none() {
                Err(RejectReason::HeroOutsideDungeon)
            } else if dungeon.len() < 2 {
                Err(RejectReason::NoTeleportTarget)
            } else {
                Ok(())
            }
        }
        PowerCommand::MassCorruption { room } => {
            let room = dungeon.room(room).ok_or(RejectReason::UnknownRoom(room))?;
            if room.items.is_empty() {
                Err(RejectReason::NoItems)
            } else if room.items.iter().all(|item| item.is_cursed()) {
                Err(RejectReason::NothingToCorrupt)
            } else {
                Ok(())
            }
        }
        PowerCommand::Summon { room, .. } => dungeon
            .room(room)
            .map(|_| ())
            .ok_or(RejectReason::UnknownRoom(room)),
        PowerCommand::Doom => {
            if !hero.is_alive() {
                Err(RejectReason::HeroDead)
            } else if status.doom_countdown.is_some() {
                Err(RejectReason::AlreadyDoomed)
            } else {
                Ok(())
            }
        }
        PowerCommand::TimeFreeze { .. } | PowerCommand::DarkBlessing => Ok(()),
    }
}

/// A fresh enemy with vanilla stats. Blessed summons are tougher and hit
/// harder.
fn summoned(kind: EnemyKind, blessed: bool) -> Enemy {
    let (_, name, health, attack, defense) = VANILLA_ENEMIES
        .iter()
        .copied()
        .find(|(candidate, ..)| *candidate == kind)
        .unwrap_or(VANILLA_BOSS);
    let (health, attack) = if blessed {
        (health * 13 / 10, attack * 12 / 10)
    } else {
        (health, attack)
    };
    Enemy::new(kind, format!("Summoned {name}"), health, attack, defense)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dungeon;
    use crate::events::EventKind;
    use crate::rng::PcgRng;
    use crate::state::{
        Enemy, EnemyKind, HeroStats, Item, ItemKind, ItemQuality, RoomKind, TrapKind,
    };

    fn world() -> World {
        let rooms = vec![
            Room::new(RoomId(0), RoomKind::Entrance),
            Room::new(RoomId(1), RoomKind::Normal)
                .with_enemy(Enemy::new(EnemyKind::Orc, "Orc", 50, 12, 5))
                .with_item(Item::new(ItemKind::Potion, "Health Potion", 20))
                .with_trap(Trap::new(TrapKind::Spike, 8)),
            Room::new(RoomId(2), RoomKind::Boss),
        ];
        let mut world = World::new(
            Hero::new("Hero", HeroStats::new(100, 15, 5)),
            Dungeon::chain(rooms).unwrap(),
            EventBus::new(),
            Box::new(PcgRng::new(3)),
        );
        world.hero.enter(RoomId(0));
        world
    }

    fn room(world: &World, id: u32) -> &Room {
        world.dungeon.room(RoomId(id)).unwrap()
    }

    #[test]
    fn mutate_without_energy_changes_nothing() {
        let mut world = world();
        let mut curse = Curse::new(20, 100, 5);
        let before = room(&world, 1).clone();

        let err = curse
            .invoke(&mut world, CurseCommand::new(CurseActionKind::MutateEnemy, RoomId(1)))
            .unwrap_err();

        assert_eq!(
            err.reason,
            RejectReason::InsufficientEnergy {
                required: 25,
                available: 20
            }
        );
        assert_eq!(curse.energy(), 20);
        assert_eq!(curse.actions_taken(), 0);
        assert_eq!(room(&world, 1), &before);
        assert_eq!(world.hero.suspicion(), 0);
        assert_eq!(world.events.history_len(), 0);
    }

    #[test]
    fn corrupting_twice_curses_the_potion() {
        let mut world = world();
        let mut curse = Curse::new(100, 100, 5);
        let command = CurseCommand::new(CurseActionKind::CorruptLoot, RoomId(1));

        let first = curse.invoke(&mut world, command).unwrap();
        assert_eq!(
            first.effect,
            CurseEffect::LootCorrupted {
                item: 0,
                quality: ItemQuality::Corrupted,
                value: 10
            }
        );
        let second = curse.invoke(&mut world, command).unwrap();
        assert_eq!(
            second.effect,
            CurseEffect::LootCorrupted {
                item: 0,
                quality: ItemQuality::Cursed,
                value: -10
            }
        );
        assert_eq!(curse.energy(), 70);
        assert_eq!(world.hero.suspicion(), 20);

        let third = curse.invoke(&mut world, command).unwrap_err();
        assert_eq!(third.reason, RejectReason::ItemAlreadyCursed(0));
        assert_eq!(curse.energy(), 70);
    }

    #[test]
    fn success_publishes_effect_then_curse_acted() {
        let mut world = world();
        let mut curse = Curse::new(100, 100, 5);
        curse
            .invoke(&mut world, CurseCommand::new(CurseActionKind::MutateEnemy, RoomId(1)))
            .unwrap();

        let kinds: Vec<EventKind> = world.events.history().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::EnemyMutated,
                EventKind::SuspicionIncreased,
                EventKind::CurseActed
            ]
        );
        assert_eq!(curse.energy(), 75);
        assert!(room(&world, 1).enemies[0].is_mutated());

        let again = curse
            .invoke(&mut world, CurseCommand::at(CurseActionKind::MutateEnemy, RoomId(1), 0))
            .unwrap_err();
        assert_eq!(again.reason, RejectReason::EnemyAlreadyMutated(0));
    }

    #[test]
    fn triggering_hits_the_hero_only_in_the_same_room() {
        let mut world = world();
        let mut curse = Curse::new(100, 100, 5);
        let command = CurseCommand::new(CurseActionKind::TriggerTrap, RoomId(1));

        let outcome = curse.invoke(&mut world, command).unwrap();
        assert_eq!(
            outcome.effect,
            CurseEffect::TrapTriggered {
                trap: 0,
                damage: 8,
                hero_hit: false
            }
        );
        assert_eq!(world.hero.health(), 100);

        let second = curse.invoke(&mut world, command).unwrap_err();
        assert_eq!(second.reason, RejectReason::NoArmedTrap);
        let explicit = curse
            .invoke(&mut world, CurseCommand::at(CurseActionKind::TriggerTrap, RoomId(1), 0))
            .unwrap_err();
        assert_eq!(explicit.reason, RejectReason::TrapAlreadyTriggered(0));
    }

    #[test]
    fn trap_in_hero_room_damages_hero() {
        let mut world = world();
        world.hero.enter(RoomId(1));
        let mut curse = Curse::new(100, 100, 5);
        curse
            .invoke(&mut world, CurseCommand::new(CurseActionKind::TriggerTrap, RoomId(1)))
            .unwrap();
        assert_eq!(world.hero.health(), 92);
    }

    #[test]
    fn rooms_can_be_altered_once() {
        let mut world = world();
        let mut curse = Curse::new(100, 100, 5);
        let command = CurseCommand::new(CurseActionKind::AlterRoom, RoomId(2));

        let outcome = curse.invoke(&mut world, command).unwrap();
        let CurseEffect::RoomAltered { damage, .. } = outcome.effect else {
            panic!("unexpected effect {:?}", outcome.effect);
        };
        assert!((10..=30).contains(&damage));
        assert!(room(&world, 2).is_altered());
        assert_eq!(room(&world, 2).traps.len(), 1);

        let err = curse.invoke(&mut world, command).unwrap_err();
        assert_eq!(err.reason, RejectReason::RoomAlreadyAltered);
        assert_eq!(curse.energy(), 80);
    }

    #[test]
    fn spawned_traps_roll_fifteen_to_twenty_five() {
        let mut world = world();
        let mut curse = Curse::new(100, 100, 5);
        for _ in 0..6 {
            let outcome = curse
                .invoke(&mut world, CurseCommand::new(CurseActionKind::SpawnTrap, RoomId(0)))
                .unwrap();
            let CurseEffect::TrapSpawned { damage, .. } = outcome.effect else {
                panic!("unexpected effect {:?}", outcome.effect);
            };
            assert!((15..=25).contains(&damage));
        }
        assert_eq!(curse.energy(), 10);
        assert_eq!(room(&world, 0).traps.len(), 6);
    }

    #[test]
    fn unknown_rooms_and_indices_are_rejected() {
        let mut world = world();
        let mut curse = Curse::new(100, 100, 5);
        let err = curse
            .invoke(&mut world, CurseCommand::new(CurseActionKind::SpawnTrap, RoomId(9)))
            .unwrap_err();
        assert_eq!(err.reason, RejectReason::UnknownRoom(RoomId(9)));

        let err = curse
            .invoke(&mut world, CurseCommand::at(CurseActionKind::CorruptLoot, RoomId(1), 4))
            .unwrap_err();
        assert_eq!(err.reason, RejectReason::IndexOutOfRange { index: 4, len: 1 });
        assert_eq!(curse.energy(), 100);
    }

    #[test]
    fn regeneration_caps_at_max() {
        let mut curse = Curse::new(90, 100, 8);
        assert_eq!(curse.regenerate(), 8);
        assert_eq!(curse.regenerate(), 2);
        assert_eq!(curse.regenerate(), 0);
        assert_eq!(curse.energy(), 100);
    }

    #[test]
    fn custom_powers_reuse_base_effects_at_their_price() {
        let mut world = world();
        let powers = BTreeMap::from([(
            "blight".to_string(),
            CursePowerTemplate {
                name: "Blight".into(),
                base: CurseActionKind::CorruptLoot,
                cost: 40,
                suspicion: 1,
                cooldown: 0,
            },
        )]);
        let mut curse = Curse::new(100, 100, 5).with_powers(powers);

        let outcome = curse
            .invoke_power(&mut world, "blight", RoomId(1), None)
            .unwrap();
        assert_eq!(outcome.power.as_deref(), Some("blight"));
        assert_eq!(outcome.cost, 40);
        assert_eq!(curse.energy(), 60);
        assert_eq!(world.hero.suspicion(), 1);

        let err = curse
            .invoke_power(&mut world, "nope", RoomId(1), None)
            .unwrap_err();
        assert_eq!(err.reason, RejectReason::UnknownPower("nope".into()));
        assert_eq!(err.action, None);
    }

    #[test]
    fn available_actions_cover_hero_room_and_neighbours() {
        let world = world();
        let curse = Curse::new(100, 100, 5);
        let actions = curse.available_actions(&world);

        assert!(actions.contains(&CurseCommand::at(CurseActionKind::TriggerTrap, RoomId(1), 0)));
        assert!(actions.contains(&CurseCommand::at(CurseActionKind::MutateEnemy, RoomId(1), 0)));
        assert!(actions.contains(&CurseCommand::new(CurseActionKind::AlterRoom, RoomId(0))));
        assert!(actions.iter().all(|c| c.room != RoomId(2)));

        let broke = Curse::new(4, 100, 5);
        assert!(broke.available_actions(&world).is_empty());
    }

    fn stock_room_one(world: &mut World, items: Vec<Item>) {
        world.dungeon.room_mut(RoomId(1)).unwrap().items.extend(items);
    }

    #[test]
    fn advanced_powers_wait_out_their_cooldown() {
        let mut world = world();
        let mut curse = Curse::new(100, 100, 5);
        let summon = PowerCommand::Summon {
            room: RoomId(1),
            kind: EnemyKind::Goblin,
        };

        let outcome = curse.invoke_advanced(&mut world, summon).unwrap();
        assert_eq!(
            outcome.effect,
            PowerEffect::Summoned {
                enemy: 1,
                health: 30,
                attack: 8,
                defense: 2
            }
        );
        assert_eq!(room(&world, 1).enemies[1].name(), "Summoned Goblin");
        assert_eq!(curse.energy(), 70);
        assert_eq!(world.hero.suspicion(), 20);
        assert_eq!(curse.power_cooldown(AdvancedPower::Summon), 3);

        let before = room(&world, 1).clone();
        let history = world.events.history_len();
        let err = curse.invoke_advanced(&mut world, summon).unwrap_err();
        assert_eq!(err.reason, RejectReason::OnCooldown { remaining: 3 });
        assert_eq!(err.power, AdvancedPower::Summon);
        assert_eq!(curse.energy(), 70);
        assert_eq!(room(&world, 1), &before);
        assert_eq!(world.events.history_len(), history);

        for turn in 1..=3 {
            curse.begin_turn(turn, &mut world);
        }
        assert_eq!(curse.power_cooldown(AdvancedPower::Summon), 0);
        assert!(curse.invoke_advanced(&mut world, summon).is_ok());
    }

    #[test]
    fn energy_is_checked_before_cooldown_and_target() {
        let mut world = world();
        let mut curse = Curse::new(10, 100, 5);
        let err = curse
            .invoke_advanced(&mut world, PowerCommand::MassCorruption { room: RoomId(9) })
            .unwrap_err();
        assert_eq!(
            err.reason,
            RejectReason::InsufficientEnergy {
                required: 45,
                available: 10
            }
        );

        let mut curse = Curse::new(100, 100, 5);
        let err = curse
            .invoke_advanced(&mut world, PowerCommand::MassCorruption { room: RoomId(9) })
            .unwrap_err();
        assert_eq!(err.reason, RejectReason::UnknownRoom(RoomId(9)));
        assert_eq!(curse.energy(), 100);
        assert_eq!(curse.power_cooldown(AdvancedPower::MassCorruption), 0);
    }

    #[test]
    fn teleport_moves_the_hero_past_the_traps() {
        let mut world = world();
        world.hero = Hero::new("Hero", HeroStats::new(100, 15, 5));
        let mut curse = Curse::new(100, 100, 5);
        let err = curse
            .invoke_advanced(&mut world, PowerCommand::Teleport)
            .unwrap_err();
        assert_eq!(err.reason, RejectReason::HeroOutsideDungeon);

        world.hero.enter(RoomId(0));
        let outcome = curse
            .invoke_advanced(&mut world, PowerCommand::Teleport)
            .unwrap();
        let PowerEffect::Teleported { from, to } = outcome.effect else {
            panic!("unexpected effect {:?}", outcome.effect);
        };
        assert_eq!(from, Some(RoomId(0)));
        assert_ne!(to, RoomId(0));
        assert_eq!(world.hero.current_room(), Some(to));
        assert!(world.hero.has_visited(to));
        assert!(room(&world, 1).traps[0].is_armed());
        assert_eq!(world.hero.health(), 100);
        assert_eq!(world.hero.suspicion(), 40);
        assert_eq!(world.events.history_of(EventKind::HeroTeleported).count(), 1);
    }

    #[test]
    fn mass_corruption_skips_cursed_items() {
        let mut world = world();
        let mut cursed = Item::new(ItemKind::Treasure, "Gold Coins", 30);
        cursed.corrupt();
        cursed.corrupt();
        stock_room_one(
            &mut world,
            vec![cursed, Item::new(ItemKind::Weapon, "Sword", 6)],
        );
        let mut curse = Curse::new(100, 100, 5);

        let outcome = curse
            .invoke_advanced(&mut world, PowerCommand::MassCorruption { room: RoomId(1) })
            .unwrap();
        assert_eq!(outcome.effect, PowerEffect::LootCorrupted { items: 2 });
        let items = &room(&world, 1).items;
        assert_eq!((items[0].value, items[0].quality()), (10, ItemQuality::Corrupted));
        assert_eq!((items[1].value, items[1].quality()), (-15, ItemQuality::Cursed));
        assert_eq!((items[2].value, items[2].quality()), (3, ItemQuality::Corrupted));
        assert_eq!(world.events.history_of(EventKind::ItemCorrupted).count(), 2);

        let mut fresh = Curse::new(100, 100, 5);
        let err = fresh
            .invoke_advanced(&mut world, PowerCommand::MassCorruption { room: RoomId(0) })
            .unwrap_err();
        assert_eq!(err.reason, RejectReason::NoItems);
    }

    #[test]
    fn all_cursed_loot_cannot_be_mass_corrupted() {
        let mut world = world();
        let potion = &mut world.dungeon.room_mut(RoomId(1)).unwrap().items[0];
        potion.corrupt();
        potion.corrupt();
        let mut curse = Curse::new(100, 100, 5);

        let err = curse
            .invoke_advanced(&mut world, PowerCommand::MassCorruption { room: RoomId(1) })
            .unwrap_err();
        assert_eq!(err.reason, RejectReason::NothingToCorrupt);
        assert_eq!(curse.energy(), 100);
    }

    #[test]
    fn time_freeze_is_capped_at_three_turns() {
        let mut world = world();
        let mut curse = Curse::new(100, 100, 5);
        let outcome = curse
            .invoke_advanced(&mut world, PowerCommand::TimeFreeze { turns: 9 })
            .unwrap();
        assert_eq!(outcome.effect, PowerEffect::Frozen { turns: 3 });

        let frozen: Vec<bool> = (1..=4)
            .map(|turn| curse.begin_turn(turn, &mut world).hero_frozen)
            .collect();
        assert_eq!(frozen, vec![true, true, true, false]);
    }

    #[test]
    fn doom_strikes_when_the_countdown_ends() {
        let mut world = world();
        let mut curse = Curse::new(100, 100, 5);
        let outcome = curse
            .invoke_advanced(&mut world, PowerCommand::Doom)
            .unwrap();
        assert_eq!(outcome.effect, PowerEffect::Doomed { countdown: 5 });
        assert_eq!(world.hero.suspicion(), 50);
        let again = curse
            .invoke_advanced(&mut world, PowerCommand::Doom)
            .unwrap_err();
        assert_eq!(
            again.reason,
            RejectReason::InsufficientEnergy {
                required: 80,
                available: 20
            }
        );

        for turn in 1..=4 {
            assert_eq!(curse.begin_turn(turn, &mut world).doom_damage, None);
        }
        assert_eq!(curse.status().doom_countdown, Some(1));
        assert_eq!(curse.begin_turn(5, &mut world).doom_damage, Some(75));
        assert_eq!(world.hero.health(), 25);
        assert_eq!(curse.status().doom_countdown, None);
        assert_eq!(world.events.history_of(EventKind::DoomTriggered).count(), 1);
        assert_eq!(curse.begin_turn(6, &mut world).doom_damage, None);
    }

    #[test]
    fn dark_blessing_discounts_all_but_ultimates() {
        let mut world = world();
        let mut curse = Curse::new(200, 200, 5);
        curse
            .invoke_advanced(&mut world, PowerCommand::DarkBlessing)
            .unwrap();
        assert_eq!(curse.energy(), 100);
        assert_eq!(world.hero.suspicion(), 45);
        assert!(curse.status().is_blessed());

        let outcome = curse
            .invoke(&mut world, CurseCommand::new(CurseActionKind::MutateEnemy, RoomId(1)))
            .unwrap();
        assert_eq!(outcome.cost, 18);
        assert_eq!(outcome.suspicion_added, 7);
        assert_eq!(
            outcome.effect,
            CurseEffect::EnemyMutated {
                enemy: 0,
                attack: 22,
                defense: 7,
                health: 70,
                max_health: 70
            }
        );

        let doom = curse
            .invoke_advanced(&mut world, PowerCommand::Doom)
            .unwrap();
        assert_eq!(doom.cost, 80);
        assert_eq!(curse.energy(), 2);

        for turn in 1..=5 {
            curse.begin_turn(turn, &mut world);
        }
        assert!(!curse.status().is_blessed());
    }

    #[test]
    fn custom_power_cooldowns_count_turns() {
        let mut world = world();
        stock_room_one(&mut world, vec![Item::new(ItemKind::Weapon, "Sword", 6)]);
        let powers = BTreeMap::from([(
            "blight".to_string(),
            CursePowerTemplate {
                name: "Blight".into(),
                base: CurseActionKind::CorruptLoot,
                cost: 10,
                suspicion: 1,
                cooldown: 2,
            },
        )]);
        let mut curse = Curse::new(100, 100, 5).with_powers(powers);

        curse
            .invoke_power(&mut world, "blight", RoomId(1), None)
            .unwrap();
        let err = curse
            .invoke_power(&mut world, "blight", RoomId(1), None)
            .unwrap_err();
        assert_eq!(err.reason, RejectReason::OnCooldown { remaining: 2 });
        assert_eq!(curse.energy(), 90);

        curse.begin_turn(1, &mut world);
        assert_eq!(curse.custom_cooldown("blight"), 1);
        curse.begin_turn(2, &mut world);
        assert!(curse
            .invoke_power(&mut world, "blight", RoomId(1), None)
            .is_ok());
        assert_eq!(curse.custom_cooldown("nope"), 0);
    }

    #[test]
    fn three_corruptions_refund_energy() {
        let mut world = world();
        stock_room_one(&mut world, vec![Item::new(ItemKind::Weapon, "Sword", 6)]);
        let mut curse = Curse::new(100, 100, 5);
        let command = CurseCommand::new(CurseActionKind::CorruptLoot, RoomId(1));

        assert_eq!(curse.invoke(&mut world, command).unwrap().synergy, None);
        assert_eq!(curse.invoke(&mut world, command).unwrap().synergy, None);
        let third = curse.invoke(&mut world, command).unwrap();

        assert_eq!(third.synergy, Some(Synergy::CorruptionChain));
        assert_eq!(curse.energy(), 75);
        assert_eq!(curse.synergies().times_triggered(Synergy::CorruptionChain), 1);
        let refunds: Vec<&GameEvent> = world
            .events
            .history_of(EventKind::SynergyTriggered)
            .map(|record| &record.event)
            .collect();
        assert_eq!(
            refunds,
            vec![&GameEvent::SynergyTriggered {
                synergy: Synergy::CorruptionChain,
                energy_refund: 20
            }]
        );
    }

    #[test]
    fn trap_gauntlet_sharpens_armed_traps() {
        let mut world = world();
        let mut curse = Curse::new(100, 100, 5);

        let spawn = curse
            .invoke(&mut world, CurseCommand::new(CurseActionKind::SpawnTrap, RoomId(0)))
            .unwrap();
        let CurseEffect::TrapSpawned { damage: spawned, .. } = spawn.effect else {
            panic!("unexpected effect {:?}", spawn.effect);
        };
        let alter = curse
            .invoke(&mut world, CurseCommand::new(CurseActionKind::AlterRoom, RoomId(2)))
            .unwrap();
        let CurseEffect::RoomAltered { damage: altered, .. } = alter.effect else {
            panic!("unexpected effect {:?}", alter.effect);
        };
        let trigger = curse
            .invoke(&mut world, CurseCommand::new(CurseActionKind::TriggerTrap, RoomId(1)))
            .unwrap();

        assert_eq!(trigger.synergy, Some(Synergy::TrapGauntlet));
        assert_eq!(room(&world, 0).traps[0].damage, spawned * 3 / 2);
        assert_eq!(room(&world, 2).traps[0].damage, altered * 3 / 2);
        assert_eq!(room(&world, 1).traps[0].damage, 8);
        assert_eq!(curse.energy(), 85);
    }

    #[test]
    fn doom_combo_brings_doom_closer() {
        let mut world = world();
        let mut curse = Curse::new(200, 200, 5);
        curse
            .invoke_advanced(&mut world, PowerCommand::TimeFreeze { turns: 1 })
            .unwrap();
        curse
            .invoke_advanced(&mut world, PowerCommand::MassCorruption { room: RoomId(1) })
            .unwrap();
        let doom = curse
            .invoke_advanced(&mut world, PowerCommand::Doom)
            .unwrap();

        assert_eq!(doom.synergy, Some(Synergy::DoomCombo));
        assert_eq!(curse.status().doom_countdown, Some(3));
        assert_eq!(curse.energy(), 85);
        assert_eq!(world.hero.suspicion(), 100);
    }
}
