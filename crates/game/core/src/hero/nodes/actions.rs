use behavior_tree::Status;
use tracing::debug;

use crate::events::{GameEvent, SuspicionCause};
use crate::hero::{HeroAction, HeroContext};
use crate::state::RoomId;

/// Drinks the first potion that is not cursed.
pub fn drink_potion(ctx: &mut HeroContext<'_>) -> Status {
    let Some(index) = ctx.hero.first_usable_potion() else {
        return Status::Failure;
    };
    let Some(potion) = ctx.hero.take_item(index) else {
        return Status::Failure;
    };

    let amount = ctx.hero.heal(potion.value);
    let health = ctx.hero.health();
    debug!(target: "core::hero", item = %potion.name, amount, health, "drink potion");

    ctx.publish(GameEvent::HeroHealed { amount, health });
    ctx.set_action(HeroAction::Healed {
        item: potion.name,
        amount,
        health,
    });
    Status::Success
}

/// Attacks the living enemy with the highest attack. Ties go to the enemy
/// listed first. A surviving target strikes back.
pub fn fight(ctx: &mut HeroContext<'_>) -> Status {
    let Some(room_id) = ctx.hero.current_room() else {
        return Status::Failure;
    };
    let hero_attack = ctx.hero.attack();
    let Some(room) = ctx.dungeon.room_mut(room_id) else {
        return Status::Failure;
    };

    let mut target: Option<(usize, i32)> = None;
    for (index, enemy) in room.living_enemies() {
        if target.is_none_or(|(_, best)| enemy.attack() > best) {
            target = Some((index, enemy.attack()));
        }
    }
    let Some((index, _)) = target else {
        return Status::Failure;
    };

    let enemy = &mut room.enemies[index];
    let damage = (hero_attack - enemy.defense()).max(1);
    enemy.take_damage(damage);
    let enemy_kind = enemy.kind();
    let enemy_health = enemy.health();
    let enemy_attack = enemy.attack();
    let mutated = enemy.is_mutated();
    let killed = !enemy.is_alive();

    ctx.publish(GameEvent::HeroAttacked {
        room: room_id,
        enemy: index,
        enemy_kind,
        damage,
        enemy_health,
    });
    if mutated {
        let amount = ctx.tuning.mutated_foe_suspicion;
        ctx.raise_suspicion(amount, SuspicionCause::MutatedFoe);
    }

    let counter_damage = if killed {
        ctx.publish(GameEvent::EnemyDied {
            room: room_id,
            enemy: index,
            enemy_kind,
        });
        None
    } else {
        let counter = (enemy_attack - ctx.hero.defense()).max(1);
        let taken = ctx.hero.take_damage(counter);
        let health = ctx.hero.health();
        ctx.publish(GameEvent::HeroDamaged {
            room: Some(room_id),
            damage: taken,
            health,
        });
        Some(taken)
    };

    debug!(
        target: "core::hero",
        room = %room_id,
        enemy = index,
        damage,
        killed,
        ?counter_damage,
        "fight"
    );
    ctx.set_action(HeroAction::Attacked {
        room: room_id,
        enemy: index,
        damage,
        killed,
        counter_damage,
    });
    Status::Success
}

/// Takes the first item in the room, unless a suspicious hero decides the
/// tainted thing is not worth the risk.
pub fn loot(ctx: &mut HeroContext<'_>) -> Status {
    let Some(room_id) = ctx.hero.current_room() else {
        return Status::Failure;
    };
    let Some(room) = ctx.dungeon.room_mut(room_id) else {
        return Status::Failure;
    };
    if room.items.is_empty() {
        return Status::Failure;
    }
    let item = room.items.remove(0);

    if ctx.hero.is_suspicious() && item.is_tainted() && ctx.rng.chance(ctx.tuning.loot_skip_chance)
    {
        debug!(target: "core::hero", room = %room_id, item = %item.name, "left tainted loot");
        ctx.publish(GameEvent::HeroLooted {
            room: room_id,
            item: item.name.clone(),
            quality: item.quality(),
            taken: false,
            effect: None,
        });
        ctx.set_action(HeroAction::LeftLoot {
            room: room_id,
            item,
        });
        return Status::Success;
    }

    let tainted = item.is_tainted();
    let effect = ctx.hero.acquire(item.clone());
    debug!(target: "core::hero", room = %room_id, item = %item.name, ?effect, "loot");
    ctx.publish(GameEvent::HeroLooted {
        room: room_id,
        item: item.name.clone(),
        quality: item.quality(),
        taken: true,
        effect: Some(effect),
    });
    if tainted {
        let amount = ctx.tuning.tainted_loot_suspicion;
        ctx.raise_suspicion(amount, SuspicionCause::TaintedLoot);
    }
    ctx.set_action(HeroAction::Looted {
        room: room_id,
        item,
        effect,
    });
    Status::Success
}

/// Steps into the entrance, an unvisited neighbour, or any neighbour, in
/// that order of preference.
pub fn explore(ctx: &mut HeroContext<'_>) -> Status {
    let Some(current) = ctx.hero.current_room() else {
        let entrance = ctx.dungeon.entrance();
        return enter(ctx, None, entrance);
    };
    let Some(room) = ctx.dungeon.room(current) else {
        ctx.set_action(HeroAction::Lost { room: current });
        return Status::Failure;
    };

    let neighbours: Vec<RoomId> = room.connections().iter().copied().collect();
    if neighbours.is_empty() {
        ctx.set_action(HeroAction::Stuck { room: current });
        return Status::Failure;
    }
    let unvisited: Vec<RoomId> = neighbours
        .iter()
        .copied()
        .filter(|id| !ctx.hero.has_visited(*id))
        .collect();
    let pool = if unvisited.is_empty() {
        &neighbours
    } else {
        &unvisited
    };
    let destination = pool[ctx.rng.index(pool.len())];
    enter(ctx, Some(current), destination)
}

fn enter(ctx: &mut HeroContext<'_>, from: Option<RoomId>, to: RoomId) -> Status {
    let Some(room) = ctx.dungeon.room_mut(to) else {
        ctx.set_action(HeroAction::Lost { room: to });
        return Status::Failure;
    };
    room.mark_visited();
    let room_kind = room.kind();
    let sprung = room.spring_traps();
    let looks_wrong = room.traps.len() > ctx.tuning.suspicious_trap_count || room.is_altered();

    let first_visit = ctx.hero.enter(to);
    let total: i32 = sprung.iter().map(|trap| trap.damage).sum();
    if total > 0 {
        ctx.hero.take_damage(total);
    }
    for trap in &sprung {
        ctx.publish(GameEvent::TrapTriggered {
            room: to,
            trap: trap.index,
            trap_kind: trap.kind,
            damage: trap.damage,
            by_curse: false,
        });
    }
    ctx.publish(GameEvent::RoomEntered {
        room: to,
        room_kind,
        first_visit,
    });
    ctx.publish(GameEvent::HeroMoved { from, to });
    if looks_wrong {
        let amount = ctx.tuning.suspicious_room_suspicion;
        ctx.raise_suspicion(amount, SuspicionCause::SuspiciousRoom);
    }

    debug!(
        target: "core::hero",
        from = ?from,
        to = %to,
        traps = sprung.len(),
        trap_damage = total,
        health = ctx.hero.health(),
        "explore"
    );
    ctx.set_action(HeroAction::Moved {
        from,
        to,
        traps_sprung: sprung.len(),
        trap_damage: total,
    });
    Status::Success
}
