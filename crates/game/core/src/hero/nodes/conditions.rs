use crate::hero::HeroContext;
use crate::state::Room;

/// Health is below the heal threshold and there is a potion worth drinking.
pub fn needs_healing(ctx: &HeroContext<'_>) -> bool {
    ctx.hero.health_below_percent(ctx.tuning.heal_below_percent)
        && ctx.hero.first_usable_potion().is_some()
}

pub fn enemies_present(ctx: &HeroContext<'_>) -> bool {
    ctx.current_room().is_some_and(Room::has_living_enemies)
}

pub fn loot_present(ctx: &HeroContext<'_>) -> bool {
    ctx.current_room().is_some_and(|room| !room.items.is_empty())
}
