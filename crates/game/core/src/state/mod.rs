//! Entity model: rooms, hero, enemies, items, and traps.
//!
//! Stats are signed so corrupted and cursed values can go negative, but every
//! mutating helper here clamps at the documented floor (health, attack,
//! defense, and gold never drop below zero).
mod common;
mod enemy;
mod hero;
mod item;
mod room;
mod trap;

pub use common::RoomId;
pub use enemy::{Enemy, EnemyKind};
pub use hero::{Hero, HeroStats, ItemEffect, SUSPICION_MAX, SUSPICIOUS_THRESHOLD};
pub use item::{Item, ItemKind, ItemQuality};
pub use room::{Room, RoomFlags, RoomKind, SprungTrap};
pub use trap::{Trap, TrapKind};

/// Upper bound for any stat, value, or damage supplied by config or content.
///
/// Keeps every later product (mutation, difficulty scaling, loot) far from
/// `i32` overflow.
pub const MAX_STAT: i32 = 10_000;

/// Scales `value` by `multiplier`, rounding toward negative infinity.
///
/// The epsilon keeps decimal multipliers such as 1.3 from flooring an exact
/// product one below the intended result.
/// The float-to-int cast saturates, so huge products clamp to `i32::MAX`.
pub(crate) fn scale(value: i32, multiplier: f64) -> i32 {
    (f64::from(value) * multiplier + 1e-9).floor() as i32
}
