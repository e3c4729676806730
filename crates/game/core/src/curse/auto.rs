use super::{Curse, CurseOutcome, Rejection};
use crate::world::World;

/// A simple automated curse for unattended runs.
///
/// Each turn it acts with probability `activity`, choosing uniformly among the
/// commands [`Curse::available_actions`] reports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoCurse {
    activity: f64,
}

impl AutoCurse {
    pub const DEFAULT_ACTIVITY: f64 = 0.3;

    pub fn new(activity: f64) -> Self {
        Self {
            activity: activity.clamp(0.0, 1.0),
        }
    }

    pub fn activity(&self) -> f64 {
        self.activity
    }

    /// Returns `None` when the curse stays idle this turn.
    pub fn act(
        &self,
        curse: &mut Curse,
        world: &mut World,
    ) -> Option<Result<CurseOutcome, Rejection>> {
        if !world.rng().chance(self.activity) {
            return None;
        }
        let options = curse.available_actions(world);
        if options.is_empty() {
            return None;
        }
        let choice = options[world.rng().index(options.len())];
        Some(curse.invoke(world, choice))
    }
}

impl Default for AutoCurse {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ACTIVITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dungeon;
    use crate::events::EventBus;
    use crate::rng::PcgRng;
    use crate::state::{Hero, HeroStats, Room, RoomId, RoomKind};

    fn world(seed: u64) -> World {
        let rooms = vec![
            Room::new(RoomId(0), RoomKind::Entrance),
            Room::new(RoomId(1), RoomKind::Normal),
            Room::new(RoomId(2), RoomKind::Boss),
        ];
        let mut world = World::new(
            Hero::new("Hero", HeroStats::new(100, 15, 5)),
            Dungeon::chain(rooms).unwrap(),
            EventBus::new(),
            Box::new(PcgRng::new(seed)),
        );
        world.hero.enter(RoomId(0));
        world
    }

    #[test]
    fn idle_curse_never_acts() {
        let mut world = world(1);
        let mut curse = Curse::new(100, 100, 5);
        let auto = AutoCurse::new(0.0);
        for _ in 0..20 {
            assert!(auto.act(&mut curse, &mut world).is_none());
        }
        assert_eq!(curse.energy(), 100);
    }

    #[test]
    fn eager_curse_spends_until_broke() {
        let mut world = world(2);
        let mut curse = Curse::new(100, 100, 0);
        let auto = AutoCurse::new(1.0);
        let mut acted = 0;
        while let Some(outcome) = auto.act(&mut curse, &mut world) {
            assert!(outcome.is_ok());
            acted += 1;
        }
        assert!(acted > 0);
        assert!(curse.energy() < 5 || curse.available_actions(&world).is_empty());
        assert_eq!(curse.actions_taken(), acted);
    }
}
