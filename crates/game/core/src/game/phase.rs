use crate::hero::HeroAction;

/// Lifecycle of one game.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GamePhase {
    #[default]
    Setup,
    Running,
    VictoryForCurse,
    VictoryForHero,
    TurnLimitReached,
}

impl GamePhase {
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::VictoryForCurse | Self::VictoryForHero | Self::TurnLimitReached
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TickResult {
    Continue,
    CurseVictory,
    HeroVictory,
    TurnLimit,
}

impl TickResult {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// Outcome of one [`Game::tick`](super::Game::tick).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub result: TickResult,
    pub turn: u32,
    /// [`HeroAction::Idle`] when the turn limit ended the game.
    pub action: HeroAction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn exactly_three_phases_are_terminal() {
        let terminal: Vec<GamePhase> = GamePhase::iter().filter(|p| p.is_terminal()).collect();
        assert_eq!(
            terminal,
            vec![
                GamePhase::VictoryForCurse,
                GamePhase::VictoryForHero,
                GamePhase::TurnLimitReached
            ]
        );
        assert_eq!("victory_for_hero".parse(), Ok(GamePhase::VictoryForHero));
    }
}
