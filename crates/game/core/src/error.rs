//! Common error infrastructure for curse-core.
//!
//! Shared severity classification plus the crate-level error types. Curse action
//! rejections live beside the curse controller in [`crate::curse`], since they
//! are an expected outcome of play rather than a failure of the simulation.
//!
//! # Classification
//!
//! - [`ConfigError`]: invalid construction input, raised before a game exists
//! - [`InvariantViolation`]: world state that should be unreachable
//! - [`SimulationError`]: what [`crate::Game::tick`] can return

use crate::state::RoomId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may retry with a different request
/// - **Validation**: invalid input, should not be retried unchanged
/// - **Internal**: unexpected world state that needs investigation
/// - **Fatal**: the game cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Turn during which the error was raised.
    pub turn: u32,

    /// Room involved in the failure (if applicable).
    pub room: Option<RoomId>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(turn: u32) -> Self {
        Self { turn, room: None }
    }

    /// Attaches a room to this context (builder pattern).
    #[must_use]
    pub const fn with_room(mut self, room: RoomId) -> Self {
        self.room = Some(room);
        self
    }
}

/// Common trait for all curse-core errors.
///
/// Provides a uniform interface for severity classification and context
/// retrieval, used by the runtime when deciding what to log and at which level.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Invalid configuration, content, or hand-built layout.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("dungeon needs at least 3 rooms, got {0}")]
    InvalidRoomCount(usize),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("probability {field} must be within [0, 1], got {value}")]
    InvalidProbability { field: &'static str, value: f64 },

    #[error("starting energy {starting} exceeds maximum {max}")]
    EnergyAboveMax { starting: u32, max: u32 },

    #[error("invalid {section} entry '{id}': {reason}")]
    MalformedContent {
        section: &'static str,
        id: String,
        reason: String,
    },

    #[error("malformed dungeon: {0}")]
    MalformedDungeon(String),
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRoomCount(_) => "CONFIG_INVALID_ROOM_COUNT",
            Self::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            Self::InvalidProbability { .. } => "CONFIG_INVALID_PROBABILITY",
            Self::EnergyAboveMax { .. } => "CONFIG_ENERGY_ABOVE_MAX",
            Self::MalformedContent { .. } => "CONFIG_MALFORMED_CONTENT",
            Self::MalformedDungeon(_) => "CONFIG_MALFORMED_DUNGEON",
        }
    }
}

/// World state that a correct simulation never reaches.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// The hero's room has no connections, so exploration cannot proceed.
    #[error("hero is stuck in {room}: no connections")]
    HeroStuck { room: RoomId, context: ErrorContext },

    /// A room id refers to nothing in the dungeon.
    #[error("{room} does not exist")]
    MissingRoom { room: RoomId, context: ErrorContext },
}

impl GameError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::HeroStuck { context, .. } | Self::MissingRoom { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HeroStuck { .. } => "INVARIANT_HERO_STUCK",
            Self::MissingRoom { .. } => "INVARIANT_MISSING_ROOM",
        }
    }
}

/// Errors produced while advancing the simulation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    /// The game already reached a terminal phase.
    #[error("game already finished at turn {turn}")]
    Finished { turn: u32 },
}

impl GameError for SimulationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invariant(err) => err.severity(),
            Self::Finished { .. } => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Invariant(err) => err.context(),
            Self::Finished { .. } => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Invariant(err) => err.error_code(),
            Self::Finished { .. } => "SIMULATION_FINISHED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_errors_are_internal_and_carry_context() {
        let err = SimulationError::from(InvariantViolation::HeroStuck {
            room: RoomId(3),
            context: ErrorContext::new(7).with_room(RoomId(3)),
        });

        assert_eq!(err.severity(), ErrorSeverity::Internal);
        assert_eq!(err.error_code(), "INVARIANT_HERO_STUCK");
        assert_eq!(err.context().map(|ctx| ctx.turn), Some(7));
        assert!(err.severity().is_internal());
    }

    #[test]
    fn config_errors_are_validation() {
        let err = ConfigError::InvalidRoomCount(2);
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert!(!err.severity().is_recoverable());
        assert_eq!(err.to_string(), "dungeon needs at least 3 rooms, got 2");
    }
}
