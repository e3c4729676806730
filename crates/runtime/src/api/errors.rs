//! Unified error types surfaced by the runtime API.
//!
//! Wraps worker coordination failures and the core's own errors so clients
//! can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use curse_core::{ConfigError, GameError, PowerRejection, Rejection, SimulationError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("failed to load content")]
    Content(#[source] anyhow::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    PowerRejected(#[from] PowerRejection),
}

impl RuntimeError {
    /// Whether the caller can keep using the runtime after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Rejected(rejection) => rejection.severity().is_recoverable(),
            Self::PowerRejected(rejection) => rejection.severity().is_recoverable(),
            Self::Simulation(SimulationError::Finished { .. }) => true,
            _ => false,
        }
    }
}
