//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the game and applies commands one at a time.

mod simulation;

pub use simulation::{Command, SimulationWorker};
