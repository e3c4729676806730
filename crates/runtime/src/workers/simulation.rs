//! Simulation worker that owns the authoritative [`curse_core::Game`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), applies
//! them to the game one at a time, and forwards every core event to the
//! runtime [`EventBus`].

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinError;
use tracing::{debug, error, info};

use curse_core::{
    AutoCurse, CurseCommand, CurseOutcome, EventRecord, Game, GameSnapshot, GameSummary,
    PowerCommand, PowerOutcome, RoomId, SubscriberError, TickReport,
};

use crate::api::{Result, RuntimeError};
use crate::events::EventBus;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Advance the game by one hero decision.
    Tick {
        reply: oneshot::Sender<Result<TickReport>>,
    },
    /// Apply a base curse action between ticks.
    InvokeCurse {
        command: CurseCommand,
        reply: oneshot::Sender<Result<CurseOutcome>>,
    },
    /// Apply a custom curse power between ticks.
    InvokePower {
        id: String,
        room: RoomId,
        index: Option<usize>,
        reply: oneshot::Sender<Result<CurseOutcome>>,
    },
    /// Use an advanced curse power between ticks.
    InvokeAdvanced {
        command: PowerCommand,
        reply: oneshot::Sender<Result<PowerOutcome>>,
    },
    /// List curse commands valid right now.
    AvailableActions {
        reply: oneshot::Sender<Vec<CurseCommand>>,
    },
    /// Read-only snapshot.
    Snapshot { reply: oneshot::Sender<GameSnapshot> },
    /// Tick until the game ends, optionally with an automated curse.
    RunToEnd {
        auto: Option<AutoCurse>,
        reply: oneshot::Sender<Result<GameSummary>>,
    },
    /// Stop after the current command.
    Shutdown { reply: oneshot::Sender<GameSummary> },
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    game: Game,
    command_rx: mpsc::Receiver<Command>,
}

impl SimulationWorker {
    /// Creates a new simulation worker and wires the game's events into `events`.
    pub fn new(mut game: Game, command_rx: mpsc::Receiver<Command>, events: EventBus) -> Self {
        game.subscribe_all(move |record: &EventRecord| -> std::result::Result<(), SubscriberError> {
            events.publish(record.clone());
            Ok(())
        });

        info!(
            target: "runtime::worker",
            rooms = game.dungeon().len(),
            phase = %game.phase(),
            "simulation worker initialized"
        );
        Self { game, command_rx }
    }

    /// Main worker loop.
    ///
    /// Ends when every handle is dropped or a shutdown command arrives.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                Command::RunToEnd { auto, reply } => {
                    match run_to_end_blocking(self.game, auto).await {
                        Ok((game, result)) => {
                            self.game = game;
                            send_reply(reply, result, "RunToEnd");
                        }
                        Err(err) => {
                            error!(target: "runtime::worker", %err, "run to end task failed");
                            send_reply(reply, Err(RuntimeError::WorkerJoin(err)), "RunToEnd");
                            return;
                        }
                    }
                }
                Command::Shutdown { reply } => {
                    send_reply(reply, self.game.summary(), "Shutdown");
                    break;
                }
                other => self.handle_command(other),
            }
        }
        info!(
            target: "runtime::worker",
            turn = self.game.turn(),
            phase = %self.game.phase(),
            "simulation worker stopped"
        );
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Tick { reply } => {
                let result = self.game.tick().map_err(Into::into);
                send_reply(reply, result, "Tick");
            }
            Command::InvokeCurse { command, reply } => {
                let result = self.game.invoke_curse(command).map_err(Into::into);
                send_reply(reply, result, "InvokeCurse");
            }
            Command::InvokePower {
                id,
                room,
                index,
                reply,
            } => {
                let result = self
                    .game
                    .invoke_power(&id, room, index)
                    .map_err(Into::into);
                send_reply(reply, result, "InvokePower");
            }
            Command::InvokeAdvanced { command, reply } => {
                let result = self.game.invoke_advanced(command).map_err(Into::into);
                send_reply(reply, result, "InvokeAdvanced");
            }
            Command::AvailableActions { reply } => {
                send_reply(reply, self.game.available_curse_actions(), "AvailableActions");
            }
            Command::Snapshot { reply } => {
                send_reply(reply, self.game.snapshot(), "Snapshot");
            }
            Command::RunToEnd { .. } | Command::Shutdown { .. } => {
                debug!(target: "runtime::worker", "lifecycle command handled by the run loop");
            }
        }
    }
}

/// Runs the game to completion on the blocking pool and hands it back.
///
/// The game is lost only if the task panics.
async fn run_to_end_blocking(
    mut game: Game,
    auto: Option<AutoCurse>,
) -> std::result::Result<(Game, Result<GameSummary>), JoinError> {
    tokio::task::spawn_blocking(move || {
        let result = game.run_to_end(auto.as_ref()).map_err(Into::into);
        (game, result)
    })
    .await
}

fn send_reply<T>(reply: oneshot::Sender<T>, value: T, command: &'static str) {
    if reply.send(value).is_err() {
        debug!(
            target: "runtime::worker",
            command,
            "reply channel closed (caller dropped)"
        );
    }
}
