//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping the simulation, steering the curse, or streaming events from
//! specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use curse_core::{
    AutoCurse, CurseCommand, CurseOutcome, EventRecord, GameSnapshot, GameSummary, PowerCommand,
    PowerOutcome, RoomId, TickReport,
};

use super::errors::{Result, RuntimeError};
use crate::events::{EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
///
/// Commands from every clone are applied in arrival order, so a curse action
/// always lands between two ticks, never inside one.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Advance the game by one hero decision
    pub async fn tick(&self) -> Result<TickReport> {
        self.request(|reply| Command::Tick { reply }).await?
    }

    /// Apply a base curse action before the next tick
    pub async fn invoke_curse(&self, command: CurseCommand) -> Result<CurseOutcome> {
        self.request(|reply| Command::InvokeCurse { command, reply })
            .await?
    }

    /// Apply a custom curse power before the next tick
    pub async fn invoke_power(
        &self,
        id: impl Into<String>,
        room: RoomId,
        index: Option<usize>,
    ) -> Result<CurseOutcome> {
        let id = id.into();
        self.request(|reply| Command::InvokePower {
            id,
            room,
            index,
            reply,
        })
        .await?
    }

    /// Use an advanced curse power before the next tick
    pub async fn invoke_advanced(&self, command: PowerCommand) -> Result<PowerOutcome> {
        self.request(|reply| Command::InvokeAdvanced { command, reply })
            .await?
    }

    /// Curse commands that would currently succeed
    pub async fn available_curse_actions(&self) -> Result<Vec<CurseCommand>> {
        self.request(|reply| Command::AvailableActions { reply })
            .await
    }

    /// Query the current game state (read-only snapshot)
    pub async fn snapshot(&self) -> Result<GameSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Tick until the game ends
    pub async fn run_to_end(&self, auto: Option<AutoCurse>) -> Result<GameSummary> {
        self.request(|reply| Command::RunToEnd { auto, reply })
            .await?
    }

    pub(crate) async fn shutdown(&self) -> Result<GameSummary> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use curse_runtime::Topic;
    ///
    /// let mut curse_rx = handle.subscribe(Topic::Curse);
    /// while let Ok(record) = curse_rx.recv().await {
    ///     println!("turn {}: {:?}", record.turn, record.event);
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<EventRecord> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<EventRecord>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
