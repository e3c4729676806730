//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the simulation.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use curse_content::ContentFactory;
use curse_core::{ContentCatalog, Game, GameConfig, GameSummary};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 256,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that drives one game on a background worker
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Start a runtime for a freshly generated game
    pub async fn start(config: RuntimeConfig) -> Result<RuntimeHandle> {
        let runtime = Self::builder().config(config).build().await?;
        let handle = runtime.handle();
        // The worker lives until every handle is dropped.
        drop(runtime.sim_worker_handle);
        Ok(handle)
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stop the worker between commands and wait for it to exit.
    ///
    /// Returns the game summary at the moment of shutdown.
    pub async fn shutdown(self) -> Result<GameSummary> {
        let summary = self.handle.shutdown().await?;
        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        Ok(summary)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<ContentCatalog>,
    data_dir: Option<PathBuf>,
    game: Option<Game>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            data_dir: None,
            game: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Draw from custom content when generating the dungeon
    pub fn content(mut self, catalog: ContentCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Load `config.toml` and `content/` from a data directory.
    ///
    /// The loaded config replaces `config.game_config`.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Run an already constructed game (for hand-built dungeons)
    pub fn game(mut self, game: Game) -> Self {
        self.game = Some(game);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let RuntimeBuilder {
            mut config,
            catalog,
            data_dir,
            game,
        } = self;

        let game = match game {
            Some(game) => game,
            None => {
                let mut catalog = catalog.unwrap_or_default();
                if let Some(dir) = data_dir {
                    let factory = ContentFactory::new(dir);
                    config.game_config = factory.load_config().map_err(RuntimeError::Content)?;
                    factory
                        .load_catalog_into(&mut catalog)
                        .map_err(RuntimeError::Content)?;
                }
                Game::with_content(config.game_config.clone(), &catalog)?
            }
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(game, command_rx, event_bus);
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        tracing::info!(target: "runtime::worker", "runtime started");
        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}
