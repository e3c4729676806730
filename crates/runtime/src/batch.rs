//! Run many independent games in parallel.
//!
//! Each game runs to completion on tokio's blocking pool. Games share the
//! content catalog but nothing else, so outcomes depend only on their config.

use std::sync::Arc;

use rand::Rng;
use tokio::task::JoinSet;

use curse_core::{AutoCurse, ContentCatalog, Game, GameConfig, GameSummary};

use crate::api::{Result, RuntimeError};

/// Final result of one game in a batch.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BatchOutcome {
    /// Position of the game's config in the input.
    pub index: usize,
    pub seed: u64,
    pub summary: GameSummary,
}

/// Run every config to the end and return outcomes in input order.
///
/// The first failing game aborts the rest of the batch.
pub async fn run_batch(
    configs: Vec<GameConfig>,
    catalog: Arc<ContentCatalog>,
    auto: Option<AutoCurse>,
) -> Result<Vec<BatchOutcome>> {
    let total = configs.len();
    let mut tasks = JoinSet::new();

    for (index, config) in configs.into_iter().enumerate() {
        let catalog = Arc::clone(&catalog);
        tasks.spawn_blocking(move || -> Result<BatchOutcome> {
            let seed = config.seed;
            let mut game = Game::with_content(config, &catalog)?;
            let summary = game.run_to_end(auto.as_ref())?;
            Ok(BatchOutcome {
                index,
                seed,
                summary,
            })
        });
    }

    let mut outcomes = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        outcomes.push(joined.map_err(RuntimeError::WorkerJoin)??);
    }
    outcomes.sort_by_key(|outcome| outcome.index);

    tracing::info!(target: "runtime::worker", games = total, "batch finished");
    Ok(outcomes)
}

/// `count` copies of `base`, each with a fresh random seed.
pub fn with_random_seeds(base: &GameConfig, count: usize) -> Vec<GameConfig> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| GameConfig {
            seed: rng.random(),
            ..base.clone()
        })
        .collect()
}
