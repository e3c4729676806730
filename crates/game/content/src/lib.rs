//! Data files for the cursed dungeon.
//!
//! This crate reads content and configuration from disk:
//! - custom enemies, items, traps, and curse powers (RON content packs)
//! - game configuration (TOML)
//!
//! Everything loaded here is validated by `curse-core` before a game sees it.
//! Content packs merge in file-name order, so a later file overrides an
//! earlier one that reuses an identifier.

#[cfg(feature = "loaders")]
pub mod loaders;

pub use curse_core::{ContentCatalog, ContentPack, GameConfig, MergeReport};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ContentLoader, LoadResult};
