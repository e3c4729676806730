//! Content pack loader.

use std::path::{Path, PathBuf};

use curse_core::{ContentCatalog, ContentPack, MergeReport};

use crate::loaders::{LoadResult, read_file};

/// Loader for [`ContentPack`]s stored as RON files.
///
/// # File Format
///
/// ```text
/// (
///     name: "crypt",
///     enemies: [
///         ("wraith", (name: "Wraith", kind: skeleton, health: 45, attack: 11, defense: 4)),
///     ],
///     curse_powers: [
///         ("grave_chill", (name: "Grave Chill", base: trigger_trap, cost: 8, suspicion: 1)),
///         ("bone_rattle", (name: "Bone Rattle", base: spawn_trap, cost: 12, suspicion: 3,
///             cooldown: 2)),
///     ],
/// )
/// ```
///
/// Omitted sections are empty and an omitted power `cooldown` is zero. A
/// pack without a `name` is named after its file stem.
pub struct ContentLoader;

impl ContentLoader {
    /// Load a single pack without validating it.
    pub fn load(path: &Path) -> LoadResult<ContentPack> {
        let content = read_file(path)?;
        let mut pack: ContentPack = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse content RON {}: {}", path.display(), e)
        })?;
        if pack.name.is_empty() {
            pack.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(pack)
    }

    /// Load a pack and merge it into `catalog`. Nothing is merged when the
    /// pack fails validation.
    pub fn load_into(catalog: &mut ContentCatalog, path: &Path) -> LoadResult<MergeReport> {
        let pack = Self::load(path)?;
        catalog
            .merge(pack)
            .map_err(|e| anyhow::anyhow!("Invalid content pack {}: {}", path.display(), e))
    }

    /// Load every `.ron` file in `dir`, merged in file-name order.
    pub fn load_dir(dir: &Path) -> LoadResult<ContentCatalog> {
        let mut catalog = ContentCatalog::new();
        Self::merge_dir(&mut catalog, dir)?;
        Ok(catalog)
    }

    /// Merge every `.ron` file in `dir` into `catalog`, in file-name order.
    ///
    /// Stops at the first invalid file; packs before it stay merged.
    pub fn merge_dir(catalog: &mut ContentCatalog, dir: &Path) -> LoadResult<MergeReport> {
        let mut total = MergeReport::default();
        for path in Self::pack_files(dir)? {
            let report = Self::load_into(catalog, &path)?;
            tracing::info!(
                target: "content::catalog",
                file = %path.display(),
                added = report.added,
                overridden = report.overridden,
                "loaded content pack"
            );
            total.added += report.added;
            total.overridden += report.overridden;
        }
        Ok(total)
    }

    fn pack_files(dir: &Path) -> LoadResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            anyhow::anyhow!("Failed to read content directory {}: {}", dir.display(), e)
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}
