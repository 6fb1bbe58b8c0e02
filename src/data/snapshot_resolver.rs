// ============================================================
// Layer 4 — Snapshot Resolver
// ============================================================
// Finds the checkpoint of a log to restore.
//
//   results/Log_X/snapshots/
//     snap-100.meta
//     snap-2500.meta
//     snap-4000.meta      ← index -1 (default)
//     snap-4000.index     (ignored, only .meta files count)
//
// The directory listing is reduced to step numbers, then the
// pure selection in domain::snapshot picks one by signed rank.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::domain::snapshot::{parse_step, select_step, snapshot_stem, Snapshot, META_SUFFIX};

/// Name of the checkpoint directory inside a log
pub const SNAPSHOT_DIR: &str = "snapshots";

pub fn snapshot_dir(log_dir: &Path) -> PathBuf {
    log_dir.join(SNAPSHOT_DIR)
}

/// Every step with a checkpoint metadata file, ascending.
/// A log without a snapshot directory has no steps.
pub fn list_steps(log_dir: &Path) -> Result<Vec<u64>> {
    let dir = snapshot_dir(log_dir);
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut steps = Vec::new();
    for entry in fs::read_dir(&dir)
        .with_context(|| format!("Cannot read snapshot directory '{}'", dir.display()))?
    {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !name.ends_with(META_SUFFIX) {
            continue;
        }
        match parse_step(&name) {
            Some(step) => steps.push(step),
            None => tracing::warn!("Skipping snapshot file without a step number: '{}'", name),
        }
    }

    steps.sort_unstable();
    Ok(steps)
}

/// Resolve the snapshot at `index` (negative counts from the most recent)
pub fn resolve(log_dir: &Path, index: i64) -> Result<Snapshot> {
    let dir   = snapshot_dir(log_dir);
    let steps = list_steps(log_dir)?;
    let step  = select_step(&steps, index, &dir)?;

    let snapshot = Snapshot { step, path: dir.join(snapshot_stem(step)) };
    tracing::info!(
        "Restoring snapshot {} of {} (step {})",
        index,
        steps.len(),
        snapshot.step
    );
    Ok(snapshot)
}
