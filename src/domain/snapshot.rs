// ============================================================
// Layer 3 — Snapshot Domain Type
// ============================================================
// A checkpoint saved at a given training step.
//
// Checkpoints are written by the training run as
//   snapshots/snap-<step>.meta   (+ data/index files)
// and restored through the common prefix `snapshots/snap-<step>`.
//
// Step numbers are opaque identifiers: a larger step is a later
// checkpoint, nothing more is assumed about them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::InspectError;

/// Suffix of the checkpoint metadata files that identify a snapshot
pub const META_SUFFIX: &str = ".meta";

/// A resolved snapshot ready to be restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Training step the checkpoint was saved at
    pub step: u64,

    /// Restore prefix, e.g. results/Log_X/snapshots/snap-4000
    pub path: PathBuf,
}

/// Restore prefix of the snapshot for `step`, relative to the snapshot directory
pub fn snapshot_stem(step: u64) -> String {
    format!("snap-{step}")
}

/// Parse the training step out of a checkpoint metadata filename.
///
/// The step is the integer between the last `-` and the `.meta` suffix:
///   "snap-4000.meta" → Some(4000)
///   "snap-4000.index" → None
pub fn parse_step(file_name: &str) -> Option<u64> {
    let stem = file_name.strip_suffix(META_SUFFIX)?;
    let (_, digits) = stem.rsplit_once('-')?;
    digits.parse().ok()
}

/// Pick a step by signed rank among the ascending-sorted steps.
///
/// Negative indices count from the end, so `-1` selects the most
/// recent snapshot and `0` the oldest one. Repeated steps (e.g.
/// `snap-100.meta` next to `snap-0100.meta`) each keep their rank.
/// `dir` only feeds the error message when no step is available.
pub fn select_step(
    steps: &[u64],
    index: i64,
    dir:   impl Into<PathBuf>,
) -> Result<u64, InspectError> {
    let mut sorted = steps.to_vec();
    sorted.sort_unstable();

    if sorted.is_empty() {
        return Err(InspectError::NoSnapshots { dir: dir.into() });
    }

    let count = sorted.len();
    let position = if index < 0 {
        (count as i64).checked_add(index).filter(|p| *p >= 0)
    } else {
        Some(index).filter(|p| *p < count as i64)
    };

    position
        .map(|p| sorted[p as usize])
        .ok_or(InspectError::SnapshotIndexOutOfRange { index, count })
}
