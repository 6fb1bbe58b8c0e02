// ============================================================
// Layer 2 — Catalog Use Case
// ============================================================
// Read-only listings that help pick the arguments of an
// inspection run: which logs exist and what they were trained
// on, and which snapshots a log holds.

use std::path::Path;

use anyhow::Result;

use crate::data::{log_resolver::LogResolver, snapshot_resolver};
use crate::domain::error::InspectError;
use crate::domain::snapshot::select_step;
use crate::domain::traits::ConfigStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSummary {
    pub name: String,

    /// None when the log's config could not be read
    pub dataset: Option<String>,
}

/// Logs under `results_dir`, newest first, optionally restricted to
/// datasets starting with `family`.
///
/// Unlike `last_<family>` resolution, an unreadable config does not
/// abort the listing; the log is shown without a dataset instead.
pub fn list_logs(
    results_dir: &Path,
    store:       &dyn ConfigStore,
    family:      Option<&str>,
) -> Result<Vec<LogSummary>> {
    let resolver = LogResolver::new(results_dir, store);

    let mut summaries = Vec::new();
    for name in resolver.list_logs()?.into_iter().rev() {
        let dataset = match store.dataset_of(&results_dir.join(&name)) {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                tracing::warn!("Cannot read config of '{}': {:#}", name, e);
                None
            }
        };

        let keep = match (family, &dataset) {
            (None, _)                 => true,
            (Some(f), Some(dataset))  => dataset.starts_with(f),
            (Some(_), None)           => false,
        };
        if keep {
            summaries.push(LogSummary { name, dataset });
        }
    }

    Ok(summaries)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotListing {
    /// Every step, ascending
    pub steps: Vec<u64>,

    /// Step the given index selects, None when it is out of range
    pub selected: Option<u64>,
}

pub fn list_snapshots(log_dir: &Path, index: i64) -> Result<SnapshotListing> {
    let steps = snapshot_resolver::list_steps(log_dir)?;
    let selected = match select_step(&steps, index, snapshot_resolver::snapshot_dir(log_dir)) {
        Ok(step) => Some(step),
        Err(InspectError::SnapshotIndexOutOfRange { .. }) | Err(InspectError::NoSnapshots { .. }) => None,
        Err(e) => return Err(e.into()),
    };
    Ok(SnapshotListing { steps, selected })
}
