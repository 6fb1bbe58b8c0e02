// ============================================================
// Layer 3 — Log Selection
// ============================================================
// How the user names the training run to inspect:
//
//   "last_S3DIS"                      → the most recent S3DIS log
//   "last_ShapeNetPart_chair"         → the most recent ShapeNetPart_chair log
//   "results/Log_2019-03-19_19-14-24" → that exact directory
//
// Log directories are named `Log_<timestamp>` with a sortable
// timestamp, so lexicographic order is chronological order.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Prefix every training log directory name starts with
pub const LOG_PREFIX: &str = "Log_";

/// Sentinel prefix asking for the latest log of a dataset family
pub const LAST_PREFIX: &str = "last_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogSelector {
    /// Most recent log whose dataset starts with this family name
    Last(String),

    /// An explicit log directory
    Path(PathBuf),
}

impl LogSelector {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(LAST_PREFIX) {
            Some(family) if !family.is_empty() => Self::Last(family.to_string()),
            _ => Self::Path(PathBuf::from(raw)),
        }
    }
}

impl std::fmt::Display for LogSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Last(family) => write!(f, "{LAST_PREFIX}{family}"),
            Self::Path(path)   => write!(f, "{}", path.display()),
        }
    }
}

/// True for directory names that look like training logs
pub fn is_log_name(name: &str) -> bool {
    name.starts_with(LOG_PREFIX)
}

/// Scan log names from newest to oldest and return the first one
/// whose dataset starts with `family`.
///
/// `dataset_of` loads the dataset name of a candidate; it is only
/// called until a match is found, and its errors abort the scan.
pub fn latest_matching<F>(
    names:          &[String],
    family:         &str,
    mut dataset_of: F,
) -> Result<Option<String>>
where
    F: FnMut(&str) -> Result<String>,
{
    let mut sorted: Vec<&String> = names.iter().filter(|n| is_log_name(n)).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    for name in sorted {
        let dataset = dataset_of(name)?;
        tracing::debug!("Candidate log '{}' was trained on '{}'", name, dataset);
        if dataset.starts_with(family) {
            return Ok(Some(name.clone()));
        }
    }

    Ok(None)
}
