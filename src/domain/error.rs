// ============================================================
// Layer 3 — Core Error Taxonomy
// ============================================================
// Every failure the orchestration core can raise on its own.
// Failures coming from collaborators (config files, external
// programs) travel as anyhow::Error and are never rewrapped here.
//
// Each variant names the offending identifier (dataset name,
// log path, index) so a misconfigured run can be diagnosed
// from the message alone.
//
// Callers that need to branch on the kind of failure can use
//   err.downcast_ref::<InspectError>()
// on the anyhow::Error returned by the application layer.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectError {
    /// No log under the results root was trained on the requested dataset
    #[error("no log of the dataset \"{dataset}\" found in '{}'", .results_root.display())]
    NoMatchingLog {
        dataset:      String,
        results_root: PathBuf,
    },

    /// An explicitly given log path is not a directory
    #[error("the given log does not exist: '{}'", .path.display())]
    LogNotFound { path: PathBuf },

    /// The snapshot directory holds no parseable checkpoint
    #[error("no snapshot found in '{}'", .dir.display())]
    NoSnapshots { dir: PathBuf },

    /// Signed snapshot index outside `-count..count`
    #[error("snapshot index {index} is out of range for {count} snapshot(s)")]
    SnapshotIndexOutOfRange { index: i64, count: usize },

    /// The dataset name matches no registry prefix
    #[error("unsupported dataset: {name}")]
    UnsupportedDataset { name: String },

    /// The process-wide device selection was already installed with another value
    #[error("device already configured as GPU '{current}', refusing to switch to '{requested}'")]
    DeviceAlreadyConfigured { current: String, requested: String },

    /// An external collaborator program exited unsuccessfully
    #[error("external command '{program}' failed with {status}")]
    ExternalCommand { program: String, status: String },
}
