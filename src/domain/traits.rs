// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The heavy lifting of an inspection run happens outside this
// crate: reading a log's parameter file, running the network
// over a test split, and rendering point clouds. Each of those
// collaborators sits behind a trait so the orchestration in
// Layer 2 can be exercised with in-memory doubles.
//
// Implementations:
//   - ParametersFile     → ConfigStore          (infra::config_store)
//   - CommandComputer    → ActivationComputer   (infra::external)
//   - CommandVisualizer  → Visualizer           (infra::external)
//   - ArtifactListing    → Visualizer           (infra::external)

use std::path::Path;

use anyhow::Result;

use crate::domain::job::ActivationJob;
use crate::domain::log_config::LogConfig;

// ─── ConfigStore ──────────────────────────────────────────────────────────────
/// Loads the parameters a training run recorded in its log directory.
pub trait ConfigStore {
    fn load(&self, log_dir: &Path) -> Result<LogConfig>;

    /// Shortcut used while scanning logs for a dataset family
    fn dataset_of(&self, log_dir: &Path) -> Result<String> {
        Ok(self.load(log_dir)?.dataset)
    }
}

// ─── ActivationComputer ───────────────────────────────────────────────────────
/// Runs the restored model over the dataset and writes the top
/// activation artifacts of a layer to the visu directory.
pub trait ActivationComputer {
    /// Returns the layer index the artifacts were written for.
    /// Stale artifacts of that layer are the computer's to replace.
    fn compute(&self, job: &ActivationJob) -> Result<u32>;
}

// ─── Visualizer ───────────────────────────────────────────────────────────────
/// Displays the cached activation artifacts of one layer.
pub trait Visualizer {
    fn show(&self, log_dir: &Path, relu: u32) -> Result<()>;
}
