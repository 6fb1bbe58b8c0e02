// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `inspect`, `logs` and
// `snapshots`, and all their configurable flags.
//
// Log selection accepts either a `last_<dataset>` sentinel or a
// log directory path, e.g.
//   --log last_ShapeNetPart
//   --log results/Log_2019-03-19_19-14-24
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::inspect_use_case::InspectConfig;
use crate::domain::job::DeviceConfig;
use crate::domain::log_config::ConfigOverrides;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the top activations of a layer, computing them if needed
    Inspect(InspectArgs),

    /// List training logs, newest first, with their dataset
    Logs(LogsArgs),

    /// List the snapshots of a log
    Snapshots(SnapshotsArgs),
}

/// All arguments for the `inspect` command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Log to inspect: `last_<dataset>` or a log directory
    #[arg(long, default_value = "last_S3DIS")]
    pub log: String,

    /// Snapshot to restore by rank; negative counts from the last one
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    pub snapshot: i64,

    /// Layer (ReLU index) to visualise
    #[arg(long, default_value_t = 0)]
    pub relu: u32,

    /// Let the computer choose the layer; always recomputes
    #[arg(long, conflicts_with = "relu")]
    pub auto_relu: bool,

    /// Recompute activations even if cached ones exist
    #[arg(long)]
    pub recompute: bool,

    /// Directory holding the Log_* training directories
    #[arg(long, default_value = "results")]
    pub results_dir: String,

    /// Directory holding the cached activation artifacts
    #[arg(long, default_value = "visu")]
    pub visu_dir: String,

    /// Batch size used while computing activations
    #[arg(long, default_value_t = 3)]
    pub batch_num: u64,

    /// Radius of the input spheres
    #[arg(long, default_value_t = 4.0)]
    pub in_radius: f64,

    /// Number of validation steps
    #[arg(long, default_value_t = 200)]
    pub validation_size: u64,

    /// GPU the activation computer runs on
    #[arg(long, default_value = "0")]
    pub gpu: String,

    /// Backend log level exported to the computer (3 = errors only)
    #[arg(long, default_value_t = 3)]
    pub backend_log_level: u8,

    /// Program computing activations; receives the job as JSON on stdin
    #[arg(long)]
    pub compute_cmd: Option<String>,

    /// Program showing activations, called as `<cmd> <log_dir> <relu>`.
    /// Without it the cached artifacts are listed.
    #[arg(long)]
    pub show_cmd: Option<String>,
}

/// Convert CLI InspectArgs into the application-layer InspectConfig.
/// The application layer never sees clap types.
impl From<&InspectArgs> for InspectConfig {
    fn from(a: &InspectArgs) -> Self {
        InspectConfig {
            results_dir:    a.results_dir.clone(),
            visu_dir:       a.visu_dir.clone(),
            log:            a.log.clone(),
            snapshot_index: a.snapshot,
            relu:           (!a.auto_relu).then_some(a.relu),
            recompute:      a.recompute,
            overrides:      ConfigOverrides {
                batch_num:       a.batch_num,
                in_radius:       a.in_radius,
                validation_size: a.validation_size,
            },
            device:         DeviceConfig {
                gpu_id:            a.gpu.clone(),
                backend_log_level: a.backend_log_level,
            },
        }
    }
}

/// All arguments for the `logs` command
#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Directory holding the Log_* training directories
    #[arg(long, default_value = "results")]
    pub results_dir: String,

    /// Only list logs whose dataset starts with this name
    #[arg(long)]
    pub dataset: Option<String>,
}

/// All arguments for the `snapshots` command
#[derive(Args, Debug)]
pub struct SnapshotsArgs {
    /// Log to list: `last_<dataset>` or a log directory
    #[arg(long)]
    pub log: String,

    /// Index to mark as selected
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    pub snapshot: i64,

    /// Directory holding the Log_* training directories
    #[arg(long, default_value = "results")]
    pub results_dir: String,
}
