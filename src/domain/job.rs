// ============================================================
// Layer 3 — Activation Job
// ============================================================
// The fully resolved request handed to an ActivationComputer:
// which log, which checkpoint, which dataset loader, which
// architecture, which layer, and which device to run on.
//
// It is serialisable so out-of-process computers can receive it
// as JSON.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::dataset::{Architecture, DatasetSpec};
use crate::domain::log_config::LogConfig;
use crate::domain::snapshot::Snapshot;

/// Process-wide device selection for external computation.
/// Installed once at start-up and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Value exported as CUDA_VISIBLE_DEVICES to the computer
    pub gpu_id: String,

    /// Value exported as TF_CPP_MIN_LOG_LEVEL (3 silences the backend)
    pub backend_log_level: u8,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self { gpu_id: "0".to_string(), backend_log_level: 3 }
    }
}

impl DeviceConfig {
    /// Environment variables a child process must run with
    pub fn env(&self) -> [(&'static str, String); 2] {
        [
            ("CUDA_VISIBLE_DEVICES", self.gpu_id.clone()),
            ("TF_CPP_MIN_LOG_LEVEL", self.backend_log_level.to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationJob {
    pub log_dir:      PathBuf,
    pub snapshot:     Snapshot,
    pub dataset:      DatasetSpec,
    pub architecture: Architecture,

    /// Layer to extract; None lets the computer choose
    pub relu:         Option<u32>,

    /// Log parameters with the inspection overrides applied
    pub config:       LogConfig,

    pub device:       DeviceConfig,
}
