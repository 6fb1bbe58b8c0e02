// ============================================================
// Layer 3 — Log Configuration Domain Type
// ============================================================
// The named parameters a training run recorded in its log.
//
// Only `dataset` is required by the orchestration core; every
// other parameter is kept verbatim so it can be forwarded to
// the activation computer, after the in-memory test overrides
// have been applied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters of one training run, as loaded by a ConfigStore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Dataset the run was trained on, e.g. "S3DIS" or "ShapeNetPart_chair"
    pub dataset: String,

    /// Every other recorded parameter, keyed by name
    #[serde(default)]
    pub params: BTreeMap<String, Value>,
}

impl LogConfig {
    pub fn new(dataset: impl Into<String>) -> Self {
        Self { dataset: dataset.into(), params: BTreeMap::new() }
    }

    /// Overwrite (or add) a single parameter in memory
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Number of loader threads; the training default is 8
    pub fn input_threads(&self) -> usize {
        self.get("input_threads")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(8)
    }

    /// Grid size of the first subsampling, if the log recorded one
    pub fn first_subsampling_dl(&self) -> Option<f64> {
        self.get("first_subsampling_dl").and_then(Value::as_f64)
    }

    /// Apply the inspection overrides before dataset/model construction
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        self.set("batch_num", overrides.batch_num);
        self.set("in_radius", overrides.in_radius);
        self.set("validation_size", overrides.validation_size);
    }
}

/// Parameters replaced for inspection runs.
/// Smaller batches and a fixed validation size keep a full
/// pass over the test split affordable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigOverrides {
    pub batch_num:       u64,
    pub in_radius:       f64,
    pub validation_size: u64,
}

impl Default for ConfigOverrides {
    fn default() -> Self {
        Self { batch_num: 3, in_radius: 4.0, validation_size: 200 }
    }
}
