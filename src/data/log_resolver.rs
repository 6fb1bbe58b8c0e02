// ============================================================
// Layer 4 — Log Resolver
// ============================================================
// Turns a LogSelector into a concrete log directory.
//
// For "last_<family>" the results root is listed, every
// `Log_*` directory is a candidate, and candidates are scanned
// from newest to oldest (see domain::log_selector::latest_matching)
// until one whose config records a matching dataset is found.
//
//   results/
//     Log_2019-01-01_10-00-00/   parameters.txt → dataset = S3DIS
//     Log_2019-02-01_10-00-00/   parameters.txt → dataset = ModelNet40
//     Log_2019-03-01_10-00-00/   parameters.txt → dataset = S3DIS_variant
//
//   last_S3DIS → results/Log_2019-03-01_10-00-00

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::domain::error::InspectError;
use crate::domain::log_selector::{is_log_name, latest_matching, LogSelector};
use crate::domain::traits::ConfigStore;

pub struct LogResolver<'a, C: ConfigStore + ?Sized> {
    results_root: PathBuf,
    store:        &'a C,
}

impl<'a, C: ConfigStore + ?Sized> LogResolver<'a, C> {
    pub fn new(results_root: impl Into<PathBuf>, store: &'a C) -> Self {
        Self { results_root: results_root.into(), store }
    }

    /// Names of every log directory under the results root, oldest first.
    /// A missing results root simply holds no logs.
    pub fn list_logs(&self) -> Result<Vec<String>> {
        if !self.results_root.exists() {
            tracing::warn!(
                "Results root '{}' does not exist",
                self.results_root.display()
            );
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.results_root).with_context(|| {
            format!("Cannot read results root '{}'", self.results_root.display())
        })? {
            let entry = entry?;
            // Follows symlinks so a linked log directory still counts
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if is_log_name(name) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    pub fn resolve(&self, selector: &LogSelector) -> Result<PathBuf> {
        match selector {
            LogSelector::Path(path) => {
                if !path.is_dir() {
                    return Err(InspectError::LogNotFound { path: path.clone() }.into());
                }
                Ok(path.clone())
            }
            LogSelector::Last(family) => {
                let names = self.list_logs()?;
                tracing::debug!(
                    "Scanning {} log(s) for the last '{}' run",
                    names.len(),
                    family
                );

                let found = latest_matching(&names, family, |name| {
                    self.store.dataset_of(&self.results_root.join(name))
                })?;

                let name = found.ok_or_else(|| InspectError::NoMatchingLog {
                    dataset:      family.clone(),
                    results_root: self.results_root.clone(),
                })?;

                let log_dir = self.results_root.join(name);
                tracing::info!("Last '{}' log is '{}'", family, log_dir.display());
                Ok(log_dir)
            }
        }
    }
}
