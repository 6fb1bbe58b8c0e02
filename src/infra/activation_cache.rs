// ============================================================
// Layer 6 — Activation Cache
// ============================================================
// Computing top activations means a full pass over a test or
// validation split, so results are kept on disk and reused:
//
//   visu/
//     visu_<log-name>/
//       top_activations/
//         Relu00/  *.ply
//         Relu02/  *.ply
//
// The cache only decides; it never deletes or overwrites
// artifacts. That belongs to the activation computer.
//
// A directory that exists but holds no .ply file (an interrupted
// run, or a cleared layer) is reported as Partial so it can be
// told apart from true absence, and then recomputed exactly like
// an absent layer.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// Extension of the point-cloud artifacts written per layer
pub const ARTIFACT_EXTENSION: &str = "ply";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheState {
    /// The layer directory does not exist
    Absent,
    /// The layer directory exists but holds no artifact
    Partial,
    /// At least one artifact is available, sorted by path
    Present { artifacts: Vec<PathBuf> },
}

impl CacheState {
    pub fn is_present(&self) -> bool {
        matches!(self, CacheState::Present { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDecision {
    /// Whether the activation computer must run
    pub compute: bool,

    /// What was found on disk; None when no layer was requested
    pub state: Option<CacheState>,
}

pub struct ActivationCache {
    visu_root: PathBuf,
}

impl ActivationCache {
    pub fn new(visu_root: impl Into<PathBuf>) -> Self {
        Self { visu_root: visu_root.into() }
    }

    /// `<visu>/visu_<log-name>/top_activations/Relu<NN>`
    pub fn layer_dir(&self, log_dir: &Path, relu: u32) -> PathBuf {
        self.visu_root
            .join(format!("visu_{}", log_name(log_dir)))
            .join("top_activations")
            .join(format!("Relu{relu:02}"))
    }

    /// Inspect the artifact directory of one layer
    pub fn state(&self, log_dir: &Path, relu: u32) -> Result<CacheState> {
        let dir = self.layer_dir(log_dir, relu);
        if !dir.is_dir() {
            return Ok(CacheState::Absent);
        }

        let mut artifacts = Vec::new();
        for entry in fs::read_dir(&dir)
            .with_context(|| format!("Cannot read activation directory '{}'", dir.display()))?
        {
            let path = entry?.path();
            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(ARTIFACT_EXTENSION)
            {
                artifacts.push(path);
            }
        }

        if artifacts.is_empty() {
            return Ok(CacheState::Partial);
        }
        artifacts.sort();
        Ok(CacheState::Present { artifacts })
    }

    /// Decide whether activations must be (re)computed.
    ///
    /// An unset layer always recomputes, as does an explicit
    /// `recompute` request. Otherwise only a present layer is reused.
    pub fn decide(
        &self,
        log_dir:   &Path,
        relu:      Option<u32>,
        recompute: bool,
    ) -> Result<CacheDecision> {
        let Some(relu) = relu else {
            return Ok(CacheDecision { compute: true, state: None });
        };

        let state = self.state(log_dir, relu)?;
        if !state.is_present() {
            tracing::info!(
                "No activations found for Relu number {} of the model {}",
                relu,
                log_name(log_dir)
            );
        }

        Ok(CacheDecision { compute: recompute || !state.is_present(), state: Some(state) })
    }
}

/// Final path component of a log directory, e.g. "Log_2019-03-19_19-14-24"
pub fn log_name(log_dir: &Path) -> String {
    log_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| log_dir.display().to_string())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LOG: &str = "results/Log_X";

    fn cache_with(files: &[&str]) -> (TempDir, ActivationCache) {
        let visu  = TempDir::new().unwrap();
        let cache = ActivationCache::new(visu.path());
        let dir   = cache.layer_dir(Path::new(LOG), 2);
        fs::create_dir_all(&dir).unwrap();
        for f in files {
            fs::write(dir.join(f), b"ply\n").unwrap();
        }
        (visu, cache)
    }

    #[test]
    fn test_layer_dir_layout() {
        let cache = ActivationCache::new("visu");
        assert_eq!(
            cache.layer_dir(Path::new("results/Log_X"), 2),
            PathBuf::from("visu/visu_Log_X/top_activations/Relu02")
        );
        assert_eq!(
            cache.layer_dir(Path::new("results/Log_X/"), 13),
            PathBuf::from("visu/visu_Log_X/top_activations/Relu13")
        );
    }

    #[test]
    fn test_present_layer_is_reused() {
        let (_visu, cache) = cache_with(&["act_0.ply"]);
        let decision = cache.decide(Path::new(LOG), Some(2), false).unwrap();
        assert!(!decision.compute);
        assert!(matches!(decision.state, Some(CacheState::Present { ref artifacts }) if artifacts.len() == 1));
    }

    #[test]
    fn test_empty_directory_is_partial() {
        let (_visu, cache) = cache_with(&[]);
        let decision = cache.decide(Path::new(LOG), Some(2), false).unwrap();
        assert!(decision.compute);
        assert_eq!(decision.state, Some(CacheState::Partial));
    }

    #[test]
    fn test_foreign_files_do_not_count() {
        let (_visu, cache) = cache_with(&["notes.txt", "act_0.ply.tmp"]);
        assert_eq!(cache.state(Path::new(LOG), 2).unwrap(), CacheState::Partial);
    }

    #[test]
    fn test_missing_directory_is_absent() {
        let (_visu, cache) = cache_with(&["act_0.ply"]);
        let decision = cache.decide(Path::new(LOG), Some(3), false).unwrap();
        assert!(decision.compute);
        assert_eq!(decision.state, Some(CacheState::Absent));
    }

    #[test]
    fn test_unset_layer_always_computes() {
        let (_visu, cache) = cache_with(&["act_0.ply"]);
        let decision = cache.decide(Path::new(LOG), None, false).unwrap();
        assert!(decision.compute);
        assert_eq!(decision.state, None);
    }

    #[test]
    fn test_recompute_request_wins() {
        let (_visu, cache) = cache_with(&["act_0.ply"]);
        let decision = cache.decide(Path::new(LOG), Some(2), true).unwrap();
        assert!(decision.compute);
        assert!(decision.state.unwrap().is_present());
    }

    #[test]
    fn test_artifacts_are_sorted() {
        let (_visu, cache) = cache_with(&["b.ply", "a.ply", "c.ply"]);
        let CacheState::Present { artifacts } = cache.state(Path::new(LOG), 2).unwrap() else {
            panic!("expected present layer");
        };
        let names: Vec<_> = artifacts
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.ply", "b.ply", "c.ply"]);
    }
}
