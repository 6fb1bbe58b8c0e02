// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Orchestrates one inspection run in order:
//
//   Step 1: Resolve the log directory      (Layer 4 - data)
//   Step 2: Check the activation cache     (Layer 6 - infra)
//   ── only when the cache cannot be used ──
//   Step 3: Load and override log config   (Layer 6 - infra)
//   Step 4: Dispatch dataset loader        (Layer 4 - data)
//   Step 5: Select the architecture        (Layer 5 - ml)
//   Step 6: Resolve the snapshot           (Layer 4 - data)
//   Step 7: Compute activations            (external)
//   ──────────────────────────────────────
//   Step 8: Show the activations           (external)
//
// The cache is consulted before anything else is loaded, so a
// cached layer is displayed without reading the log's config or
// snapshots at all.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{log_resolver::LogResolver, registry, snapshot_resolver};
use crate::domain::job::{ActivationJob, DeviceConfig};
use crate::domain::log_config::ConfigOverrides;
use crate::domain::log_selector::LogSelector;
use crate::domain::snapshot::Snapshot;
use crate::domain::traits::{ActivationComputer, ConfigStore, Visualizer};
use crate::infra::activation_cache::{ActivationCache, CacheState};
use crate::ml::registry::architecture_for;

// ─── Inspection Configuration ────────────────────────────────────────────────
// The four run parameters (log, snapshot index, layer, recompute)
// plus where to find results and artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectConfig {
    pub results_dir:    String,
    pub visu_dir:       String,
    pub log:            String,
    pub snapshot_index: i64,
    pub relu:           Option<u32>,
    pub recompute:      bool,
    pub overrides:      ConfigOverrides,
    pub device:         DeviceConfig,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            results_dir:    "results".to_string(),
            visu_dir:       "visu".to_string(),
            log:            "last_S3DIS".to_string(),
            snapshot_index: -1,
            relu:           Some(0),
            recompute:      false,
            overrides:      ConfigOverrides::default(),
            device:         DeviceConfig::default(),
        }
    }
}

/// What a run ended up doing
#[derive(Debug, Clone, PartialEq)]
pub struct InspectOutcome {
    pub log_dir: PathBuf,

    /// Layer that was shown
    pub relu: u32,

    /// Cache state found before the run; None when no layer was requested
    pub cache: Option<CacheState>,

    /// Snapshot restored, when activations were computed
    pub snapshot: Option<Snapshot>,
}

// ─── InspectUseCase ───────────────────────────────────────────────────────────
pub struct InspectUseCase<'a> {
    config:     InspectConfig,
    store:      &'a dyn ConfigStore,
    computer:   &'a dyn ActivationComputer,
    visualizer: &'a dyn Visualizer,
}

impl<'a> InspectUseCase<'a> {
    pub fn new(
        config:     InspectConfig,
        store:      &'a dyn ConfigStore,
        computer:   &'a dyn ActivationComputer,
        visualizer: &'a dyn Visualizer,
    ) -> Self {
        Self { config, store, computer, visualizer }
    }

    pub fn execute(&self) -> Result<InspectOutcome> {
        let cfg = &self.config;

        // ── Step 1: Resolve the log ───────────────────────────────────────────
        let selector = LogSelector::parse(&cfg.log);
        let log_dir  = LogResolver::new(&cfg.results_dir, self.store).resolve(&selector)?;
        tracing::info!("Inspecting log '{}'", log_dir.display());

        // ── Step 2: Cache-or-recompute decision ───────────────────────────────
        let cache    = ActivationCache::new(&cfg.visu_dir);
        let decision = cache.decide(&log_dir, cfg.relu, cfg.recompute)?;

        let (relu, snapshot) = match cfg.relu {
            Some(relu) if !decision.compute => {
                tracing::info!("Reusing cached activations of Relu{:02}", relu);
                (relu, None)
            }
            _ => {
                // ── Steps 3-6: Rebuild the job ─────────────────────────────────
                let job = self.prepare_job(log_dir.clone())?;
                let snapshot = job.snapshot.clone();

                // ── Step 7: Compute (external) ─────────────────────────────────
                tracing::info!("Start computing activations");
                let relu = self.computer.compute(&job)?;
                (relu, Some(snapshot))
            }
        };

        // ── Step 8: Show (external) ───────────────────────────────────────────
        self.visualizer.show(&log_dir, relu)?;

        Ok(InspectOutcome { log_dir, relu, cache: decision.state, snapshot })
    }

    fn prepare_job(&self, log_dir: PathBuf) -> Result<ActivationJob> {
        let cfg = &self.config;

        let mut config = self.store.load(&log_dir)?;
        config.apply(&cfg.overrides);

        let dataset      = registry::dispatch(&config.dataset)?;
        let architecture = architecture_for(dataset.family);
        tracing::info!(
            "Dataset '{}' ({:?} pipeline), model {:?}",
            dataset.name,
            dataset.init_mode,
            architecture
        );
        tracing::debug!(
            "Loader threads: {}, first subsampling: {:?}",
            config.input_threads(),
            config.first_subsampling_dl()
        );

        let snapshot = snapshot_resolver::resolve(&log_dir, cfg.snapshot_index)?;

        Ok(ActivationJob {
            log_dir,
            snapshot,
            dataset,
            architecture,
            relu: cfg.relu,
            config,
            device: cfg.device.clone(),
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;

    use serde_json::Value;
    use tempfile::TempDir;

    use crate::domain::dataset::{Architecture, InitMode};
    use crate::domain::error::InspectError;
    use crate::infra::config_store::{ParametersFile, PARAMETERS_FILE};

    /// Records every job and writes nothing
    struct RecordingComputer {
        jobs:    RefCell<Vec<ActivationJob>>,
        chooses: u32,
    }

    impl RecordingComputer {
        fn new(chooses: u32) -> Self {
            Self { jobs: RefCell::new(Vec::new()), chooses }
        }
    }

    impl ActivationComputer for RecordingComputer {
        fn compute(&self, job: &ActivationJob) -> Result<u32> {
            self.jobs.borrow_mut().push(job.clone());
            Ok(job.relu.unwrap_or(self.chooses))
        }
    }

    #[derive(Default)]
    struct RecordingVisualizer {
        shown: RefCell<Vec<(PathBuf, u32)>>,
    }

    impl Visualizer for RecordingVisualizer {
        fn show(&self, log_dir: &Path, relu: u32) -> Result<()> {
            self.shown.borrow_mut().push((log_dir.to_path_buf(), relu));
            Ok(())
        }
    }

    struct Workspace {
        root: TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            Self { root: TempDir::new().unwrap() }
        }

        fn results(&self) -> PathBuf {
            self.root.path().join("results")
        }

        fn visu(&self) -> PathBuf {
            self.root.path().join("visu")
        }

        fn add_log(&self, name: &str, dataset: Option<&str>, steps: &[u64]) -> PathBuf {
            let log = self.results().join(name);
            fs::create_dir_all(log.join("snapshots")).unwrap();
            if let Some(dataset) = dataset {
                fs::write(
                    log.join(PARAMETERS_FILE),
                    format!("dataset = {dataset}\nbatch_num = 16\ninput_threads = 4\n"),
                )
                .unwrap();
            }
            for step in steps {
                fs::write(log.join("snapshots").join(format!("snap-{step}.meta")), b"").unwrap();
            }
            log
        }

        fn cache_layer(&self, log: &str, relu: u32) {
            let dir = ActivationCache::new(self.visu()).layer_dir(Path::new(log), relu);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("act.ply"), b"ply\n").unwrap();
        }

        fn config(&self, log: &str, relu: Option<u32>) -> InspectConfig {
            InspectConfig {
                results_dir: self.results().display().to_string(),
                visu_dir:    self.visu().display().to_string(),
                log:         log.to_string(),
                relu,
                ..InspectConfig::default()
            }
        }
    }

    #[test]
    fn test_cache_miss_computes_resolved_job() {
        let ws = Workspace::new();
        ws.add_log("Log_2019-01-01", Some("ModelNet40"), &[50]);
        let log = ws.add_log("Log_2019-03-19", Some("S3DIS"), &[100, 4000, 2500]);

        let computer   = RecordingComputer::new(0);
        let visualizer = RecordingVisualizer::default();
        let store      = ParametersFile::default();
        let outcome = InspectUseCase::new(ws.config("last_S3DIS", Some(2)), &store, &computer, &visualizer)
            .execute()
            .unwrap();

        assert_eq!(outcome.log_dir, log);
        assert_eq!(outcome.cache, Some(CacheState::Absent));
        assert_eq!(outcome.snapshot.as_ref().map(|s| s.step), Some(4000));

        let jobs = computer.jobs.borrow();
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.architecture, Architecture::FgNet);
        assert_eq!(job.dataset.init_mode, InitMode::TrainValidation);
        assert_eq!(job.relu, Some(2));
        assert_eq!(job.config.get("batch_num"), Some(&Value::from(3)));
        assert_eq!(job.config.input_threads(), 4);

        assert_eq!(*visualizer.shown.borrow(), vec![(log, 2)]);
    }

    #[test]
    fn test_cache_hit_skips_config_and_computation() {
        let ws = Workspace::new();
        // No parameters file and no snapshot: neither may be needed
        let log = ws.add_log("Log_2019-03-19", None, &[]);
        ws.cache_layer("Log_2019-03-19", 0);

        let computer   = RecordingComputer::new(0);
        let visualizer = RecordingVisualizer::default();
        let store      = ParametersFile::default();
        let outcome = InspectUseCase::new(
            ws.config(&log.display().to_string(), Some(0)),
            &store,
            &computer,
            &visualizer,
        )
        .execute()
        .unwrap();

        assert!(computer.jobs.borrow().is_empty());
        assert!(outcome.snapshot.is_none());
        assert!(outcome.cache.unwrap().is_present());
        assert_eq!(*visualizer.shown.borrow(), vec![(log, 0)]);
    }

    #[test]
    fn test_recompute_overrides_cache() {
        let ws = Workspace::new();
        ws.add_log("Log_2019-03-19", Some("ShapeNetPart_chair"), &[10, 20]);
        ws.cache_layer("Log_2019-03-19", 1);

        let mut cfg = ws.config("last_ShapeNetPart", Some(1));
        cfg.recompute      = true;
        cfg.snapshot_index = 0;

        let computer   = RecordingComputer::new(0);
        let visualizer = RecordingVisualizer::default();
        let store      = ParametersFile::default();
        let outcome = InspectUseCase::new(cfg, &store, &computer, &visualizer).execute().unwrap();

        assert_eq!(outcome.snapshot.map(|s| s.step), Some(10));
        let jobs = computer.jobs.borrow();
        assert_eq!(jobs[0].dataset.category.as_deref(), Some("chair"));
        assert_eq!(jobs[0].dataset.init_mode, InitMode::Test);
    }

    #[test]
    fn test_unset_layer_shows_computed_choice() {
        let ws = Workspace::new();
        ws.add_log("Log_2019-03-19", Some("ModelNet40"), &[10]);

        let computer   = RecordingComputer::new(5);
        let visualizer = RecordingVisualizer::default();
        let store      = ParametersFile::default();
        let outcome = InspectUseCase::new(ws.config("last_ModelNet40", None), &store, &computer, &visualizer)
            .execute()
            .unwrap();

        assert_eq!(outcome.relu, 5);
        assert_eq!(outcome.cache, None);
        assert_eq!(computer.jobs.borrow()[0].architecture, Architecture::KernelPointCnn);
        assert_eq!(visualizer.shown.borrow()[0].1, 5);
    }

    #[test]
    fn test_unsupported_dataset_stops_before_computing() {
        let ws = Workspace::new();
        ws.add_log("Log_2019-03-19", Some("Foo"), &[10]);

        let computer   = RecordingComputer::new(0);
        let visualizer = RecordingVisualizer::default();
        let store      = ParametersFile::default();
        let err = InspectUseCase::new(ws.config("last_Foo", Some(0)), &store, &computer, &visualizer)
            .execute()
            .unwrap_err();

        match err.downcast_ref::<InspectError>() {
            Some(InspectError::UnsupportedDataset { name }) => assert_eq!(name, "Foo"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(computer.jobs.borrow().is_empty());
        assert!(visualizer.shown.borrow().is_empty());
    }

    #[test]
    fn test_missing_family_is_not_found() {
        let ws = Workspace::new();
        ws.add_log("Log_2019-03-19", Some("S3DIS"), &[10]);

        let computer   = RecordingComputer::new(0);
        let visualizer = RecordingVisualizer::default();
        let store      = ParametersFile::default();
        let err = InspectUseCase::new(ws.config("last_Semantic3D", Some(0)), &store, &computer, &visualizer)
            .execute()
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InspectError>(),
            Some(InspectError::NoMatchingLog { .. })
        ));
    }

    #[test]
    fn test_snapshot_index_out_of_range() {
        let ws = Workspace::new();
        ws.add_log("Log_2019-03-19", Some("S3DIS"), &[10, 20]);

        let mut cfg = ws.config("last_S3DIS", Some(0));
        cfg.snapshot_index = 2;

        let computer   = RecordingComputer::new(0);
        let visualizer = RecordingVisualizer::default();
        let store      = ParametersFile::default();
        let err = InspectUseCase::new(cfg, &store, &computer, &visualizer).execute().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InspectError>(),
            Some(InspectError::SnapshotIndexOutOfRange { index: 2, count: 2 })
        ));
    }
}
