// ============================================================
// Layer 6 — External Collaborators
// ============================================================
// Adapters that hand the heavy lifting to other programs.
//
//   CommandComputer   — spawns the activation extraction program,
//                       writes the ActivationJob as JSON to its
//                       stdin and reads back the layer it produced
//                       (last non-empty stdout line).
//
//   CommandVisualizer — spawns a viewer as `<program> <log_dir> <relu>`.
//
//   ArtifactListing   — fallback viewer printing the cached .ply
//                       files of the layer, one per line.
//
//   CacheOnly         — stands in for the computer when no program
//                       is configured.
//
// The device selection is exported to the spawned computer only
// (CUDA_VISIBLE_DEVICES, TF_CPP_MIN_LOG_LEVEL).

use std::{
    io::{ErrorKind, Write},
    path::Path,
    process::{Command, Stdio},
};

use anyhow::{Context, Result};

use crate::domain::error::InspectError;
use crate::domain::job::ActivationJob;
use crate::domain::traits::{ActivationComputer, Visualizer};
use crate::infra::activation_cache::{ActivationCache, CacheState};

/// A program and its leading arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args:    Vec<String>,
}

impl CommandSpec {
    /// Split a command line on whitespace; None when it is blank
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self { program, args: words.collect() })
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    fn check(&self, status: std::process::ExitStatus) -> Result<()> {
        if status.success() {
            return Ok(());
        }
        Err(InspectError::ExternalCommand {
            program: self.program.clone(),
            status:  status.to_string(),
        }
        .into())
    }
}

// ─── CommandComputer ──────────────────────────────────────────────────────────
pub struct CommandComputer {
    spec: CommandSpec,
}

impl CommandComputer {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }
}

impl ActivationComputer for CommandComputer {
    fn compute(&self, job: &ActivationJob) -> Result<u32> {
        let payload = serde_json::to_vec(job)?;

        tracing::info!(
            "Running '{}' on snapshot step {} ({:?}, GPU '{}')",
            self.spec.program,
            job.snapshot.step,
            job.architecture,
            job.device.gpu_id
        );

        let mut child = self
            .spec
            .command()
            .envs(job.device.env())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Cannot start activation computer '{}'", self.spec.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A computer that exits without reading its job is judged by its status
            match stdin.write_all(&payload) {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                other => other?,
            }
        }

        let output = child.wait_with_output()?;
        self.spec.check(output.status)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        reported_layer(&stdout, job.relu).with_context(|| {
            format!("'{}' did not report which layer it computed", self.spec.program)
        })
    }
}

/// Layer index printed on the last non-empty line, else the requested one
fn reported_layer(stdout: &str, requested: Option<u32>) -> Option<u32> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .and_then(|l| l.parse().ok())
        .or(requested)
}

// ─── CacheOnly ────────────────────────────────────────────────────────────────
/// Computer used when no program is configured: cached layers can
/// still be shown, anything needing computation fails.
pub struct CacheOnly;

impl ActivationComputer for CacheOnly {
    fn compute(&self, job: &ActivationJob) -> Result<u32> {
        let layer = job.relu.map_or("an unset layer".to_string(), |r| format!("Relu{r:02}"));
        anyhow::bail!(
            "activations of {} for '{}' must be computed but no activation computer is configured",
            layer,
            job.log_dir.display()
        )
    }
}

// ─── CommandVisualizer ────────────────────────────────────────────────────────
pub struct CommandVisualizer {
    spec: CommandSpec,
}

impl CommandVisualizer {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }
}

impl Visualizer for CommandVisualizer {
    fn show(&self, log_dir: &Path, relu: u32) -> Result<()> {
        let status = self
            .spec
            .command()
            .arg(log_dir)
            .arg(relu.to_string())
            .stdin(Stdio::null())
            .status()
            .with_context(|| format!("Cannot start visualizer '{}'", self.spec.program))?;
        self.spec.check(status)
    }
}

// ─── ArtifactListing ──────────────────────────────────────────────────────────
pub struct ArtifactListing {
    cache: ActivationCache,
}

impl ArtifactListing {
    pub fn new(cache: ActivationCache) -> Self {
        Self { cache }
    }
}

impl Visualizer for ArtifactListing {
    fn show(&self, log_dir: &Path, relu: u32) -> Result<()> {
        match self.cache.state(log_dir, relu)? {
            CacheState::Present { artifacts } => {
                println!("Relu{relu:02} activations ({} file(s)):", artifacts.len());
                for path in artifacts {
                    println!("  {}", path.display());
                }
                Ok(())
            }
            CacheState::Absent | CacheState::Partial => anyhow::bail!(
                "no activation artifacts to show in '{}'",
                self.cache.layer_dir(log_dir, relu).display()
            ),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::domain::dataset::{Architecture, DatasetFamily, DatasetSpec, InitMode};
    use crate::domain::job::DeviceConfig;
    use crate::domain::log_config::LogConfig;
    use crate::domain::snapshot::Snapshot;

    fn job(relu: Option<u32>, gpu: &str) -> ActivationJob {
        ActivationJob {
            log_dir:      PathBuf::from("results/Log_X"),
            snapshot:     Snapshot { step: 4000, path: PathBuf::from("results/Log_X/snapshots/snap-4000") },
            dataset:      DatasetSpec {
                family:    DatasetFamily::S3dis,
                name:      "S3DIS".into(),
                category:  None,
                load_test: false,
                init_mode: InitMode::TrainValidation,
            },
            architecture: Architecture::FgNet,
            relu,
            config:       LogConfig::new("S3DIS"),
            device:       DeviceConfig { gpu_id: gpu.into(), backend_log_level: 3 },
        }
    }

    fn sh(script: &str) -> CommandSpec {
        CommandSpec { program: "sh".into(), args: vec!["-c".into(), script.into()] }
    }

    #[test]
    fn test_command_spec_parse() {
        let spec = CommandSpec::parse("python3 tools/visu.py --fast").unwrap();
        assert_eq!(spec.program, "python3");
        assert_eq!(spec.args, vec!["tools/visu.py", "--fast"]);
        assert_eq!(CommandSpec::parse("   "), None);
    }

    #[test]
    fn test_reported_layer() {
        assert_eq!(reported_layer("loading\n7\n\n", None), Some(7));
        assert_eq!(reported_layer("done\n", Some(2)), Some(2));
        assert_eq!(reported_layer("", None), None);
    }

    #[test]
    fn test_cache_only_refuses_to_compute() {
        let err = CacheOnly.compute(&job(Some(2), "0")).unwrap_err();
        assert!(err.to_string().contains("Relu02"));
        assert!(err.to_string().contains("Log_X"));
    }

    #[cfg(unix)]
    #[test]
    fn test_computer_reports_layer_and_receives_device() {
        let computer = CommandComputer::new(sh("cat > /dev/null; echo $CUDA_VISIBLE_DEVICES"));
        assert_eq!(computer.compute(&job(None, "5")).unwrap(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_computer_receives_job_json() {
        let computer = CommandComputer::new(sh("grep -q '\"FgNet\"' && echo 4"));
        assert_eq!(computer.compute(&job(Some(4), "0")).unwrap(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_computer_failure_is_typed() {
        let computer = CommandComputer::new(sh("cat > /dev/null; exit 3"));
        let err = computer.compute(&job(Some(0), "0")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InspectError>(),
            Some(InspectError::ExternalCommand { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_visualizer_passes_log_and_layer() {
        // sh -c 'script' binds the next argument to $0
        let mut spec = sh("test \"$1\" = results/Log_X && test \"$2\" = 3");
        spec.args.push("sh".into());
        let viz = CommandVisualizer::new(spec);
        assert!(viz.show(Path::new("results/Log_X"), 3).is_ok());
        assert!(viz.show(Path::new("results/Log_Y"), 3).is_err());
    }

    #[test]
    fn test_listing_requires_artifacts() {
        let visu = tempfile::TempDir::new().unwrap();
        let listing = ArtifactListing::new(ActivationCache::new(visu.path()));
        assert!(listing.show(Path::new("results/Log_X"), 1).is_err());

        let dir = ActivationCache::new(visu.path()).layer_dir(Path::new("results/Log_X"), 1);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.ply"), b"ply\n").unwrap();
        assert!(listing.show(Path::new("results/Log_X"), 1).is_ok());
    }
}
