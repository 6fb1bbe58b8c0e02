// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, wires the concrete collaborators together, and prints
// results. All workflow logic is delegated to Layer 2.
//
// Three commands are supported:
//   1. `inspect`   — reuse or compute a layer's activations, then show them
//   2. `logs`      — list training logs and their datasets
//   3. `snapshots` — list the checkpoints of a log
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs, LogsArgs, SnapshotsArgs};

use crate::application::catalog_use_case::{list_logs, list_snapshots};
use crate::application::inspect_use_case::{InspectConfig, InspectUseCase};
use crate::data::log_resolver::LogResolver;
use crate::domain::log_selector::LogSelector;
use crate::domain::traits::{ActivationComputer, Visualizer};
use crate::infra::activation_cache::{ActivationCache, CacheState};
use crate::infra::config_store::ParametersFile;
use crate::infra::device;
use crate::infra::external::{
    ArtifactListing, CacheOnly, CommandComputer, CommandSpec, CommandVisualizer,
};

#[derive(Parser, Debug)]
#[command(
    name = "kpconv-visu",
    version,
    about = "Show the top layer activations of a trained point-cloud model, computing them when they are not cached."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Inspect(args)   => run_inspect(&args),
            Commands::Logs(args)      => run_logs(&args),
            Commands::Snapshots(args) => run_snapshots(&args),
        }
    }
}

fn run_inspect(args: &InspectArgs) -> Result<()> {
    let mut config = InspectConfig::from(args);

    // Device selection is fixed for the rest of the process
    config.device = device::install(config.device.clone())?.clone();

    let store = ParametersFile::default();

    let computer: Box<dyn ActivationComputer> =
        match args.compute_cmd.as_deref().and_then(CommandSpec::parse) {
            Some(spec) => Box::new(CommandComputer::new(spec)),
            None       => Box::new(CacheOnly),
        };

    let visualizer: Box<dyn Visualizer> =
        match args.show_cmd.as_deref().and_then(CommandSpec::parse) {
            Some(spec) => Box::new(CommandVisualizer::new(spec)),
            None       => Box::new(ArtifactListing::new(ActivationCache::new(&config.visu_dir))),
        };

    let outcome =
        InspectUseCase::new(config, &store, computer.as_ref(), visualizer.as_ref()).execute()?;

    if let Some(CacheState::Partial) = outcome.cache {
        println!("Found an activation directory without artifacts, recomputed it");
    }
    match &outcome.snapshot {
        Some(snap) => println!(
            "Computed and showed Relu{:02} of '{}' from snapshot {}",
            outcome.relu,
            outcome.log_dir.display(),
            snap.step
        ),
        None => println!(
            "Showed cached Relu{:02} of '{}'",
            outcome.relu,
            outcome.log_dir.display()
        ),
    }
    Ok(())
}

fn run_logs(args: &LogsArgs) -> Result<()> {
    let store = ParametersFile::default();
    let logs  = list_logs(Path::new(&args.results_dir), &store, args.dataset.as_deref())?;

    if logs.is_empty() {
        println!("No logs found in '{}'", args.results_dir);
    }
    for log in logs {
        println!("{}  {}", log.name, log.dataset.as_deref().unwrap_or("?"));
    }
    Ok(())
}

fn run_snapshots(args: &SnapshotsArgs) -> Result<()> {
    let store   = ParametersFile::default();
    let log_dir = LogResolver::new(&args.results_dir, &store)
        .resolve(&LogSelector::parse(&args.log))?;

    let listing = list_snapshots(&log_dir, args.snapshot)?;
    println!("{} snapshot(s) in '{}'", listing.steps.len(), log_dir.display());
    for step in &listing.steps {
        let marker = if Some(*step) == listing.selected { "*" } else { " " };
        println!("{marker} {step}");
    }
    if listing.selected.is_none() && !listing.steps.is_empty() {
        println!("(index {} selects no snapshot)", args.snapshot);
    }
    Ok(())
}
