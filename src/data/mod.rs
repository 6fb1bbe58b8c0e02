// ============================================================
// Layer 4 — Data Layer
// ============================================================
// Everything that reads the results tree of training runs, plus
// the registry deciding how a run's dataset must be loaded.
//
//   results/
//     Log_<timestamp>/
//       parameters.txt        (read by infra::config_store)
//       snapshots/
//         snap-<step>.meta
//
//   LogResolver       → which Log_<timestamp> to inspect
//   SnapshotResolver  → which snap-<step> to restore
//   Registry          → which dataset loader and input pipeline
//
// Reference: Rust Book §9 (Error Handling), §12 (I/O)

/// Ordered dataset-name prefix table
pub mod registry;

/// `last_<family>` and explicit-path resolution over the results root
pub mod log_resolver;

/// Checkpoint discovery and selection inside a log
pub mod snapshot_resolver;
