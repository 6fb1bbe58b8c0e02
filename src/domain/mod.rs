// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits describing an inspection run:
// logs, snapshots, dataset families, the activation job and the
// errors the core can raise.
//
// Rules for this layer:
//   - NO file I/O or process spawning
//   - Only structs, enums, pure functions and traits
//
// Everything here is unit-testable without a results directory.

/// Typed failures of the orchestration core
pub mod error;

/// Dataset families, input pipelines and architectures
pub mod dataset;

/// Parameters recorded by a training run and the inspection overrides
pub mod log_config;

/// `last_<family>` / explicit path selection and the newest-match scan
pub mod log_selector;

/// Checkpoint step parsing and selection by rank
pub mod snapshot;

/// The resolved request sent to an activation computer
pub mod job;

/// Collaborator abstractions implemented in Layer 6
pub mod traits;
