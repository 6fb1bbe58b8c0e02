// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Implementations of the Layer 3 traits and the process-wide
// concerns that don't belong to any one workflow step:
//
//   config_store.rs     — reads a log's parameters.txt into a
//                         LogConfig (ConfigStore)
//
//   activation_cache.rs — decides whether the top activations
//                         of a layer must be recomputed by
//                         inspecting visu/visu_<log>/top_activations
//
//   device.rs           — initialise-once GPU selection
//
//   external.rs         — spawns the activation computer and the
//                         viewer as external programs
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            std::process (Command, Stdio)

/// Log parameter file loading
pub mod config_store;

/// Cache-or-recompute decision for layer activations
pub mod activation_cache;

/// Process-wide device selection
pub mod device;

/// External program adapters for computation and display
pub mod external;
