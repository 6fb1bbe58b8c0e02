// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// goal: inspecting a trained model's activations, or listing
// what is available to inspect.
//
// Rules for this layer:
//   - No printing here (that's Layer 1)
//   - No direct directory walking (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern

// The log → cache → compute → show workflow
pub mod inspect_use_case;

// Log and snapshot listings
pub mod catalog_use_case;
