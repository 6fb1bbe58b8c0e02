// ============================================================
// Layer 5 — Model Layer
// ============================================================
// The networks themselves live with the external activation
// computer; this layer only decides which architecture a log's
// model must be rebuilt with before its snapshot is restored.
//
//   ModelNet40                                → KernelPointCnn
//   ShapeNetPart, S3DIS, Scannet, NPM3D,
//   Semantic3D                                → FgNet

/// Dataset family → architecture mapping
pub mod registry;
