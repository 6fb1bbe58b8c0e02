// ============================================================
// Layer 3 — Dataset and Architecture Domain Types
// ============================================================
// The closed set of dataset families this tool knows how to
// inspect, and the two network architectures they map onto.
//
// Adding a family means adding a variant here; every `match`
// on DatasetFamily then fails to compile until the registries
// in Layer 4 (datasets) and Layer 5 (models) handle it.

use serde::{Deserialize, Serialize};

/// A named category of input data with its own loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetFamily {
    /// Whole-object classification
    ModelNet40,
    /// Indoor scene segmentation
    S3dis,
    /// Dense indoor scene segmentation
    Scannet,
    /// Object part segmentation, one category per log
    ShapeNetPart,
    /// Outdoor mobile-mapping segmentation
    Npm3d,
    /// Outdoor large-scale segmentation
    Semantic3d,
}

impl DatasetFamily {
    /// Name prefix dataset strings of this family start with
    pub fn prefix(self) -> &'static str {
        match self {
            DatasetFamily::ModelNet40   => "ModelNet40",
            DatasetFamily::S3dis        => "S3DIS",
            DatasetFamily::Scannet      => "Scannet",
            DatasetFamily::ShapeNetPart => "ShapeNetPart",
            DatasetFamily::Npm3d        => "NPM3D",
            DatasetFamily::Semantic3d   => "Semantic3D",
        }
    }
}

impl std::fmt::Display for DatasetFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Which input pipeline the dataset must be initialised with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitMode {
    /// Combined training + validation pipeline
    TrainValidation,
    /// Test split only
    Test,
}

/// Everything needed to construct the loader of a log's dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSpec {
    pub family: DatasetFamily,

    /// The full dataset name recorded in the log
    pub name: String,

    /// ShapeNetPart object category, e.g. "chair"
    pub category: Option<String>,

    /// Whether the loader must also load the unlabelled test clouds
    pub load_test: bool,

    pub init_mode: InitMode,
}

/// Network architecture used to rebuild a log's model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Architecture {
    /// Per-object classification network
    KernelPointCnn,
    /// Per-point (fine-grained) segmentation network
    FgNet,
}
