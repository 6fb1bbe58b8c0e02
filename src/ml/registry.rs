// ============================================================
// Layer 5 — Model Registry
// ============================================================
// Chooses the network architecture a log's model is rebuilt with.
//
// Whole-object classification (ModelNet40) uses the KPCNN
// classifier. Every segmentation-style family, whether part,
// indoor scene, dense scene or outdoor scene, shares the
// fine-grained FGNet architecture.

use crate::domain::dataset::{Architecture, DatasetFamily};

pub fn architecture_for(family: DatasetFamily) -> Architecture {
    match family {
        DatasetFamily::ModelNet40 => Architecture::KernelPointCnn,
        DatasetFamily::ShapeNetPart
        | DatasetFamily::S3dis
        | DatasetFamily::Scannet
        | DatasetFamily::Npm3d
        | DatasetFamily::Semantic3d => Architecture::FgNet,
    }
}
