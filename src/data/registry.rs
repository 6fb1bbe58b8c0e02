// ============================================================
// Layer 4 — Dataset Registry
// ============================================================
// Maps the dataset name recorded in a log onto the loader that
// must be constructed for it.
//
// The table below is tested top to bottom, first match wins.
// Matching is a case-sensitive prefix test, so a log trained on
// "ModelNet40_aligned" still dispatches to the ModelNet40 loader.
//
//   prefix         loader options         input pipeline
//   ────────────   ────────────────────   ────────────────
//   ModelNet40     -                      test
//   S3DIS          -                      train + validation
//   Scannet        load_test              test
//   ShapeNetPart   second '_' token       test
//   NPM3D          load_test              test
//   Semantic3D     -                      test
//
// No prefix is a prefix of another entry, so at most one row can
// ever match a name. A name that matches nothing is an error.

use crate::domain::dataset::{DatasetFamily, DatasetSpec, InitMode};
use crate::domain::error::InspectError;

/// Dispatch order of the registry
pub const REGISTRY: [DatasetFamily; 6] = [
    DatasetFamily::ModelNet40,
    DatasetFamily::S3dis,
    DatasetFamily::Scannet,
    DatasetFamily::ShapeNetPart,
    DatasetFamily::Npm3d,
    DatasetFamily::Semantic3d,
];

/// Find the family whose prefix starts `name`
pub fn family_of(name: &str) -> Result<DatasetFamily, InspectError> {
    REGISTRY
        .iter()
        .copied()
        .find(|family| name.starts_with(family.prefix()))
        .ok_or_else(|| InspectError::UnsupportedDataset { name: name.to_string() })
}

/// Only S3DIS is inspected through its training/validation pipeline
pub fn init_mode(family: DatasetFamily) -> InitMode {
    match family {
        DatasetFamily::S3dis => InitMode::TrainValidation,
        DatasetFamily::ModelNet40
        | DatasetFamily::Scannet
        | DatasetFamily::ShapeNetPart
        | DatasetFamily::Npm3d
        | DatasetFamily::Semantic3d => InitMode::Test,
    }
}

/// Resolve a dataset name into its loader description
pub fn dispatch(name: &str) -> Result<DatasetSpec, InspectError> {
    let family = family_of(name)?;

    let category = match family {
        DatasetFamily::ShapeNetPart => name
            .split('_')
            .nth(1)
            .filter(|category| !category.is_empty())
            .map(str::to_string),
        _ => None,
    };

    let load_test = matches!(family, DatasetFamily::Scannet | DatasetFamily::Npm3d);

    let spec = DatasetSpec {
        family,
        name: name.to_string(),
        category,
        load_test,
        init_mode: init_mode(family),
    };
    tracing::debug!("Dataset '{}' dispatched to {:?}", name, spec);
    Ok(spec)
}
