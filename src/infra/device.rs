// ============================================================
// Layer 6 — Device Selection
// ============================================================
// Guards the device selection against being changed once the
// CLI has fixed it. The value returned by `install` is what the
// activation job carries; the computer exports it to the child
// process it spawns. This process's environment is never touched.

use std::sync::OnceLock;

use anyhow::Result;

use crate::domain::error::InspectError;
use crate::domain::job::DeviceConfig;

static DEVICE: OnceLock<DeviceConfig> = OnceLock::new();

/// Fix the device selection and return the installed value.
///
/// Installing the same value again is a no-op; installing a
/// different one is refused.
pub fn install(config: DeviceConfig) -> Result<&'static DeviceConfig> {
    let installed = DEVICE.get_or_init(|| config.clone());
    if *installed != config {
        return Err(InspectError::DeviceAlreadyConfigured {
            current:   installed.gpu_id.clone(),
            requested: config.gpu_id,
        }
        .into());
    }

    tracing::debug!(
        "Device selection: GPU '{}', backend log level {}",
        installed.gpu_id,
        installed.backend_log_level
    );
    Ok(installed)
}
