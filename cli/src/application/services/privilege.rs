//! Application service: administrative-rights gate.

use anyhow::Result;

use crate::application::ports::PrivilegeProbe;
use crate::domain::DeployError;

/// Fail with [`DeployError::NotElevated`] unless the process runs as root.
///
/// Called at the top of every mutating entry point, not once per process.
///
/// # Errors
///
/// Returns [`DeployError::NotElevated`] when the probe reports no
/// administrative rights.
pub fn require_elevated(probe: &impl PrivilegeProbe) -> Result<()> {
    if probe.is_elevated() {
        return Ok(());
    }
    tracing::warn!("refusing to continue without root privileges");
    Err(DeployError::NotElevated.into())
}
