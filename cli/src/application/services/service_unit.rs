//! Application service: systemd unit registration.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{LocalFs, ProgressReporter, ServiceManager};
use crate::domain::ServiceUnitSpec;

/// Install `spec` at `unit_path`, reload systemd, enable and start the unit.
///
/// Not transactional: a failure after the reload leaves whatever state the
/// earlier sub-steps produced.
///
/// # Errors
///
/// Returns an error if the unit file cannot be written or any `systemctl`
/// call fails.
pub async fn register(
    spec: &ServiceUnitSpec,
    unit_path: &Path,
    services: &impl ServiceManager,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    if let Some(parent) = unit_path.parent() {
        fs.create_dir_all(parent)?;
    }
    fs.write(unit_path, spec.render().as_bytes())
        .with_context(|| format!("writing unit file {}", unit_path.display()))?;
    tracing::info!(unit = %unit_path.display(), "unit file written");

    reporter.step("Reloading systemd...");
    services.reload().await?;
    reporter.step(&format!("Enabling {}...", spec.name));
    services.enable(&spec.name).await?;
    reporter.step(&format!("Starting {}...", spec.name));
    services.start(&spec.name).await?;
    reporter.success(&format!("Service {} enabled and started", spec.name));
    Ok(())
}

/// Whether the unit reports active after registration.
///
/// Query failures count as not active.
pub async fn is_running(name: &str, services: &impl ServiceManager) -> bool {
    match services.is_active(name).await {
        Ok(active) => active,
        Err(e) => {
            tracing::debug!(error = %e, "is-active query failed");
            false
        }
    }
}
