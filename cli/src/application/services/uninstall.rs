//! Application service: symmetric teardown of an install.

use anyhow::Result;

use crate::application::ports::{LocalFs, ProgressReporter, ServiceManager};
use crate::domain::{Deployment, TeardownReport};

/// Stop and disable the unit, remove its file, reload systemd, then delete
/// the target directory, including the application's database.
///
/// Safe on a host that was never installed: stop and disable failures are
/// ignored and absent paths are skipped.
///
/// # Errors
///
/// Returns an error if the reload fails or an existing path cannot be
/// removed.
pub async fn teardown(
    deployment: &Deployment,
    services: &impl ServiceManager,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
) -> Result<TeardownReport> {
    let name = deployment.service_name();
    let mut report = TeardownReport::default();

    reporter.step(&format!("Stopping {name}..."));
    match services.stop(name).await {
        Ok(()) => report.stopped = true,
        Err(e) => tracing::debug!(error = %e, "stop failed, ignoring"),
    }
    match services.disable(name).await {
        Ok(()) => report.disabled = true,
        Err(e) => tracing::debug!(error = %e, "disable failed, ignoring"),
    }

    report.unit_removed = fs.remove_file(&deployment.unit_path())?;
    services.reload().await?;

    reporter.step(&format!("Removing {}...", deployment.target_dir().display()));
    report.target_removed = fs.remove_dir_all(deployment.target_dir())?;

    tracing::info!(?report, "teardown finished");
    if report.was_clean() {
        reporter.success("Nothing was installed; host is clean");
    } else {
        reporter.success(&format!("Removed {name}"));
    }
    Ok(report)
}
