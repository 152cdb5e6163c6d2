//! Application service: OS prerequisite reconciliation.

use anyhow::Result;

use crate::application::ports::{PackageManager, ProgressReporter};
use crate::domain::StepOutcome;

/// Installs missing OS packages, refreshing the package index at most once
/// per reconciler.
pub struct PackageReconciler<'a, P> {
    packages: &'a P,
    index_refreshed: bool,
}

impl<'a, P: PackageManager> PackageReconciler<'a, P> {
    #[must_use]
    pub fn new(packages: &'a P) -> Self {
        Self {
            packages,
            index_refreshed: false,
        }
    }

    /// Make sure `package` is installed.
    ///
    /// Present packages cause no refresh and no install. The first missing
    /// package triggers one index refresh; a failed refresh is reported and
    /// the install is attempted anyway.
    ///
    /// # Errors
    ///
    /// Returns an error if the package database cannot be queried or the
    /// install fails.
    pub async fn ensure(
        &mut self,
        package: &str,
        reporter: &impl ProgressReporter,
    ) -> Result<StepOutcome> {
        if self.packages.is_installed(package).await? {
            tracing::debug!(package, "package already installed");
            return Ok(StepOutcome::AlreadySatisfied);
        }

        if !self.index_refreshed {
            self.index_refreshed = true;
            reporter.step("Refreshing package index...");
            match self.packages.refresh_index().await {
                Ok(()) => tracing::debug!("package index refreshed"),
                Err(e) => {
                    tracing::warn!(error = %e, "package index refresh failed");
                    reporter.warn(&format!("Package index refresh failed, continuing: {e}"));
                }
            }
        }

        reporter.step(&format!("Installing {package}..."));
        self.packages.install(package).await?;
        tracing::info!(package, "package installed");
        reporter.success(&format!("Installed {package}"));
        Ok(StepOutcome::Applied)
    }

    /// [`ensure`](Self::ensure) each package in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Propagates the first failing [`ensure`](Self::ensure).
    pub async fn ensure_all(
        &mut self,
        packages: &[&str],
        reporter: &impl ProgressReporter,
    ) -> Result<Vec<(String, StepOutcome)>> {
        let mut outcomes = Vec::with_capacity(packages.len());
        for package in packages {
            let outcome = self.ensure(package, reporter).await?;
            outcomes.push(((*package).to_string(), outcome));
        }
        Ok(outcomes)
    }
}
