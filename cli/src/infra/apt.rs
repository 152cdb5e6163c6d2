//! Infrastructure implementation of the `PackageManager` port for
//! Debian-family hosts.
//!
//! `AptPackageManager<R>` routes every `dpkg-query` / `apt-get` call through
//! a `CommandRunner` so tests can inject a recording runner.

use anyhow::Result;

use crate::application::ports::{CommandRunner, PackageManager};
use crate::domain::DeployError;
use crate::infra::command_runner::TokioCommandRunner;

/// `dpkg-query` status line of an installed package.
const INSTALLED_STATUS: &str = "install ok installed";

pub struct AptPackageManager<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> AptPackageManager<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl AptPackageManager<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner)
    }
}

impl<R: CommandRunner> PackageManager for AptPackageManager<R> {
    async fn is_installed(&self, package: &str) -> Result<bool> {
        let output = self
            .runner
            .run("dpkg-query", &["-W", "-f=${Status}", package])
            .await?;
        // dpkg-query exits 1 for packages it has never heard of.
        Ok(output.status.success()
            && String::from_utf8_lossy(&output.stdout).trim() == INSTALLED_STATUS)
    }

    async fn refresh_index(&self) -> Result<()> {
        let output = self.runner.run("apt-get", &["update"]).await?;
        if output.status.success() {
            return Ok(());
        }
        Err(DeployError::Command {
            program: "apt-get update".to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
        .into())
    }

    async fn install(&self, package: &str) -> Result<()> {
        let output = self
            .runner
            .run(
                "env",
                &[
                    "DEBIAN_FRONTEND=noninteractive",
                    "apt-get",
                    "install",
                    "-y",
                    package,
                ],
            )
            .await?;
        if output.status.success() {
            return Ok(());
        }
        Err(DeployError::PackageInstall {
            package: package.to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
        .into())
    }
}
