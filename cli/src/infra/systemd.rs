//! Infrastructure implementation of the `ServiceManager` port via `systemctl`.

use anyhow::Result;

use crate::application::ports::{CommandRunner, ServiceManager};
use crate::domain::DeployError;
use crate::infra::command_runner::TokioCommandRunner;

pub struct SystemctlServiceManager<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> SystemctlServiceManager<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn systemctl(&self, action: &str, unit: Option<&str>) -> Result<()> {
        let mut args = vec![action];
        args.extend(unit);
        let output = self.runner.run("systemctl", &args).await?;
        if output.status.success() {
            return Ok(());
        }
        Err(DeployError::ServiceManager {
            action: action.to_string(),
            unit: unit.unwrap_or_default().to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
        .into())
    }
}

impl SystemctlServiceManager<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner)
    }
}

impl<R: CommandRunner> ServiceManager for SystemctlServiceManager<R> {
    async fn reload(&self) -> Result<()> {
        self.systemctl("daemon-reload", None).await
    }

    async fn enable(&self, unit: &str) -> Result<()> {
        self.systemctl("enable", Some(unit)).await
    }

    async fn start(&self, unit: &str) -> Result<()> {
        self.systemctl("start", Some(unit)).await
    }

    async fn stop(&self, unit: &str) -> Result<()> {
        self.systemctl("stop", Some(unit)).await
    }

    async fn disable(&self, unit: &str) -> Result<()> {
        self.systemctl("disable", Some(unit)).await
    }

    async fn is_active(&self, unit: &str) -> Result<bool> {
        let output = self
            .runner
            .run("systemctl", &["is-active", "--quiet", unit])
            .await?;
        Ok(output.status.success())
    }
}
