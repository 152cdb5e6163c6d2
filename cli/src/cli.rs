//! CLI argument parsing with clap derive
//!
//! There are no subcommands: the binary always shows the interactive menu.
//! Each deployment input is a flag backed by an environment variable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::app::{AppContext, OutputFlags};
use crate::application::services::MenuOutcome;
use crate::domain::deployment::{
    DEFAULT_ORIGIN, DEFAULT_SERVICE_NAME, DEFAULT_TARGET_DIR, DEFAULT_UNIT_DIR,
};
use crate::domain::{DeployError, Deployment, DeploymentInputs, FileManifest};
use crate::output::TerminalReporter;

/// Install, update or remove the tg_birelay relay bot
#[derive(Parser, Debug)]
#[command(name = "birelay-deploy", version)]
pub struct Cli {
    /// Directory that holds the code, virtualenv, .env and database
    #[arg(long = "dir", env = "BIRELAY_DIR", default_value = DEFAULT_TARGET_DIR, value_name = "PATH")]
    pub target_dir: PathBuf,

    /// systemd service name
    #[arg(long = "service", env = "BIRELAY_SERVICE", default_value = DEFAULT_SERVICE_NAME, value_name = "NAME")]
    pub service_name: String,

    /// Base URL the package files are downloaded from
    #[arg(long, env = "BIRELAY_ORIGIN", default_value = DEFAULT_ORIGIN, value_name = "URL")]
    pub origin: String,

    /// Directory the unit file is written to
    #[arg(long, env = "BIRELAY_UNIT_DIR", default_value = DEFAULT_UNIT_DIR, value_name = "PATH", hide = true)]
    pub unit_dir: PathBuf,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}

impl Cli {
    /// The raw deployment inputs carried by the parsed arguments.
    #[must_use]
    pub fn inputs(&self) -> DeploymentInputs {
        DeploymentInputs {
            target_dir: self.target_dir.clone(),
            service_name: self.service_name.clone(),
            origin: self.origin.clone(),
            unit_dir: self.unit_dir.clone(),
        }
    }

    /// Resolve the deployment, show the menu, and run the chosen path.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs are invalid or the chosen path fails.
    pub async fn run(self) -> Result<()> {
        let cwd = std::env::current_dir().context("cannot determine working directory")?;
        let deployment = Deployment::resolve(self.inputs(), &cwd)?;
        let flags = OutputFlags {
            no_color: self.no_color,
            quiet: self.quiet,
        };
        let ctx = AppContext::new(&flags, deployment);
        let reporter = TerminalReporter::new(&ctx.output);

        let outcome = ctx
            .host()
            .dispatch(&ctx.deployment, &FileManifest::builtin(), &reporter)
            .await;
        reporter.clear();

        match outcome? {
            MenuOutcome::Installed(summary) => {
                ctx.output.install_summary(&ctx.deployment, &summary);
            }
            MenuOutcome::Uninstalled(report) => {
                ctx.output.teardown_summary(&ctx.deployment, &report);
            }
            MenuOutcome::Exited => tracing::debug!("exit selected"),
        }
        Ok(())
    }
}

/// Process exit status for a failed run.
///
/// Uses the first [`DeployError`] in the error chain, or `1` if there is none.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|e| e.downcast_ref::<DeployError>())
        .map_or(1, DeployError::exit_code)
}
