//! Application service: isolated Python runtime provisioning.

use std::process::Output;

use anyhow::Result;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::domain::{Deployment, DeployError, RUNTIME_REQUIREMENTS, StepOutcome};

/// Interpreter used to create the virtual environment.
pub const SYSTEM_PYTHON: &str = "python3";

/// Create (or reuse) `<target>/venv`, upgrade `pip`, install the pinned libraries.
///
/// Returns [`StepOutcome::AlreadySatisfied`] when the environment directory
/// already existed. The library install runs every time.
///
/// # Errors
///
/// Returns [`DeployError::Command`] when `python3 -m venv` or either `pip`
/// invocation exits unsuccessfully.
pub async fn provision(
    deployment: &Deployment,
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
) -> Result<StepOutcome> {
    let runtime_dir = deployment.runtime_dir();
    let runtime_dir_arg = runtime_dir.display().to_string();

    let outcome = if fs.exists(&runtime_dir) {
        tracing::debug!(dir = %runtime_dir.display(), "reusing virtual environment");
        reporter.success("Reusing existing virtual environment");
        StepOutcome::AlreadySatisfied
    } else {
        reporter.step("Creating virtual environment...");
        run_checked(runner, SYSTEM_PYTHON, &["-m", "venv", &runtime_dir_arg]).await?;
        reporter.success(&format!("Created {runtime_dir_arg}"));
        StepOutcome::Applied
    };

    let pip = deployment.installer_binary().display().to_string();

    reporter.step("Upgrading pip...");
    run_checked(runner, &pip, &["install", "--upgrade", "pip"]).await?;

    reporter.step("Installing Python dependencies...");
    let mut args = vec!["install"];
    args.extend_from_slice(RUNTIME_REQUIREMENTS);
    run_checked(runner, &pip, &args).await?;
    reporter.success("Python dependencies installed");

    Ok(outcome)
}

async fn run_checked(runner: &impl CommandRunner, program: &str, args: &[&str]) -> Result<Output> {
    tracing::debug!(program, ?args, "running");
    let output = runner.run(program, args).await?;
    if output.status.success() {
        return Ok(output);
    }
    Err(DeployError::Command {
        program: program.to_string(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
    .into())
}
