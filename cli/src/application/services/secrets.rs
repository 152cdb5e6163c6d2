//! Application service: interactive secret collection and the `.env` file.

use anyhow::{Context, Result};

use crate::application::ports::{LocalFs, ProgressReporter, Prompter};
use crate::domain::{Deployment, EnvKey, EnvironmentFile};

pub const TOKEN_PROMPT: &str = "Manager bot token (MANAGER_TOKEN)";
pub const TOKEN_RETRY_PROMPT: &str = "The token cannot be empty. Manager bot token (MANAGER_TOKEN)";
pub const ADMIN_CHANNEL_PROMPT: &str =
    "Admin notification chat or channel (ADMIN_CHANNEL, leave empty to skip)";

/// Prompt for the values written to `.env`.
///
/// The token prompt repeats, with [`TOKEN_RETRY_PROMPT`], until a non-blank
/// answer is given; there is no attempt limit. The admin channel is asked
/// once and left out of the file when blank. `DATABASE_PATH` always points
/// into the target directory.
///
/// # Errors
///
/// Returns an error only when the prompter itself fails (for example, the
/// terminal was closed).
pub fn collect(deployment: &Deployment, prompter: &impl Prompter) -> Result<EnvironmentFile> {
    let mut env = EnvironmentFile::new();

    let mut answer = prompter.ask_secret(TOKEN_PROMPT)?;
    while answer.trim().is_empty() {
        tracing::debug!("empty token rejected");
        answer = prompter.ask_secret(TOKEN_RETRY_PROMPT)?;
    }
    env.set(EnvKey::ManagerToken, answer.trim());

    let channel = prompter.ask(ADMIN_CHANNEL_PROMPT)?;
    if !channel.trim().is_empty() {
        env.set(EnvKey::AdminChannel, channel.trim());
    }

    env.set(
        EnvKey::DatabasePath,
        deployment.database_path().display().to_string(),
    );
    Ok(env)
}

/// Replace `<target>/.env` with `env`, readable by root only.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_env_file(
    deployment: &Deployment,
    env: &EnvironmentFile,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    let path = deployment.env_file_path();
    fs.write_private(&path, env.render().as_bytes())
        .with_context(|| format!("writing environment file {}", path.display()))?;
    tracing::info!(path = %path.display(), "environment file written");
    reporter.success(&format!("Wrote {}", path.display()));
    Ok(())
}
