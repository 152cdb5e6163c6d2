//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `tokio`, `std::fs`, `std::process`, or `std::net`. All error types
//! implement `thiserror::Error` and convert to `anyhow::Error` via the `?`
//! operator.

use thiserror::Error;

/// Fatal failures of the install / uninstall state machine.
///
/// Variants carrying a `code` remember the exit status of the child process
/// that failed so the binary can terminate with the same status.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("This action must be run as root. Re-run with: sudo birelay-deploy")]
    NotElevated,

    #[error("failed to install package '{package}'{}", stderr_suffix(stderr))]
    PackageInstall {
        package: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to download {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("systemctl {action}{} failed{}", unit_suffix(unit), stderr_suffix(stderr))]
    ServiceManager {
        action: String,
        unit: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("'{program}' exited unsuccessfully{}", stderr_suffix(stderr))]
    Command {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("invalid service name '{0}': use letters, digits, '_', '-', '.', ':' or '@'")]
    InvalidServiceName(String),

    #[error("invalid target directory '{0}': must not be a filesystem root or contain '..'")]
    InvalidTargetDir(String),

    #[error("invalid origin URL '{0}': must start with http:// or https://")]
    InvalidOrigin(String),

    #[error("invalid manifest entry '{0}': must be a relative path without '..'")]
    InvalidManifestEntry(String),
}

impl DeployError {
    /// Process exit status for this failure.
    ///
    /// Privilege failures always map to `1`. Child-process failures reuse the
    /// child's exit status when it is known and non-zero.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PackageInstall { code, .. }
            | Self::ServiceManager { code, .. }
            | Self::Command { code, .. } => code.filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

fn unit_suffix(unit: &str) -> String {
    if unit.is_empty() {
        String::new()
    } else {
        format!(" {unit}")
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}
