//! The resolved deployment description.
//!
//! Pure functions only: no I/O, no async, no filesystem access. The caller
//! supplies the working directory used to absolutize a relative target path.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::DeployError;

// ── Defaults ─────────────────────────────────────────────────────────────────

pub const DEFAULT_TARGET_DIR: &str = "/opt/tg_birelay";
pub const DEFAULT_SERVICE_NAME: &str = "tg_birelay";
pub const DEFAULT_ORIGIN: &str = "https://raw.githubusercontent.com/tg-birelay/tg_birelay/main";
pub const DEFAULT_UNIT_DIR: &str = "/etc/systemd/system";

/// Module launched with `python -m`.
pub const ENTRY_MODULE: &str = "tg_birelay.app";

/// Directory name of the virtual environment under the target directory.
pub const RUNTIME_DIR_NAME: &str = "venv";

/// File name of the environment file under the target directory.
pub const ENV_FILE_NAME: &str = ".env";

/// File name of the application's SQLite store under the target directory.
pub const DATABASE_FILE_NAME: &str = "tg_hosts.db";

/// systemd unit names: letters, digits and `:_.@-`.
static SERVICE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern; cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9:_.@-]{1,200}$").expect("valid regex")
});

// ── Types ────────────────────────────────────────────────────────────────────

/// Raw, unvalidated deployment inputs as read at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentInputs {
    pub target_dir: PathBuf,
    pub service_name: String,
    pub origin: String,
    pub unit_dir: PathBuf,
}

impl Default for DeploymentInputs {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            unit_dir: PathBuf::from(DEFAULT_UNIT_DIR),
        }
    }
}

/// Everything the orchestrator needs to know about one deployment.
///
/// Built once by [`Deployment::resolve`] and shared by reference with every
/// step; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    target_dir: PathBuf,
    service_name: String,
    origin: String,
    runtime_binary: PathBuf,
    entry_module: String,
    unit_dir: PathBuf,
}

impl Deployment {
    /// Validate `inputs` and resolve relative paths against `cwd`.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::InvalidServiceName`],
    /// [`DeployError::InvalidOrigin`] or [`DeployError::InvalidTargetDir`]
    /// when an input is malformed. A target directory that is a filesystem
    /// root or contains `..` is malformed.
    pub fn resolve(inputs: DeploymentInputs, cwd: &Path) -> Result<Self, DeployError> {
        let service_name = inputs
            .service_name
            .trim()
            .trim_end_matches(".service")
            .to_string();
        if !SERVICE_NAME_RE.is_match(&service_name) {
            return Err(DeployError::InvalidServiceName(inputs.service_name));
        }

        let origin = inputs.origin.trim().trim_end_matches('/').to_string();
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(DeployError::InvalidOrigin(inputs.origin));
        }

        let target_dir = absolutize(&inputs.target_dir, cwd);
        if target_dir.parent().is_none()
            || target_dir.components().any(|c| c == Component::ParentDir)
        {
            return Err(DeployError::InvalidTargetDir(
                inputs.target_dir.display().to_string(),
            ));
        }
        let unit_dir = absolutize(&inputs.unit_dir, cwd);
        let runtime_binary = target_dir.join(RUNTIME_DIR_NAME).join("bin").join("python");

        Ok(Self {
            target_dir,
            service_name,
            origin,
            runtime_binary,
            entry_module: ENTRY_MODULE.to_string(),
            unit_dir,
        })
    }

    #[must_use]
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Interpreter inside the virtual environment.
    #[must_use]
    pub fn runtime_binary(&self) -> &Path {
        &self.runtime_binary
    }

    #[must_use]
    pub fn entry_module(&self) -> &str {
        &self.entry_module
    }

    #[must_use]
    pub fn runtime_dir(&self) -> PathBuf {
        self.target_dir.join(RUNTIME_DIR_NAME)
    }

    /// `pip` inside the virtual environment.
    #[must_use]
    pub fn installer_binary(&self) -> PathBuf {
        self.runtime_dir().join("bin").join("pip")
    }

    #[must_use]
    pub fn env_file_path(&self) -> PathBuf {
        self.target_dir.join(ENV_FILE_NAME)
    }

    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.target_dir.join(DATABASE_FILE_NAME)
    }

    /// `<unit_dir>/<service>.service`
    #[must_use]
    pub fn unit_path(&self) -> PathBuf {
        self.unit_dir.join(format!("{}.service", self.service_name))
    }

    /// URL of a manifest entry on the origin.
    #[must_use]
    pub fn file_url(&self, relative: &str) -> String {
        format!("{}/{}", self.origin, relative.trim_start_matches('/'))
    }
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
