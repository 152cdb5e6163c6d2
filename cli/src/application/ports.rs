//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`
//! or `crate::output`.

use std::path::Path;
use std::process::Output;

use anyhow::Result;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// No timeout is applied: package installs and `pip` downloads may take as
/// long as the network needs.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program to completion and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process cannot be spawned or awaited; a
    /// non-zero exit is reported through `Output::status`.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
}

// ── Host Capability Ports ─────────────────────────────────────────────────────

/// The host's package database and installer.
#[allow(async_fn_in_trait)]
pub trait PackageManager {
    /// Whether `package` is currently installed.
    async fn is_installed(&self, package: &str) -> Result<bool>;
    /// Refresh the package index.
    async fn refresh_index(&self) -> Result<()>;
    /// Install `package` without interactive questions.
    async fn install(&self, package: &str) -> Result<()>;
}

/// The host's service manager.
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    /// Re-read unit definitions from disk.
    async fn reload(&self) -> Result<()>;
    /// Enable `unit` for start at boot.
    async fn enable(&self, unit: &str) -> Result<()>;
    /// Start `unit` now.
    async fn start(&self, unit: &str) -> Result<()>;
    /// Stop `unit`.
    async fn stop(&self, unit: &str) -> Result<()>;
    /// Disable `unit` at boot.
    async fn disable(&self, unit: &str) -> Result<()>;
    /// Whether `unit` is currently active.
    async fn is_active(&self, unit: &str) -> Result<bool>;
}

/// Fetches a remote file.
#[allow(async_fn_in_trait)]
pub trait Downloader {
    /// Download `url` and return the response body.
    ///
    /// # Errors
    ///
    /// Fails on network errors and on any non-2xx response.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Interactive input on the controlling terminal.
pub trait Prompter {
    /// Show `items` as a numbered menu under `title` and return the raw answer.
    fn choose(&self, title: &str, items: &[(&str, &str)]) -> Result<String>;
    /// Ask for a visible line of text. An empty answer is returned as-is.
    fn ask(&self, prompt: &str) -> Result<String>;
    /// Ask for a value without echoing it. An empty answer is returned as-is.
    fn ask_secret(&self, prompt: &str) -> Result<String>;
}

/// Answers whether the process holds administrative rights.
pub trait PrivilegeProbe {
    fn is_elevated(&self) -> bool;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the local filesystem operations the orchestrator performs.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Remove a directory tree. Absent paths are not an error.
    fn remove_dir_all(&self, path: &Path) -> Result<bool>;
    /// Remove a file. Absent paths are not an error.
    fn remove_file(&self, path: &Path) -> Result<bool>;
    /// Create or truncate `path` with `contents`.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    /// Replace `path` atomically with `contents`, readable by the owner only.
    fn write_private(&self, path: &Path, contents: &[u8]) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
