//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, HTTP
//! downloads, terminal prompts, and filesystem access.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::output` are forbidden.

pub mod apt;
pub mod command_runner;
pub mod download;
pub mod fs;
pub mod privilege;
pub mod prompt;
pub mod systemd;

pub use apt::AptPackageManager;
pub use command_runner::TokioCommandRunner;
pub use download::UreqDownloader;
pub use fs::HostFs;
pub use privilege::EffectiveUid;
pub use prompt::DialoguerPrompter;
pub use systemd::SystemctlServiceManager;
