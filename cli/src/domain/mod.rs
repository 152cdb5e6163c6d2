//! Domain layer: pure deployment types, rendering, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `crate::output`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod deployment;
pub mod env_file;
pub mod error;
pub mod manifest;
pub mod menu;
pub mod outcome;
pub mod unit;

pub use deployment::{Deployment, DeploymentInputs};
pub use env_file::{EnvKey, EnvironmentFile};
pub use error::DeployError;
pub use manifest::{FileManifest, REQUIRED_PACKAGES, RUNTIME_REQUIREMENTS};
pub use menu::MenuChoice;
pub use outcome::{FetchedFile, StepOutcome, TeardownReport};
pub use unit::ServiceUnitSpec;
