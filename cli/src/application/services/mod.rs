//! Application services: use-case orchestration.
//!
//! Each service module implements one step of the install or uninstall path
//! by composing domain logic with port trait calls. Services import only
//! from `crate::domain` and `crate::application::ports`, never from
//! `crate::infra` or `crate::output`.

pub mod manifest_sync;
pub mod orchestrator;
pub mod packages;
pub mod privilege;
pub mod runtime;
pub mod secrets;
pub mod service_unit;
pub mod uninstall;

pub use orchestrator::{Host, InstallSummary, MenuOutcome};
