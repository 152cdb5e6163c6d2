//! Application context: unified state passed to the menu dispatcher.
//!
//! `AppContext` owns the resolved `Deployment`, the output context, and one
//! production adapter per port. Everything is built once at start-up.

use crate::application::services::Host;
use crate::domain::Deployment;
use crate::infra::{
    AptPackageManager, DialoguerPrompter, EffectiveUid, HostFs, SystemctlServiceManager,
    TokioCommandRunner, UreqDownloader,
};
use crate::output::OutputContext;

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// The production `Host` type, spelled out once.
pub type ProductionHost<'a> = Host<
    'a,
    EffectiveUid,
    AptPackageManager<TokioCommandRunner>,
    UreqDownloader,
    TokioCommandRunner,
    DialoguerPrompter,
    SystemctlServiceManager<TokioCommandRunner>,
    HostFs,
>;

/// Unified application context.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// The deployment this run operates on.
    pub deployment: Deployment,
    privilege: EffectiveUid,
    packages: AptPackageManager<TokioCommandRunner>,
    downloader: UreqDownloader,
    runner: TokioCommandRunner,
    prompter: DialoguerPrompter,
    services: SystemctlServiceManager<TokioCommandRunner>,
    fs: HostFs,
}

impl AppContext {
    /// Construct an `AppContext` for `deployment` with production adapters.
    #[must_use]
    pub fn new(flags: &OutputFlags, deployment: Deployment) -> Self {
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            deployment,
            privilege: EffectiveUid,
            packages: AptPackageManager::default_runner(),
            downloader: UreqDownloader::default(),
            runner: TokioCommandRunner,
            prompter: DialoguerPrompter,
            services: SystemctlServiceManager::default_runner(),
            fs: HostFs,
        }
    }

    /// Borrow the adapters as an orchestrator `Host`.
    #[must_use]
    pub fn host(&self) -> ProductionHost<'_> {
        Host {
            privilege: &self.privilege,
            packages: &self.packages,
            downloader: &self.downloader,
            runner: &self.runner,
            prompter: &self.prompter,
            services: &self.services,
            fs: &self.fs,
        }
    }
}
