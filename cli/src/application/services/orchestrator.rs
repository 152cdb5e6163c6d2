//! Application service: the install / uninstall state machines and the
//! menu that routes between them.
//!
//! Each path is a fixed sequence of steps; the first error stops the run and
//! is returned unchanged. Nothing already done is rolled back.

use anyhow::Result;

use crate::application::ports::{
    CommandRunner, Downloader, LocalFs, PackageManager, PrivilegeProbe, ProgressReporter,
    Prompter, ServiceManager,
};
use crate::application::services::{
    manifest_sync, packages::PackageReconciler, privilege, runtime, secrets, service_unit,
    uninstall,
};
use crate::domain::menu::MENU_ITEMS;
use crate::domain::{
    Deployment, FetchedFile, FileManifest, MenuChoice, REQUIRED_PACKAGES, ServiceUnitSpec,
    StepOutcome, TeardownReport,
};

/// Host capabilities the orchestrator drives.
pub struct Host<'a, Pv, Pm, Dl, Rn, Pr, Sm, Fs> {
    pub privilege: &'a Pv,
    pub packages: &'a Pm,
    pub downloader: &'a Dl,
    pub runner: &'a Rn,
    pub prompter: &'a Pr,
    pub services: &'a Sm,
    pub fs: &'a Fs,
}

/// What an install did.
#[derive(Debug)]
pub struct InstallSummary {
    pub packages: Vec<(String, StepOutcome)>,
    pub files: Vec<FetchedFile>,
    pub runtime: StepOutcome,
    /// `systemctl is-active` answered yes after the start.
    pub running: bool,
}

/// What the menu ran.
#[derive(Debug)]
pub enum MenuOutcome {
    Installed(InstallSummary),
    Uninstalled(TeardownReport),
    Exited,
}

impl<Pv, Pm, Dl, Rn, Pr, Sm, Fs> Host<'_, Pv, Pm, Dl, Rn, Pr, Sm, Fs>
where
    Pv: PrivilegeProbe,
    Pm: PackageManager,
    Dl: Downloader,
    Rn: CommandRunner,
    Pr: Prompter,
    Sm: ServiceManager,
    Fs: LocalFs,
{
    /// Take the host from any state to a running service.
    ///
    /// privilege → packages → files → runtime → secrets → unit.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub async fn install(
        &self,
        deployment: &Deployment,
        manifest: &FileManifest,
        reporter: &impl ProgressReporter,
    ) -> Result<InstallSummary> {
        privilege::require_elevated(self.privilege)?;
        tracing::info!(target_dir = %deployment.target_dir().display(), "install started");

        let packages = PackageReconciler::new(self.packages)
            .ensure_all(REQUIRED_PACKAGES, reporter)
            .await?;

        self.fs.create_dir_all(deployment.target_dir())?;
        let files =
            manifest_sync::sync(manifest, deployment, self.downloader, self.fs, reporter).await?;

        let runtime = runtime::provision(deployment, self.runner, self.fs, reporter).await?;

        let env = secrets::collect(deployment, self.prompter)?;
        secrets::write_env_file(deployment, &env, self.fs, reporter)?;

        let spec = ServiceUnitSpec::for_deployment(deployment);
        service_unit::register(
            &spec,
            &deployment.unit_path(),
            self.services,
            self.fs,
            reporter,
        )
        .await?;
        let running = service_unit::is_running(&spec.name, self.services).await;

        tracing::info!(running, "install finished");
        Ok(InstallSummary {
            packages,
            files,
            runtime,
            running,
        })
    }

    /// Remove the service and the target directory.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::DeployError::NotElevated`] without root, or
    /// the teardown's error.
    pub async fn uninstall(
        &self,
        deployment: &Deployment,
        reporter: &impl ProgressReporter,
    ) -> Result<TeardownReport> {
        privilege::require_elevated(self.privilege)?;
        uninstall::teardown(deployment, self.services, self.fs, reporter).await
    }

    /// Show the main menu once and run the chosen path.
    ///
    /// # Errors
    ///
    /// Returns the prompter's error or the chosen path's error.
    pub async fn dispatch(
        &self,
        deployment: &Deployment,
        manifest: &FileManifest,
        reporter: &impl ProgressReporter,
    ) -> Result<MenuOutcome> {
        let title = format!("tg_birelay deployment ({})", deployment.service_name());
        let answer = self.prompter.choose(&title, MENU_ITEMS)?;
        match MenuChoice::parse(&answer) {
            MenuChoice::Install => self
                .install(deployment, manifest, reporter)
                .await
                .map(MenuOutcome::Installed),
            MenuChoice::Uninstall => self
                .uninstall(deployment, reporter)
                .await
                .map(MenuOutcome::Uninstalled),
            MenuChoice::Exit => Ok(MenuOutcome::Exited),
        }
    }
}
