//! In-memory fakes for every host capability port.
//!
//! Each fake records the calls it receives so tests can assert on ordering
//! and on what was *not* called.

#![allow(dead_code, clippy::expect_used)]

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use birelay_deploy::application::ports::{
    CommandRunner, Downloader, PackageManager, PrivilegeProbe, ProgressReporter, Prompter,
    ServiceManager,
};
use birelay_deploy::domain::{DeployError, Deployment, DeploymentInputs};
use tempfile::TempDir;

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Deployment in a temp dir ─────────────────────────────────────────────────

/// A deployment whose target and unit directories live under a temp dir.
pub struct Sandbox {
    pub dir: TempDir,
    pub deployment: Deployment,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let deployment = Deployment::resolve(
            DeploymentInputs {
                target_dir: dir.path().join("tg_birelay"),
                unit_dir: dir.path().join("systemd"),
                origin: "https://origin.test/pkg".into(),
                ..DeploymentInputs::default()
            },
            dir.path(),
        )
        .expect("valid deployment");
        Self { dir, deployment }
    }

    pub fn target(&self) -> &Path {
        self.deployment.target_dir()
    }

    pub fn unit_path(&self) -> PathBuf {
        self.deployment.unit_path()
    }
}

// ── CommandRunner ────────────────────────────────────────────────────────────

type Responder = dyn Fn(&str, &[&str]) -> Result<Output> + Send + Sync;

/// A `CommandRunner` that records every `(program, args)` call and answers
/// through a configurable responder.
#[derive(Clone)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    responder: Arc<Responder>,
}

impl RecordingRunner {
    pub fn new(responder: impl Fn(&str, &[&str]) -> Result<Output> + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(responder),
        }
    }

    /// Every command succeeds with empty output.
    pub fn ok() -> Self {
        Self::new(|_, _| Ok(ok_output(b"")))
    }

    /// Succeeds, and makes `python3 -m venv <dir>` create `<dir>/bin`.
    pub fn creating_venv() -> Self {
        Self::new(|program, args| {
            if program == "python3" {
                if let Some(dir) = args.last() {
                    std::fs::create_dir_all(Path::new(dir).join("bin"))?;
                }
            }
            Ok(ok_output(b""))
        })
    }

    /// Fails with `code` whenever `program` is run; everything else succeeds.
    pub fn failing(program: &'static str, code: i32) -> Self {
        Self::new(move |p, _| {
            if p == program {
                Ok(err_output(code, b"simulated failure"))
            } else {
                Ok(ok_output(b""))
            }
        })
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().expect("mutex poisoned").clone()
    }

    /// Calls rendered as `program arg arg...`.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|(p, args)| std::iter::once(p).chain(args).collect::<Vec<_>>().join(" "))
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.calls.lock().expect("mutex poisoned").push((
            program.to_owned(),
            args.iter().map(ToString::to_string).collect(),
        ));
        (self.responder)(program, args)
    }
}

// ── PackageManager ───────────────────────────────────────────────────────────

/// In-memory package database.
#[derive(Default)]
pub struct FakePackages {
    pub installed: RefCell<HashSet<String>>,
    pub log: RefCell<Vec<String>>,
    pub refresh_fails: bool,
    pub broken: Option<&'static str>,
}

impl FakePackages {
    pub fn with_installed(packages: &[&str]) -> Self {
        Self {
            installed: RefCell::new(packages.iter().map(ToString::to_string).collect()),
            ..Self::default()
        }
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn mutations(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .filter(|e| !e.starts_with("query "))
            .collect()
    }

    pub fn is_present(&self, package: &str) -> bool {
        self.installed.borrow().contains(package)
    }
}

impl PackageManager for FakePackages {
    async fn is_installed(&self, package: &str) -> Result<bool> {
        self.log.borrow_mut().push(format!("query {package}"));
        Ok(self.installed.borrow().contains(package))
    }

    async fn refresh_index(&self) -> Result<()> {
        self.log.borrow_mut().push("refresh".to_string());
        if self.refresh_fails {
            bail!("mirror unreachable");
        }
        Ok(())
    }

    async fn install(&self, package: &str) -> Result<()> {
        self.log.borrow_mut().push(format!("install {package}"));
        if self.broken == Some(package) {
            return Err(DeployError::PackageInstall {
                package: package.to_string(),
                code: Some(100),
                stderr: "E: Unable to locate package".to_string(),
            }
            .into());
        }
        self.installed.borrow_mut().insert(package.to_string());
        Ok(())
    }
}

// ── ServiceManager ───────────────────────────────────────────────────────────

/// In-memory systemd: tracks enabled/active units and the reload count.
#[derive(Default)]
pub struct FakeServices {
    pub enabled: RefCell<BTreeSet<String>>,
    pub active: RefCell<BTreeSet<String>>,
    pub reloads: RefCell<u32>,
    pub log: RefCell<Vec<String>>,
    /// Action name (`"start"`, `"reload"`, ...) that fails with exit code 5.
    pub fail_on: Option<&'static str>,
    /// `is-active` keeps answering no even after a start.
    pub never_active: bool,
}

impl FakeServices {
    pub fn running(unit: &str) -> Self {
        let fake = Self::default();
        fake.enabled.borrow_mut().insert(unit.to_string());
        fake.active.borrow_mut().insert(unit.to_string());
        fake
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn record(&self, action: &str, unit: &str) -> Result<()> {
        self.log.borrow_mut().push(format!("{action} {unit}").trim().to_string());
        if self.fail_on == Some(action) {
            return Err(DeployError::ServiceManager {
                action: action.to_string(),
                unit: unit.to_string(),
                code: Some(5),
                stderr: "simulated failure".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl ServiceManager for FakeServices {
    async fn reload(&self) -> Result<()> {
        self.record("reload", "")?;
        *self.reloads.borrow_mut() += 1;
        Ok(())
    }

    async fn enable(&self, unit: &str) -> Result<()> {
        self.record("enable", unit)?;
        self.enabled.borrow_mut().insert(unit.to_string());
        Ok(())
    }

    async fn start(&self, unit: &str) -> Result<()> {
        self.record("start", unit)?;
        self.active.borrow_mut().insert(unit.to_string());
        Ok(())
    }

    async fn stop(&self, unit: &str) -> Result<()> {
        self.record("stop", unit)?;
        if !self.active.borrow_mut().remove(unit) {
            bail!("Unit {unit}.service not loaded.");
        }
        Ok(())
    }

    async fn disable(&self, unit: &str) -> Result<()> {
        self.record("disable", unit)?;
        if !self.enabled.borrow_mut().remove(unit) {
            bail!("Unit file {unit}.service does not exist.");
        }
        Ok(())
    }

    async fn is_active(&self, unit: &str) -> Result<bool> {
        Ok(!self.never_active && self.active.borrow().contains(unit))
    }
}

// ── Downloader ───────────────────────────────────────────────────────────────

/// Serves canned bodies by URL; unknown URLs fail like a 404.
#[derive(Default)]
pub struct FakeOrigin {
    files: HashMap<String, Vec<u8>>,
    pub requested: RefCell<Vec<String>>,
}

impl FakeOrigin {
    pub fn serving(files: &[(&str, &[u8])]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(url, body)| ((*url).to_string(), body.to_vec()))
                .collect(),
            requested: RefCell::new(Vec::new()),
        }
    }

    /// Serves every builtin manifest entry under `https://origin.test/pkg`.
    pub fn builtin() -> Self {
        let files: Vec<(String, Vec<u8>)> = birelay_deploy::domain::manifest::PACKAGE_FILES
            .iter()
            .map(|p| {
                (
                    format!("https://origin.test/pkg/{p}"),
                    format!("# {p}\n").into_bytes(),
                )
            })
            .collect();
        Self {
            files: files.into_iter().collect(),
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl Downloader for FakeOrigin {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requested.borrow_mut().push(url.to_string());
        match self.files.get(url) {
            Some(body) => Ok(body.clone()),
            None => Err(DeployError::Fetch {
                url: url.to_string(),
                reason: "HTTP 404 Not Found".to_string(),
            }
            .into()),
        }
    }
}

// ── Prompter ─────────────────────────────────────────────────────────────────

/// Replays scripted answers in order and records every prompt shown.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    pub prompts: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(ToString::to_string).collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, prompt: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match self.answers.borrow_mut().pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("no scripted answer for prompt: {prompt}"),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn choose(&self, title: &str, _items: &[(&str, &str)]) -> Result<String> {
        self.next(title)
    }

    fn ask(&self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn ask_secret(&self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }
}

// ── PrivilegeProbe / ProgressReporter ────────────────────────────────────────

pub struct Root(pub bool);

impl PrivilegeProbe for Root {
    fn is_elevated(&self) -> bool {
        self.0
    }
}

/// Collects reporter events as `step: ...`, `success: ...`, `warn: ...`.
#[derive(Default)]
pub struct CollectingReporter {
    pub events: RefCell<Vec<String>>,
}

impl CollectingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.starts_with("warn: "))
            .collect()
    }
}

impl ProgressReporter for CollectingReporter {
    fn step(&self, message: &str) {
        self.events.borrow_mut().push(format!("step: {message}"));
    }

    fn success(&self, message: &str) {
        self.events.borrow_mut().push(format!("success: {message}"));
    }

    fn warn(&self, message: &str) {
        self.events.borrow_mut().push(format!("warn: {message}"));
    }
}
