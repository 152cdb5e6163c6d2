//! Output formatting module

pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::application::services::InstallSummary;
use crate::domain::{Deployment, StepOutcome, TeardownReport};

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    fn success_line(&self, msg: &str) -> String {
        format!("  {} {msg}", "✓".style(self.styles.success))
    }

    fn warn_line(&self, msg: &str) -> String {
        format!("  {} {msg}", "⚠".style(self.styles.warning))
    }

    fn info_line(&self, msg: &str) -> String {
        format!("  {} {msg}", "ℹ".style(self.styles.info))
    }

    fn header_line(&self, msg: &str) -> String {
        format!("  {}", msg.style(self.styles.header))
    }

    fn kv_line(&self, key: &str, value: &str) -> String {
        format!("  {}  {value}", key.style(self.styles.dim))
    }

    /// Print the closing summary of an install. Suppressed when `quiet`.
    pub fn install_summary(&self, deployment: &Deployment, summary: &InstallSummary) {
        print_lines(&self.install_summary_lines(deployment, summary));
    }

    /// Lines of the install summary; empty when `quiet`.
    #[must_use]
    pub fn install_summary_lines(
        &self,
        deployment: &Deployment,
        summary: &InstallSummary,
    ) -> Vec<String> {
        if self.quiet {
            return Vec::new();
        }
        let installed = summary
            .packages
            .iter()
            .filter(|(_, outcome)| outcome.is_applied())
            .count();
        let runtime = match summary.runtime {
            StepOutcome::Applied => "created",
            StepOutcome::AlreadySatisfied => "reused",
        };
        let name = deployment.service_name();

        let mut lines = vec![
            String::new(),
            self.header_line("Install complete"),
            self.kv_line("Directory   ", &deployment.target_dir().display().to_string()),
            self.kv_line("Service     ", name),
            self.kv_line("Unit file   ", &deployment.unit_path().display().to_string()),
            self.kv_line("Files       ", &summary.files.len().to_string()),
            self.kv_line("Packages    ", &format!("{installed} installed")),
            self.kv_line("Runtime     ", runtime),
        ];
        if summary.running {
            lines.push(self.success_line(&format!("{name} is running")));
        } else {
            lines.push(self.warn_line(&format!("{name} is enabled but not active yet")));
        }
        lines.push(self.info_line(&format!("Follow logs with: journalctl -u {name} -f")));
        lines
    }

    /// Print the closing summary of an uninstall. Suppressed when `quiet`.
    pub fn teardown_summary(&self, deployment: &Deployment, report: &TeardownReport) {
        print_lines(&self.teardown_summary_lines(deployment, report));
    }

    /// Lines of the uninstall summary; empty when `quiet`.
    #[must_use]
    pub fn teardown_summary_lines(
        &self,
        deployment: &Deployment,
        report: &TeardownReport,
    ) -> Vec<String> {
        if self.quiet {
            return Vec::new();
        }
        if report.was_clean() {
            return vec![String::new(), self.info_line("No previous install found")];
        }
        let mut lines = vec![String::new(), self.header_line("Uninstall complete")];
        if report.unit_removed {
            lines.push(self.kv_line("Removed unit", &deployment.unit_path().display().to_string()));
        }
        if report.target_removed {
            lines.push(self.kv_line(
                "Removed dir ",
                &deployment.target_dir().display().to_string(),
            ));
        }
        lines
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
