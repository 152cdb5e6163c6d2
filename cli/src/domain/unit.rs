//! systemd unit definition for the relay service.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::deployment::Deployment;

/// Delay between a stop and the next automatic start. The unit always
/// restarts (`Restart=always`) with no start-rate limit.
pub const RESTART_DELAY: Duration = Duration::from_secs(5);

/// Everything rendered into `<name>.service`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUnitSpec {
    pub name: String,
    pub description: String,
    pub working_dir: PathBuf,
    pub env_file: PathBuf,
    /// Extra `Environment=` assignments, in order.
    pub environment: Vec<(String, String)>,
    /// Executable followed by its arguments.
    pub exec: Vec<String>,
    pub restart_delay: Duration,
}

impl ServiceUnitSpec {
    /// The unit that runs `python -m <entry module>` from the target directory.
    #[must_use]
    pub fn for_deployment(deployment: &Deployment) -> Self {
        let target = deployment.target_dir().display().to_string();
        Self {
            name: deployment.service_name().to_string(),
            description: format!("{} Telegram relay bot", deployment.service_name()),
            working_dir: deployment.target_dir().to_path_buf(),
            env_file: deployment.env_file_path(),
            environment: vec![("PYTHONPATH".to_string(), target)],
            exec: vec![
                deployment.runtime_binary().display().to_string(),
                "-m".to_string(),
                deployment.entry_module().to_string(),
            ],
            restart_delay: RESTART_DELAY,
        }
    }

    /// Render in systemd unit-file syntax.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "[Unit]");
        let _ = writeln!(out, "Description={}", self.description);
        let _ = writeln!(out, "After=network-online.target");
        let _ = writeln!(out, "Wants=network-online.target");
        let _ = writeln!(out, "StartLimitIntervalSec=0");
        let _ = writeln!(out);
        let _ = writeln!(out, "[Service]");
        let _ = writeln!(out, "Type=simple");
        let _ = writeln!(
            out,
            "WorkingDirectory={}",
            quote_word(&self.working_dir.display().to_string())
        );
        let _ = writeln!(
            out,
            "EnvironmentFile={}",
            quote_word(&self.env_file.display().to_string())
        );
        for (key, value) in &self.environment {
            let _ = writeln!(out, "Environment={}", quote_word(&format!("{key}={value}")));
        }
        let exec: Vec<String> = self.exec.iter().map(|w| quote_word(w)).collect();
        let _ = writeln!(out, "ExecStart={}", exec.join(" "));
        let _ = writeln!(out, "Restart=always");
        let _ = writeln!(out, "RestartSec={}", self.restart_delay.as_secs());
        let _ = writeln!(out);
        let _ = writeln!(out, "[Install]");
        let _ = writeln!(out, "WantedBy=multi-user.target");
        out
    }
}

/// Double-quote a word for systemd when it contains whitespace or quotes.
fn quote_word(word: &str) -> String {
    if !word.chars().any(|c| c.is_whitespace() || c == '"' || c == '\\') {
        return word.to_string();
    }
    let escaped = word.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
