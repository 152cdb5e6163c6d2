//! Infrastructure implementation of the `Downloader` port over `ureq`.

use std::io::Read;

use anyhow::{Context, Result};

use crate::application::ports::Downloader;
use crate::domain::DeployError;

/// Upper bound on a single manifest file.
const MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;

/// Blocking `ureq` agent driven from `spawn_blocking`.
///
/// No timeout is configured; a stalled origin stalls the install.
pub struct UreqDownloader {
    agent: ureq::Agent,
}

impl Default for UreqDownloader {
    fn default() -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("birelay-deploy/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }
}

impl Downloader for UreqDownloader {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let agent = self.agent.clone();
        let owned_url = url.to_string();
        tokio::task::spawn_blocking(move || fetch_blocking(&agent, &owned_url))
            .await
            .context("spawn_blocking for download")?
    }
}

fn fetch_blocking(agent: &ureq::Agent, url: &str) -> Result<Vec<u8>> {
    let fetch_error = |reason: String| DeployError::Fetch {
        url: url.to_string(),
        reason,
    };

    let response = match agent.get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            return Err(fetch_error(format!("HTTP {code} {}", response.status_text())).into());
        }
        Err(ureq::Error::Transport(transport)) => {
            return Err(fetch_error(transport.to_string()).into());
        }
    };

    let mut body = Vec::new();
    response
        .into_reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut body)
        .map_err(|e| fetch_error(format!("reading body: {e}")))?;
    if body.len() as u64 > MAX_BODY_BYTES {
        return Err(fetch_error(format!(
            "body exceeds {} MiB",
            MAX_BODY_BYTES / (1024 * 1024)
        ))
        .into());
    }
    tracing::debug!(url, bytes = body.len(), "downloaded");
    Ok(body)
}
