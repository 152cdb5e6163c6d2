//! Application service: manifest-driven file synchronization.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::application::ports::{Downloader, LocalFs, ProgressReporter};
use crate::domain::outcome::hex_encode;
use crate::domain::{Deployment, FetchedFile, FileManifest};

/// Download every manifest entry from the deployment's origin into its
/// target directory.
///
/// Entries are fetched one at a time in manifest order; each overwrites any
/// existing file. The first failure stops the sync and files written before
/// it stay on disk.
///
/// # Errors
///
/// Returns the downloader's error for the failing entry, or a filesystem
/// error if a directory or file cannot be written.
pub async fn sync(
    manifest: &FileManifest,
    deployment: &Deployment,
    downloader: &impl Downloader,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
) -> Result<Vec<FetchedFile>> {
    let target_dir = deployment.target_dir();
    let total = manifest.len();
    let mut fetched = Vec::with_capacity(total);

    for (index, relative) in manifest.iter().enumerate() {
        let dest = target_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs.create_dir_all(parent)?;
        }

        let url = deployment.file_url(relative);
        reporter.step(&format!("Fetching {relative} ({}/{total})", index + 1));
        let body = downloader.fetch(&url).await?;
        fs.write(&dest, &body)
            .with_context(|| format!("saving {relative}"))?;

        let sha256 = hex_encode(&Sha256::digest(&body));
        tracing::debug!(file = relative, bytes = body.len(), %sha256, "fetched");
        fetched.push(FetchedFile {
            relative: relative.to_string(),
            bytes: body.len() as u64,
            sha256,
        });
    }

    reporter.success(&format!("Fetched {total} files into {}", target_dir.display()));
    Ok(fetched)
}
