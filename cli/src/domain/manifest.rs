//! The deployable package: file manifest, OS prerequisites, pinned libraries.

use std::path::{Component, Path};

use crate::domain::error::DeployError;

/// Files that make up the relay application, relative to the origin root.
pub const PACKAGE_FILES: &[&str] = &[
    "tg_birelay/__init__.py",
    "tg_birelay/app.py",
    "tg_birelay/captcha.py",
    "tg_birelay/database.py",
];

/// OS packages the runtime environment is built from.
pub const REQUIRED_PACKAGES: &[&str] = &["python3", "python3-venv", "python3-pip"];

/// Libraries installed into the virtual environment.
pub const RUNTIME_REQUIREMENTS: &[&str] = &["python-telegram-bot==21.6", "python-dotenv==1.0.1"];

/// Ordered list of relative file paths fetched by the manifest sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileManifest {
    entries: Vec<String>,
}

impl FileManifest {
    /// Build a manifest, rejecting absolute paths and `..` components.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::InvalidManifestEntry`] for the first bad entry.
    pub fn new<I, S>(entries: I) -> Result<Self, DeployError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(Into::into)
            .map(|entry| {
                if is_safe_relative(&entry) {
                    Ok(entry)
                } else {
                    Err(DeployError::InvalidManifestEntry(entry))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// The relay package manifest shipped with this binary.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: PACKAGE_FILES.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_safe_relative(entry: &str) -> bool {
    let path = Path::new(entry);
    !entry.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
