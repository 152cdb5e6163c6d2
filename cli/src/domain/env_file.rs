//! The `.env` document consumed by the relay service at start-up.
//!
//! Pure data in, text out. Writing the file is the job of the secret
//! collector through the `LocalFs` port.

use std::fmt::Write as _;

/// Keys recognized by the relay application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnvKey {
    /// Bot token of the manager bot. Required.
    ManagerToken,
    /// Chat or channel that receives admin notifications. Optional.
    AdminChannel,
    /// Location of the SQLite store.
    DatabasePath,
}

impl EnvKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ManagerToken => "MANAGER_TOKEN",
            Self::AdminChannel => "ADMIN_CHANNEL",
            Self::DatabasePath => "DATABASE_PATH",
        }
    }
}

/// Ordered key → value mapping. Setting a key twice replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentFile {
    entries: Vec<(EnvKey, String)>,
}

impl EnvironmentFile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: EnvKey, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: EnvKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains(&self, key: EnvKey) -> bool {
        self.get(key).is_some()
    }

    /// Render as `KEY=value` lines, one per entry, in insertion order.
    ///
    /// Values that either systemd or python-dotenv would split or
    /// reinterpret are double-quoted with `\` and `"` escaped.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            let _ = writeln!(out, "{}={}", key.as_str(), quote(value));
        }
        out
    }
}

fn quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\' | '#' | '$' | '`'));
    if !needs_quotes {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' | '"' | '$' | '`' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
