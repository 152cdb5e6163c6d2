//! Outcomes reported by idempotent steps.

/// Result of a step that checks a precondition before mutating the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The host already satisfied the step; nothing was changed.
    AlreadySatisfied,
    /// The step changed the host.
    Applied,
}

impl StepOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Per-resource result of an uninstall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeardownReport {
    /// `systemctl stop` succeeded.
    pub stopped: bool,
    /// `systemctl disable` succeeded.
    pub disabled: bool,
    /// A unit file existed and was deleted.
    pub unit_removed: bool,
    /// The target directory existed and was deleted.
    pub target_removed: bool,
}

impl TeardownReport {
    /// Nothing was found to remove.
    #[must_use]
    pub fn was_clean(&self) -> bool {
        !self.unit_removed && !self.target_removed
    }
}

/// One downloaded manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFile {
    pub relative: String,
    pub bytes: u64,
    /// Lowercase hex SHA-256 of the file as written.
    pub sha256: String,
}

/// Lowercase hex encoding of a digest.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(HEX[(b >> 4) as usize]));
        out.push(char::from(HEX[(b & 0xf) as usize]));
    }
    out
}
