//! Top-level menu choices.

/// What the operator picked from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// `1`: install, or update an existing install.
    Install,
    /// `2`: remove the service and everything under the target directory.
    Uninstall,
    /// `3` or anything unrecognized.
    Exit,
}

/// Menu lines, in display order.
pub const MENU_ITEMS: &[(&str, &str)] = &[
    ("1", "Install / update"),
    ("2", "Uninstall"),
    ("3", "Exit"),
];

impl MenuChoice {
    /// Any answer other than the two action tokens means exit; there is no
    /// re-prompt on unrecognized input.
    #[must_use]
    pub fn parse(answer: &str) -> Self {
        match answer.trim() {
            "1" => Self::Install,
            "2" => Self::Uninstall,
            _ => Self::Exit,
        }
    }
}
