//! Infrastructure implementation of the `PrivilegeProbe` port.

use crate::application::ports::PrivilegeProbe;

/// Checks the effective user id of the current process.
#[derive(Debug, Default)]
pub struct EffectiveUid;

impl PrivilegeProbe for EffectiveUid {
    fn is_elevated(&self) -> bool {
        nix::unistd::geteuid().is_root()
    }
}
