//! Configuration types and defaults for wsprune.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which local directories belong to a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CleanupMode {
    /// Developer machine: delete exactly the mapped folders (default).
    #[default]
    Workstation,
    /// Build agent: delete the whole build root holding `Sources` and
    /// `Binaries`, not just the mapped folder.
    #[serde(alias = "build_server", alias = "buildserver", alias = "buildagent")]
    BuildAgent,
}

impl fmt::Display for CleanupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupMode::Workstation => write!(f, "Workstation"),
            CleanupMode::BuildAgent => write!(f, "BuildAgent"),
        }
    }
}

/// Workspaces not accessed for this many days are cleaned up by default.
pub const DEFAULT_INACTIVE_DAYS: u32 = 30;

// Default value functions for serde
pub(crate) fn default_inactive_days() -> u32 {
    DEFAULT_INACTIVE_DAYS
}
pub(crate) fn default_true() -> bool {
    true
}
