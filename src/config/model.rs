//! Config file definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Contents of an optional `--config` YAML file.
///
/// Every field is a default for the matching command-line option. Unknown
/// fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Workspace collection: `file://` URL or absolute registry path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    /// Owner whose workspaces are cleaned (default: current user).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Computer whose workspaces are cleaned (default: this host).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computer: Option<String>,

    /// Days without access before a workspace is eligible.
    #[serde(default = "default_inactive_days")]
    pub inactive_days: u32,

    /// How local folders are resolved.
    pub workspace_type: CleanupMode,

    /// Delete local files in addition to the server workspace.
    #[serde(default = "default_true")]
    pub delete_local: bool,

    /// Dry run: compute everything, change nothing.
    pub simulate: bool,

    /// Only clean workspaces whose comment contains this text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Skip the confirmation prompt.
    pub quiet: bool,

    /// Append log output to this file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            collection: None,
            owner: None,
            computer: None,
            inactive_days: default_inactive_days(),
            workspace_type: CleanupMode::default(),
            delete_local: default_true(),
            simulate: false,
            comment: None,
            quiet: false,
            log: None,
        }
    }
}
