//! Remote workspace service interface.
//!
//! The cleaner never talks to a version-control server directly. It reads
//! workspaces through [`WorkspaceService`], refreshes them before acting, and
//! asks the service to delete them. [`RegistryService`] is the implementation
//! shipped with the binary; tests use an in-memory fake.

mod registry;

pub use registry::{RegistryService, parse_collection};

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a working folder participates in the workspace mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FolderType {
    /// Server path is mapped to the local item.
    #[default]
    Map,
    /// Server path is excluded from the workspace; no local files.
    Cloak,
}

/// A single server-path to local-path binding of a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingFolder {
    /// Server item, e.g. `$/Project/Main`.
    #[serde(default)]
    pub server_item: String,

    /// Absolute local directory.
    pub local_item: PathBuf,

    #[serde(default, rename = "type")]
    pub folder_type: FolderType,
}

/// A workspace as reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub name: String,
    pub owner: String,
    pub computer: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    pub last_access: DateTime<Utc>,

    #[serde(default)]
    pub folders: Vec<WorkingFolder>,

    /// Whether the workspace lives on the machine running the cleanup.
    /// Computed by the service, never stored.
    #[serde(skip)]
    pub is_local: bool,

    /// Set once the service no longer knows the workspace.
    #[serde(skip)]
    pub is_deleted: bool,
}

impl Workspace {
    /// Local directories of all `Map` folders, in mapping order.
    pub fn mapped_folders(&self) -> Vec<PathBuf> {
        self.folders
            .iter()
            .filter(|f| f.folder_type == FolderType::Map)
            .map(|f| f.local_item.clone())
            .collect()
    }

    /// Whether `other` identifies the same server workspace (name and owner,
    /// compared case-insensitively).
    pub fn same_identity(&self, other: &Workspace) -> bool {
        eq_ignore_case(&self.name, &other.name) && eq_ignore_case(&self.owner, &other.owner)
    }

    /// `name;owner`, the display form of the workspace identity.
    pub fn qualified_name(&self) -> String {
        format!("{};{}", self.name, self.owner)
    }
}

/// Operations the cleaner needs from the workspace service.
pub trait WorkspaceService {
    /// All workspaces of `owner` on `computer`. `*` matches any value.
    fn query_workspaces(&self, owner: &str, computer: &str) -> Result<Vec<Workspace>>;

    /// Re-read the mutable fields of `workspace` (last access, comment,
    /// folders). Marks it deleted when the service no longer has it.
    fn refresh(&self, workspace: &mut Workspace) -> Result<()>;

    /// Delete the server-side record of `workspace`.
    fn delete(&self, workspace: &Workspace) -> Result<()>;
}

/// Match an owner/computer value against a query filter.
pub fn matches_filter(value: &str, filter: &str) -> bool {
    filter == "*" || eq_ignore_case(value, filter)
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
