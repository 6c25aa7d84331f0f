//! File-backed workspace service.
//!
//! The registry is a JSON document listing every workspace of a collection:
//!
//! ```json
//! {
//!   "workspaces": [
//!     {
//!       "name": "BUILD01_12",
//!       "owner": "svc-build",
//!       "computer": "BUILD01",
//!       "comment": "Workspace created by Team Build",
//!       "last_access": "2024-03-01T10:00:00Z",
//!       "folders": [{ "server_item": "$/P/Main", "local_item": "D:/Builds/1/P/Sources" }]
//!     }
//!   ]
//! }
//! ```
//!
//! Every call re-reads the file so `refresh` observes changes made by other
//! processes between selection and processing.

use super::{Workspace, WorkspaceService, matches_filter};
use crate::error::{Result, SweepError};
use crate::fs::atomic_write;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryDocument {
    #[serde(default)]
    workspaces: Vec<Workspace>,
}

/// Turn a `--collection` value into the registry file path.
///
/// Accepts `file://` URLs and absolute paths. Anything else is a
/// configuration error.
pub fn parse_collection(collection: &str) -> Result<PathBuf> {
    let collection = collection.trim();
    if collection.is_empty() {
        return Err(SweepError::InvalidConfiguration(
            "The location of the workspace collection must be specified.".to_string(),
        ));
    }

    let path = if let Some(rest) = collection.strip_prefix("file://") {
        PathBuf::from(rest)
    } else if let Some((scheme, _)) = collection.split_once("://") {
        return Err(SweepError::InvalidConfiguration(format!(
            "Unsupported collection scheme '{}'; use a file:// URL or an absolute path.",
            scheme
        )));
    } else {
        PathBuf::from(collection)
    };

    if !path.is_absolute() {
        return Err(SweepError::InvalidConfiguration(format!(
            "The collection location must be absolute: '{}'.",
            collection
        )));
    }

    Ok(path)
}

/// Workspace service backed by a JSON registry file.
#[derive(Debug, Clone)]
pub struct RegistryService {
    path: PathBuf,
    local_computer: String,
}

impl RegistryService {
    /// Connect to the registry at `path`. Workspaces whose computer equals
    /// `local_computer` (case-insensitively) are reported as local.
    pub fn connect(path: impl Into<PathBuf>, local_computer: impl Into<String>) -> Result<Self> {
        let service = Self {
            path: path.into(),
            local_computer: local_computer.into(),
        };
        // Fail fast on an unreachable or malformed registry.
        service.load()?;
        Ok(service)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<RegistryDocument> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            SweepError::Service(format!(
                "failed to read workspace registry '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let mut document: RegistryDocument = serde_json::from_str(&content).map_err(|e| {
            SweepError::Service(format!(
                "failed to parse workspace registry '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        for workspace in &mut document.workspaces {
            workspace.is_local = matches_filter(&workspace.computer, &self.local_computer);
        }
        Ok(document)
    }

    fn save(&self, document: &RegistryDocument) -> Result<()> {
        let content = serde_json::to_string_pretty(document).map_err(|e| {
            SweepError::Service(format!("failed to serialize workspace registry: {}", e))
        })?;
        atomic_write(&self.path, content.as_bytes())
    }
}

impl WorkspaceService for RegistryService {
    fn query_workspaces(&self, owner: &str, computer: &str) -> Result<Vec<Workspace>> {
        let document = self.load()?;
        Ok(document
            .workspaces
            .into_iter()
            .filter(|w| matches_filter(&w.owner, owner) && matches_filter(&w.computer, computer))
            .collect())
    }

    fn refresh(&self, workspace: &mut Workspace) -> Result<()> {
        let document = self.load()?;
        match document
            .workspaces
            .into_iter()
            .find(|w| w.same_identity(workspace))
        {
            Some(current) => {
                workspace.computer = current.computer;
                workspace.comment = current.comment;
                workspace.last_access = current.last_access;
                workspace.folders = current.folders;
                workspace.is_local = current.is_local;
                workspace.is_deleted = false;
            }
            None => workspace.is_deleted = true,
        }
        Ok(())
    }

    fn delete(&self, workspace: &Workspace) -> Result<()> {
        let mut document = self.load()?;
        let before = document.workspaces.len();
        document.workspaces.retain(|w| !w.same_identity(workspace));

        if document.workspaces.len() == before {
            return Err(SweepError::Service(format!(
                "workspace '{}' does not exist or was already deleted",
                workspace.qualified_name()
            )));
        }

        self.save(&document)
    }
}
