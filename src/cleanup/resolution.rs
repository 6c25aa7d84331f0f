//! Which local directories belong to a workspace.

use crate::config::CleanupMode;
use crate::error::{Result, SweepError};
use std::fs;
use std::path::{Path, PathBuf};

/// Children that together mark the root of a build agent's working area.
pub const BUILD_ROOT_DIRECTORIES: [&str; 2] = ["Sources", "Binaries"];

/// Local roots to delete for a workspace with the given mapped folders.
///
/// On a workstation these are the mapped folders themselves. On a build
/// agent the whole build directory goes: the nearest ancestor of the first
/// mapped folder (itself included) that holds both [`BUILD_ROOT_DIRECTORIES`].
/// Without such an ancestor the mapped folders are used. When the first
/// mapped folder is missing nothing is resolved.
pub fn resolve_local_folders(mapped: &[PathBuf], mode: CleanupMode) -> Result<Vec<PathBuf>> {
    match mode {
        CleanupMode::Workstation => Ok(mapped.to_vec()),
        CleanupMode::BuildAgent => {
            let Some(first) = mapped.first() else {
                return Ok(Vec::new());
            };
            if !first.is_dir() {
                return Ok(Vec::new());
            }
            for ancestor in first.ancestors() {
                if ancestor.as_os_str().is_empty() {
                    break;
                }
                if is_build_root(ancestor)? {
                    return Ok(vec![ancestor.to_path_buf()]);
                }
            }
            Ok(mapped.to_vec())
        }
    }
}

/// Whether `dir` has every build root child directory (names compared
/// case-insensitively).
pub fn is_build_root(dir: &Path) -> Result<bool> {
    let entries = fs::read_dir(dir).map_err(|e| SweepError::filesystem("list", dir, e))?;

    let mut children = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SweepError::filesystem("list", dir, e))?;
        if entry.path().is_dir() {
            children.push(entry.file_name().to_string_lossy().to_lowercase());
        }
    }

    Ok(BUILD_ROOT_DIRECTORIES
        .iter()
        .all(|name| children.contains(&name.to_lowercase())))
}
