//! Local folder deletion.
//!
//! Simulated and real runs walk the same tree and report the same sizes and
//! folders. A real run removes entries as it goes; a simulated run records
//! what it would have removed in a [`DeletedSet`] and treats those paths as
//! gone for the rest of the run.
//!
//! Symbolic links are removed as entries and never followed, so they count
//! zero bytes and link cycles cannot recurse.

use crate::error::{Result, SweepError};
use std::collections::HashSet;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

/// Directories removed (or that would have been removed) during one run.
#[derive(Debug, Default)]
pub struct DeletedSet {
    dirs: HashSet<PathBuf>,
}

impl DeletedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &Path) {
        self.dirs.insert(key(path));
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.dirs.contains(&key(path))
    }

    /// Whether `path` or one of its ancestors has been deleted.
    pub fn covers(&self, path: &Path) -> bool {
        path.ancestors().any(|ancestor| self.contains(ancestor))
    }

    /// Whether `path` is present on disk and not deleted in this run.
    pub fn logically_exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok() && !self.covers(path)
    }
}

#[cfg(windows)]
fn key(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().to_lowercase())
}

#[cfg(not(windows))]
fn key(path: &Path) -> PathBuf {
    path.components().collect()
}

/// Delete the file or directory tree at `path` and return the number of file
/// bytes it held. With `simulate` nothing is touched and the same total is
/// returned. Entries already in `deleted` are skipped in both modes.
pub fn delete_item(path: &Path, simulate: bool, deleted: &DeletedSet) -> Result<u64> {
    let metadata =
        fs::symlink_metadata(path).map_err(|e| SweepError::filesystem("inspect", path, e))?;

    if metadata.file_type().is_symlink() {
        if !simulate {
            remove_link(path)?;
        }
        return Ok(0);
    }

    if metadata.is_dir() {
        if !simulate {
            clear_readonly(path, &metadata)?;
        }
        let mut bytes = 0;
        let entries = fs::read_dir(path).map_err(|e| SweepError::filesystem("list", path, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| SweepError::filesystem("list", path, e))?;
            let child = entry.path();
            if deleted.contains(&child) {
                continue;
            }
            bytes += delete_item(&child, simulate, deleted)?;
        }
        if !simulate {
            fs::remove_dir(path).map_err(|e| SweepError::filesystem("remove directory", path, e))?;
        }
        return Ok(bytes);
    }

    if !simulate {
        clear_readonly(path, &metadata)?;
        fs::remove_file(path).map_err(|e| SweepError::filesystem("remove file", path, e))?;
    }
    Ok(metadata.len())
}

/// Remove `start` and then each parent that has become empty, stopping at the
/// first directory that still holds something. Returns the pruned directories
/// in removal order.
pub fn prune_empty_ancestors(
    start: &Path,
    simulate: bool,
    deleted: &mut DeletedSet,
) -> Result<Vec<PathBuf>> {
    let mut pruned = Vec::new();
    let mut current = Some(start);

    while let Some(dir) = current {
        if dir.as_os_str().is_empty() || !dir.is_dir() || deleted.covers(dir) {
            break;
        }
        if !is_logically_empty(dir, deleted)? {
            break;
        }
        if !simulate {
            fs::remove_dir(dir).map_err(|e| SweepError::filesystem("remove directory", dir, e))?;
        }
        deleted.insert(dir);
        pruned.push(dir.to_path_buf());
        current = dir.parent();
    }

    Ok(pruned)
}

/// A directory is empty when every child is a directory already deleted in
/// this run. Files and links always count as content.
fn is_logically_empty(dir: &Path, deleted: &DeletedSet) -> Result<bool> {
    let entries = fs::read_dir(dir).map_err(|e| SweepError::filesystem("list", dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| SweepError::filesystem("list", dir, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| SweepError::filesystem("inspect", &entry.path(), e))?;
        if !file_type.is_dir() || !deleted.contains(&entry.path()) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[allow(clippy::permissions_set_readonly_false)]
fn clear_readonly(path: &Path, metadata: &Metadata) -> Result<()> {
    let mut permissions = metadata.permissions();
    if permissions.readonly() {
        permissions.set_readonly(false);
        fs::set_permissions(path, permissions)
            .map_err(|e| SweepError::filesystem("clear read-only flag on", path, e))?;
    }
    Ok(())
}

/// Directory links on Windows need `remove_dir`; everything else `remove_file`.
fn remove_link(path: &Path) -> Result<()> {
    fs::remove_file(path)
        .or_else(|e| {
            if retry_as_directory(&e) {
                fs::remove_dir(path)
            } else {
                Err(e)
            }
        })
        .map_err(|e| SweepError::filesystem("remove link", path, e))
}

fn retry_as_directory(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::IsADirectory
        || (cfg!(windows) && err.kind() == io::ErrorKind::PermissionDenied)
}
