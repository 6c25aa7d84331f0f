//! Shared fakes for unit tests.

use crate::config::{CleanupMode, CleanupOptions};
use crate::error::{Result, SweepError};
use crate::interactive::InteractiveChannel;
use crate::logging::{Level, Logger};
use crate::service::{FolderType, WorkingFolder, Workspace, WorkspaceService, matches_filter};
use chrono::{DateTime, Duration, Utc};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Logger that records every message. Clones share the same buffer.
#[derive(Clone, Default)]
pub(crate) struct MemoryLogger {
    entries: Rc<RefCell<Vec<(Level, String)>>>,
}

impl MemoryLogger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|(_, m)| m.clone()).collect()
    }

    pub(crate) fn contains(&self, level: Level, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

/// Interactive channel driven by a script.
///
/// `pauses` answers successive `response_pending` calls (missing entries mean
/// "nothing pending"); `lines` answers successive `read_line` calls.
#[derive(Default)]
pub(crate) struct ScriptedChannel {
    pub(crate) pauses: VecDeque<bool>,
    pub(crate) lines: VecDeque<String>,
    pub(crate) prompts: Vec<String>,
}

impl ScriptedChannel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_lines(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl InteractiveChannel for ScriptedChannel {
    fn prompt(&mut self, message: &str) -> Result<()> {
        self.prompts.push(message.to_string());
        Ok(())
    }

    fn response_pending(&mut self) -> bool {
        self.pauses.pop_front().unwrap_or(false)
    }

    fn read_line(&mut self) -> Result<String> {
        self.lines
            .pop_front()
            .ok_or_else(|| SweepError::Interactive("script exhausted".to_string()))
    }
}

/// In-memory workspace service.
#[derive(Default)]
pub(crate) struct FakeService {
    pub(crate) workspaces: RefCell<Vec<Workspace>>,
    /// Names whose server delete fails.
    pub(crate) fail_delete: HashSet<String>,
    /// Names whose refresh fails.
    pub(crate) fail_refresh: HashSet<String>,
    /// Last-access values applied on refresh, simulating concurrent use.
    pub(crate) touched: HashMap<String, DateTime<Utc>>,
    pub(crate) query_error: Option<String>,
    pub(crate) deleted: RefCell<Vec<String>>,
}

impl FakeService {
    pub(crate) fn new(workspaces: Vec<Workspace>) -> Self {
        Self {
            workspaces: RefCell::new(workspaces),
            ..Self::default()
        }
    }
}

impl WorkspaceService for FakeService {
    fn query_workspaces(&self, owner: &str, computer: &str) -> Result<Vec<Workspace>> {
        if let Some(message) = &self.query_error {
            return Err(SweepError::Service(message.clone()));
        }
        Ok(self
            .workspaces
            .borrow()
            .iter()
            .filter(|w| matches_filter(&w.owner, owner) && matches_filter(&w.computer, computer))
            .cloned()
            .collect())
    }

    fn refresh(&self, workspace: &mut Workspace) -> Result<()> {
        if self.fail_refresh.contains(&workspace.name) {
            return Err(SweepError::Service(format!(
                "cannot refresh '{}'",
                workspace.name
            )));
        }
        if let Some(last_access) = self.touched.get(&workspace.name) {
            workspace.last_access = *last_access;
        }
        workspace.is_deleted = !self
            .workspaces
            .borrow()
            .iter()
            .any(|w| w.same_identity(workspace));
        Ok(())
    }

    fn delete(&self, workspace: &Workspace) -> Result<()> {
        if self.fail_delete.contains(&workspace.name) {
            return Err(SweepError::Service(format!(
                "workspace '{}' is in use",
                workspace.name
            )));
        }
        self.workspaces
            .borrow_mut()
            .retain(|w| !w.same_identity(workspace));
        self.deleted.borrow_mut().push(workspace.name.clone());
        Ok(())
    }
}

/// A local workspace of `alice` on `BOX1`, last used `days_ago` days ago.
pub(crate) fn workspace(name: &str, days_ago: i64) -> Workspace {
    Workspace {
        name: name.to_string(),
        owner: "alice".to_string(),
        computer: "BOX1".to_string(),
        comment: None,
        last_access: Utc::now() - Duration::days(days_ago),
        folders: Vec::new(),
        is_local: true,
        is_deleted: false,
    }
}

/// Same as [`workspace`] with the given mapped folders.
pub(crate) fn workspace_with_folders(name: &str, days_ago: i64, folders: &[&Path]) -> Workspace {
    let mut ws = workspace(name, days_ago);
    ws.folders = folders
        .iter()
        .map(|p| WorkingFolder {
            server_item: format!("$/{}", name),
            local_item: p.to_path_buf(),
            folder_type: FolderType::Map,
        })
        .collect();
    ws
}

/// Options for `alice` on `BOX1` with a 30-day threshold.
pub(crate) fn options(mode: CleanupMode) -> CleanupOptions {
    CleanupOptions {
        collection: PathBuf::from("/srv/registry.json"),
        owner_filter: "alice".to_string(),
        computer_filter: "BOX1".to_string(),
        inactive_days: 30,
        max_last_access: Utc::now() - Duration::days(30),
        comment_filter: None,
        cleanup_mode: mode,
        delete_local_files: true,
        simulate: false,
        quiet: true,
        log_file: None,
    }
}

/// Write a file of `size` bytes, creating parent directories.
pub(crate) fn write_file(path: &Path, size: usize) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, vec![b'x'; size]).unwrap();
}
