//! Data types for a cleanup run.

use crate::error::SweepError;
use crate::service::Workspace;
use std::fmt;
use std::path::PathBuf;

/// Progress of one side (local or server) of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Pending,
    Deleted,
    Skipped,
    Failed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Pending => "Pending",
            Status::Deleted => "Deleted",
            Status::Skipped => "Skipped",
            Status::Failed => "Failed",
        };
        f.pad(name)
    }
}

/// A workspace selected for cleanup and what happened to it.
#[derive(Debug)]
pub struct CleanupCandidate {
    pub workspace: Workspace,
    pub local_status: Status,
    pub server_status: Status,
    /// Local directories removed for this workspace, including emptied parents.
    pub local_folders_deleted: Vec<PathBuf>,
    pub local_bytes_deleted: u64,
    /// First error raised while processing, if any.
    pub error: Option<SweepError>,
}

impl CleanupCandidate {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            local_status: Status::Pending,
            server_status: Status::Pending,
            local_folders_deleted: Vec::new(),
            local_bytes_deleted: 0,
            error: None,
        }
    }

    /// Status shown in the summary.
    pub fn derived_status(&self) -> Status {
        if self.local_status == Status::Failed || self.server_status == Status::Failed {
            Status::Failed
        } else if self.local_status == Status::Skipped && self.server_status == Status::Skipped {
            Status::Skipped
        } else {
            Status::Deleted
        }
    }

    pub fn mark_skipped(&mut self) {
        self.local_status = Status::Skipped;
        self.server_status = Status::Skipped;
    }

    /// Record an error that escaped the local and server steps. Sides that
    /// never ran are reported as failed.
    pub fn record_failure(&mut self, error: SweepError) {
        for status in [&mut self.local_status, &mut self.server_status] {
            if *status == Status::Pending {
                *status = Status::Failed;
            }
        }
        self.error.get_or_insert(error);
    }
}

/// Result of [`Cleaner::execute`](super::Cleaner::execute).
#[derive(Debug)]
pub enum RunOutcome {
    /// No workspace passed the filters.
    NothingToDo,
    /// The user did not confirm the deletion.
    Declined,
    Completed(RunSummary),
}

/// Every candidate of a run, in processing order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub candidates: Vec<CleanupCandidate>,
    /// The user quit before all candidates were processed.
    pub canceled: bool,
}

impl RunSummary {
    pub fn server_deleted_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| c.server_status == Status::Deleted)
            .count()
    }

    pub fn local_bytes_deleted(&self) -> u64 {
        self.candidates.iter().map(|c| c.local_bytes_deleted).sum()
    }

    pub fn local_folders_deleted(&self) -> usize {
        self.candidates
            .iter()
            .map(|c| c.local_folders_deleted.len())
            .sum()
    }

    pub fn failed(&self) -> Vec<&CleanupCandidate> {
        self.candidates.iter().filter(|c| c.error.is_some()).collect()
    }
}
