//! The cleanup run.
//!
//! A run selects inactive workspaces, asks for confirmation, then processes
//! each candidate in order:
//!
//! 1. refresh it from the service and skip it if it was used in the meantime
//! 2. delete its local folders and prune parents left empty
//! 3. delete the server workspace, unless the local step failed
//!
//! A failing candidate never stops the run; its error is recorded and shown in
//! the summary. Between candidates the user can pause with Enter and quit with
//! `q`.

mod deletion;
mod display;
mod resolution;
mod selection;
mod size;
mod types;


pub use types::{CleanupCandidate, RunOutcome, RunSummary, Status};

use crate::config::CleanupOptions;
use crate::error::Result;
use crate::interactive::{InteractiveChannel, is_affirmative, is_quit};
use crate::logging::{Level, Logger};
use crate::service::WorkspaceService;
use chrono::Local;
use deletion::{DeletedSet, delete_item, prune_empty_ancestors};
use display::log_summary;
use resolution::resolve_local_folders;
use selection::select_candidates;
use size::format_size;

/// Drives one cleanup run.
pub struct Cleaner<'a> {
    options: &'a CleanupOptions,
    service: &'a dyn WorkspaceService,
    channel: &'a mut dyn InteractiveChannel,
    logger: &'a dyn Logger,
}

impl<'a> Cleaner<'a> {
    pub fn new(
        options: &'a CleanupOptions,
        service: &'a dyn WorkspaceService,
        channel: &'a mut dyn InteractiveChannel,
        logger: &'a dyn Logger,
    ) -> Self {
        Self {
            options,
            service,
            channel,
            logger,
        }
    }

    /// Run the cleanup. Only selection and confirmation errors are returned;
    /// per-workspace errors end up in the summary.
    pub fn execute(&mut self) -> Result<RunOutcome> {
        let mut candidates = select_candidates(self.service, self.options, self.logger)?;
        if candidates.is_empty() {
            self.logger.log(Level::Information, "Nothing to do.");
            return Ok(RunOutcome::NothingToDo);
        }

        if !self.options.quiet && !self.options.simulate && !self.confirm(candidates.len())? {
            self.logger.log(Level::Information, "Canceled");
            return Ok(RunOutcome::Declined);
        }

        let mut deleted = DeletedSet::new();
        let total = candidates.len();
        let mut canceled = false;

        for (index, candidate) in candidates.iter_mut().enumerate() {
            if !canceled && self.stop_requested() {
                self.logger.log(Level::Warning, "Processing canceled.");
                canceled = true;
            }
            if canceled {
                candidate.mark_skipped();
                continue;
            }

            if let Err(err) = self.process(candidate, index + 1, total, &mut deleted) {
                self.logger.log(
                    Level::Error,
                    &format!(
                        "Failed to process workspace \"{}\": {}",
                        candidate.workspace.name, err
                    ),
                );
                candidate.record_failure(err);
            }
        }

        let summary = RunSummary {
            candidates,
            canceled,
        };
        log_summary(&summary, self.options.simulate, self.logger);
        Ok(RunOutcome::Completed(summary))
    }

    fn confirm(&mut self, count: usize) -> Result<bool> {
        self.channel.prompt(&format!(
            "Enter 'y' to confirm deleting {} workspace(s): ",
            count
        ))?;
        let answer = self.channel.read_line()?;
        Ok(is_affirmative(&answer))
    }

    /// Handle a pending keypress. Returns true when the user chose to quit.
    fn stop_requested(&mut self) -> bool {
        match self.pause() {
            Ok(quit) => quit,
            Err(err) => {
                self.logger.log(Level::Error, &err.to_string());
                true
            }
        }
    }

    fn pause(&mut self) -> Result<bool> {
        if !self.channel.response_pending() {
            return Ok(false);
        }
        // Discard the keypress that triggered the pause.
        self.channel.read_line()?;
        self.channel
            .prompt("Paused. Press Enter to continue or 'q' to quit: ")?;
        let answer = self.channel.read_line()?;
        Ok(is_quit(&answer))
    }

    fn process(
        &self,
        candidate: &mut CleanupCandidate,
        position: usize,
        total: usize,
        deleted: &mut DeletedSet,
    ) -> Result<()> {
        self.logger.log(
            Level::Information,
            &format!(
                "Processing workspace \"{}\" ({}/{})",
                candidate.workspace.name, position, total
            ),
        );

        self.service.refresh(&mut candidate.workspace)?;
        self.logger.log(
            Level::Verbose,
            &format!(
                "Last accessed: {}",
                candidate
                    .workspace
                    .last_access
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
            ),
        );
        if let Some(comment) = &candidate.workspace.comment {
            self.logger
                .log(Level::Verbose, &format!("Comment: {}", comment));
        }

        if candidate.workspace.last_access >= self.options.max_last_access {
            self.logger.log(
                Level::Warning,
                &format!(
                    "Workspace \"{}\" was used recently and is skipped.",
                    candidate.workspace.name
                ),
            );
            candidate.mark_skipped();
            return Ok(());
        }

        if self.options.delete_local_files && candidate.workspace.is_local {
            match self.delete_local_folders(candidate, deleted) {
                Ok(()) => self.logger.log(
                    Level::Verbose,
                    &format!(
                        "Deleted {} in {} local folder(s)",
                        format_size(candidate.local_bytes_deleted),
                        candidate.local_folders_deleted.len()
                    ),
                ),
                Err(err) => {
                    self.logger.log(
                        Level::Error,
                        &format!(
                            "Failed to delete local folders of \"{}\": {}",
                            candidate.workspace.name, err
                        ),
                    );
                    candidate.local_status = Status::Failed;
                    candidate.error = Some(err);
                }
            }
        }

        if candidate.local_status != Status::Failed && !candidate.workspace.is_deleted {
            self.delete_server_workspace(candidate);
        }
        Ok(())
    }

    fn delete_local_folders(
        &self,
        candidate: &mut CleanupCandidate,
        deleted: &mut DeletedSet,
    ) -> Result<()> {
        let simulate = self.options.simulate;
        let roots = resolve_local_folders(
            &candidate.workspace.mapped_folders(),
            self.options.cleanup_mode,
        )?;

        for root in roots {
            if !deleted.logically_exists(&root) {
                continue;
            }
            self.logger.log(
                Level::Verbose,
                &format!("Deleting local folder \"{}\"", root.display()),
            );
            candidate.local_bytes_deleted += delete_item(&root, simulate, deleted)?;
            deleted.insert(&root);
            candidate.local_folders_deleted.push(root.clone());
            candidate.local_status = Status::Deleted;

            if let Some(parent) = root.parent() {
                for pruned in prune_empty_ancestors(parent, simulate, deleted)? {
                    self.logger.log(
                        Level::Verbose,
                        &format!("Deleted empty folder \"{}\"", pruned.display()),
                    );
                    candidate.local_folders_deleted.push(pruned);
                }
            }
        }
        Ok(())
    }

    fn delete_server_workspace(&self, candidate: &mut CleanupCandidate) {
        self.logger.log(
            Level::Verbose,
            &format!(
                "Deleting server workspace \"{}\"",
                candidate.workspace.qualified_name()
            ),
        );
        let result = if self.options.simulate {
            Ok(())
        } else {
            self.service.delete(&candidate.workspace)
        };

        match result {
            Ok(()) => candidate.server_status = Status::Deleted,
            Err(err) => {
                self.logger.log(
                    Level::Error,
                    &format!(
                        "Failed to delete server workspace \"{}\": {}",
                        candidate.workspace.name, err
                    ),
                );
                candidate.server_status = Status::Failed;
                candidate.error.get_or_insert(err);
            }
        }
    }
}
