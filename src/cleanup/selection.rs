//! Candidate selection.

use super::types::CleanupCandidate;
use crate::config::CleanupOptions;
use crate::error::Result;
use crate::logging::{Level, Logger};
use crate::service::{Workspace, WorkspaceService};

/// Query the service and keep the workspaces eligible for cleanup, oldest
/// first.
pub fn select_candidates(
    service: &dyn WorkspaceService,
    options: &CleanupOptions,
    logger: &dyn Logger,
) -> Result<Vec<CleanupCandidate>> {
    let found = service.query_workspaces(&options.owner_filter, &options.computer_filter)?;
    logger.log(
        Level::Information,
        &format!(
            "{} workspace(s) found for user \"{}\" on computer \"{}\".",
            found.len(),
            options.owner_filter,
            options.computer_filter
        ),
    );

    let mut selected: Vec<Workspace> = found
        .into_iter()
        .filter(|w| is_inactive(w, options))
        .collect();
    logger.log(
        Level::Information,
        &format!(
            "{} workspace(s) not accessed in the last {} day(s).",
            selected.len(),
            options.inactive_days
        ),
    );

    if let Some(filter) = &options.comment_filter {
        selected.retain(|w| comment_matches(w.comment.as_deref(), filter));
        logger.log(
            Level::Information,
            &format!(
                "{} workspace(s) with a comment containing \"{}\".",
                selected.len(),
                filter
            ),
        );
    }

    // sort_by_key is stable, so ties keep the service order.
    selected.sort_by_key(|w| w.last_access);
    Ok(selected.into_iter().map(CleanupCandidate::new).collect())
}

/// Whether `workspace` has not been used since the threshold.
pub fn is_inactive(workspace: &Workspace, options: &CleanupOptions) -> bool {
    workspace.last_access < options.max_last_access
}

/// Whether `comment` contains `filter`, ignoring case. A missing or empty
/// comment never matches.
pub fn comment_matches(comment: Option<&str>, filter: &str) -> bool {
    match comment {
        Some(comment) if !comment.is_empty() => {
            comment.to_lowercase().contains(&filter.to_lowercase())
        }
        _ => false,
    }
}
