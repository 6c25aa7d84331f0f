//! Resolution of the effective cleanup options.
//!
//! Precedence: command line, then config file, then built-in defaults.

use super::model::ConfigFile;
use super::types::CleanupMode;
use crate::error::{Result, SweepError};
use crate::logging::{Level, Logger};
use crate::service::parse_collection;
use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;

/// Options given on the command line. `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub collection: Option<String>,
    pub owner: Option<String>,
    pub computer: Option<String>,
    pub inactive_days: Option<u32>,
    pub workspace_type: Option<CleanupMode>,
    pub delete_local: Option<bool>,
    pub simulate: Option<bool>,
    pub comment: Option<String>,
    pub quiet: bool,
    pub log: Option<PathBuf>,
}

/// Read-only settings for one cleanup run.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupOptions {
    /// Registry file of the workspace collection.
    pub collection: PathBuf,
    pub owner_filter: String,
    pub computer_filter: String,
    pub inactive_days: u32,
    /// Workspaces accessed at or after this moment are left alone.
    pub max_last_access: DateTime<Utc>,
    /// Case-insensitive substring the workspace comment must contain.
    pub comment_filter: Option<String>,
    pub cleanup_mode: CleanupMode,
    pub delete_local_files: bool,
    pub simulate: bool,
    pub quiet: bool,
    pub log_file: Option<PathBuf>,
}

impl CleanupOptions {
    /// Merge command-line overrides over the config file and compute the
    /// access threshold relative to `now`.
    pub fn resolve(overrides: Overrides, file: ConfigFile, now: DateTime<Utc>) -> Result<Self> {
        let collection = overrides
            .collection
            .or(file.collection)
            .unwrap_or_default();
        let collection = parse_collection(&collection)?;

        let owner_filter = match overrides.owner.or(file.owner) {
            Some(owner) => owner,
            None => current_user()?,
        };
        let computer_filter = match overrides.computer.or(file.computer) {
            Some(computer) => computer,
            None => current_computer()?,
        };
        if owner_filter.trim().is_empty() || computer_filter.trim().is_empty() {
            return Err(SweepError::InvalidConfiguration(
                "owner and computer must not be empty".to_string(),
            ));
        }

        let inactive_days = overrides.inactive_days.unwrap_or(file.inactive_days);
        let max_last_access = now
            .checked_sub_signed(Duration::days(i64::from(inactive_days)))
            .ok_or_else(|| {
                SweepError::InvalidConfiguration(format!(
                    "inactive days value {} is out of range",
                    inactive_days
                ))
            })?;

        let comment_filter = overrides
            .comment
            .or(file.comment)
            .filter(|c| !c.is_empty());

        Ok(Self {
            collection,
            owner_filter,
            computer_filter,
            inactive_days,
            max_last_access,
            comment_filter,
            cleanup_mode: overrides.workspace_type.unwrap_or(file.workspace_type),
            delete_local_files: overrides.delete_local.unwrap_or(file.delete_local),
            simulate: overrides.simulate.unwrap_or(file.simulate),
            quiet: overrides.quiet || file.quiet,
            log_file: overrides.log.or(file.log),
        })
    }

    /// Log every effective option at verbose level.
    pub fn log_option_list(&self, logger: &dyn Logger) {
        let comment = self.comment_filter.as_deref().unwrap_or("");
        let log_file = self
            .log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        logger.log(Level::Verbose, "Options:");
        for (name, value) in [
            ("Collection", self.collection.display().to_string()),
            ("Owner", self.owner_filter.clone()),
            ("Computer", self.computer_filter.clone()),
            ("InactiveDays", self.inactive_days.to_string()),
            ("MaxLastAccess", self.max_last_access.to_rfc3339()),
            ("Comment", comment.to_string()),
            ("WorkspaceType", self.cleanup_mode.to_string()),
            ("DeleteLocal", self.delete_local_files.to_string()),
            ("Simulate", self.simulate.to_string()),
            ("Quiet", self.quiet.to_string()),
            ("Log", log_file),
        ] {
            logger.log(Level::Verbose, &format!("  {}: {}", name, value));
        }
    }
}

/// Name of the user running the cleanup.
pub fn current_user() -> Result<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .map_err(|_| {
            SweepError::InvalidConfiguration(
                "cannot determine the current user; pass --owner".to_string(),
            )
        })
}

/// Host name of this machine.
pub fn current_computer() -> Result<String> {
    hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .map_err(|e| {
            SweepError::InvalidConfiguration(format!(
                "cannot determine the computer name ({}); pass --computer",
                e
            ))
        })
}
