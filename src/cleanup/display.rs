//! End-of-run summary.

use super::size::format_size;
use super::types::RunSummary;
use crate::logging::{Level, Logger};
use chrono::Local;

const SEPARATOR_WIDTH: usize = 79;

/// Log the summary table and totals of a completed run.
pub fn log_summary(summary: &RunSummary, simulate: bool, logger: &dyn Logger) {
    let info = |message: &str| logger.log(Level::Information, message);

    info("");
    info("SUMMARY:");
    info("");
    info(&table_row("Workspace", "Last access", "Status", "Size"));
    info(&"-".repeat(SEPARATOR_WIDTH));
    for candidate in &summary.candidates {
        let last_access = candidate
            .workspace
            .last_access
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        info(&table_row(
            &candidate.workspace.name,
            &last_access,
            &candidate.derived_status().to_string(),
            &format_size(candidate.local_bytes_deleted),
        ));
    }
    info("");

    if summary.canceled {
        logger.log(
            Level::Warning,
            "Processing was canceled; remaining workspaces were skipped.",
        );
    }
    if simulate {
        info("Done simulating.");
    } else {
        info("Done processing.");
    }

    let total = summary.candidates.len();
    info(&format!(
        "{} of {} server workspace(s) deleted.",
        summary.server_deleted_count(),
        total
    ));
    info(&format!(
        "{} deleted in {} local folder(s).",
        format_size(summary.local_bytes_deleted()),
        summary.local_folders_deleted()
    ));

    let failed = summary.failed();
    if !failed.is_empty() {
        let names: Vec<&str> = failed.iter().map(|c| c.workspace.name.as_str()).collect();
        logger.log(
            Level::Warning,
            &format!(
                "{} of {} workspace(s) failed: {}",
                failed.len(),
                total,
                names.join(", ")
            ),
        );
    }
}

fn table_row(name: &str, last_access: &str, status: &str, size: &str) -> String {
    format!("{:<31}  {:<22}  {:<7}  {:<7}", name, last_access, status, size)
        .trim_end()
        .to_string()
}
