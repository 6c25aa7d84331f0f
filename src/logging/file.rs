//! Append-only log file sink.

use super::{Level, Logger};
use crate::error::{Result, SweepError};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends one line per message: `[timestamp] [Level      ] message`.
#[derive(Debug, Clone)]
pub struct FileLogger {
    path: PathBuf,
}

impl FileLogger {
    /// Create the sink, making sure the file can be opened for appending.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        open_append(&path).map_err(|e| {
            SweepError::InvalidConfiguration(format!(
                "cannot open log file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self { path })
    }
}

fn open_append(path: &Path) -> std::io::Result<std::fs::File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Format a single log line (without trailing newline).
pub(crate) fn format_line(timestamp: &str, level: Level, message: &str) -> String {
    format!("[{}] [{:<11}] {}", timestamp, level, message)
}

impl Logger for FileLogger {
    fn log(&self, level: Level, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let line = format_line(&timestamp, level, message);

        let written = open_append(&self.path).and_then(|mut file| writeln!(file, "{}", line));
        if let Err(e) = written {
            // The file sink cannot report through itself; fall back to stderr.
            eprintln!(
                "failed to write to log file '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}
