//! Console sink with per-severity colors.

use super::{Level, Logger};
use colored::{ColoredString, Colorize};

/// Writes messages to the terminal. Errors go to stderr, everything else to
/// stdout so the summary table can be redirected.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }
}

/// Apply the color used for a severity.
pub(crate) fn paint(level: Level, message: &str) -> ColoredString {
    match level {
        Level::Error => message.red(),
        Level::Warning => message.yellow(),
        Level::Information => message.normal(),
        Level::Verbose => message.dimmed(),
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, message: &str) {
        let line = paint(level, message);
        if level == Level::Error {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}
