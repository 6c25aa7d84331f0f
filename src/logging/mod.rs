//! Logging sinks for wsprune.
//!
//! Every message goes through the [`Logger`] trait with a severity [`Level`].
//! The binary wires an [`AggregateLogger`] that fans out to the console and,
//! when `--log` is given, to an append-only log file.

mod console;
mod file;

pub use console::ConsoleLogger;
pub use file::FileLogger;

use std::collections::BTreeMap;
use std::fmt;

/// Message severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Error,
    Warning,
    Information,
    Verbose,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Error => "Error",
            Level::Warning => "Warning",
            Level::Information => "Information",
            Level::Verbose => "Verbose",
        };
        // Pad through the formatter so `{:<11}` works in the file sink.
        f.pad(name)
    }
}

/// A destination for log messages.
pub trait Logger {
    fn log(&self, level: Level, message: &str);
}

/// Forwards every message to a set of named sinks.
///
/// Sinks are kept in name order so output order is deterministic.
#[derive(Default)]
pub struct AggregateLogger {
    sinks: BTreeMap<String, Box<dyn Logger>>,
}

impl AggregateLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink under `name`, replacing any sink already using it.
    pub fn add(&mut self, name: impl Into<String>, sink: Box<dyn Logger>) {
        self.sinks.insert(name.into(), sink);
    }
}

impl Logger for AggregateLogger {
    fn log(&self, level: Level, message: &str) {
        for sink in self.sinks.values() {
            sink.log(level, message);
        }
    }
}
