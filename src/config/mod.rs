//! Configuration for wsprune.
//!
//! An optional YAML file supplies defaults for every command-line option.
//! [`CleanupOptions::resolve`] merges both into the read-only settings of a run.

mod model;
mod operations;
mod options;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::ConfigFile;
pub use options::{CleanupOptions, Overrides, current_computer};
pub use types::CleanupMode;
