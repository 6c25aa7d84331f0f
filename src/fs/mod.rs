//! Filesystem utilities for wsprune.
//!
//! The workspace registry is rewritten in place after every delete, so writes
//! go through [`atomic_write`] to never leave a truncated registry behind.

pub mod atomic;

pub use atomic::atomic_write;
