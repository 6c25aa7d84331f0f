//! Exit code constants for the wsprune CLI.
//!
//! - 0: Success (including help/version output and a declined confirmation)
//! - -1: Unhandled error (service unreachable, unexpected I/O failure)
//! - -2: Invalid configuration (bad arguments, config file or collection)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Unhandled error: anything that is not a configuration problem.
pub const UNHANDLED_ERROR: i32 = -1;

/// Invalid configuration: rejected before any workspace is processed.
pub const INVALID_CONFIGURATION: i32 = -2;

/// Convert an exit code into the byte the process actually reports.
///
/// Negative codes wrap the same way the OS truncates them (`-1` becomes 255).
pub fn to_process_code(code: i32) -> u8 {
    code as u8
}
