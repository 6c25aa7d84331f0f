//! wsprune: deletes inactive version-control workspaces and their local files.
//!
//! This is the main entry point for the `wsprune` CLI. It parses arguments,
//! runs the cleanup, and maps errors to exit codes.

mod cleanup;
mod cli;
mod commands;
mod config;
mod error;
mod exit_codes;
mod fs;
mod interactive;
mod logging;
mod service;

#[cfg(test)]
mod test_support;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let code = match Cli::try_parse() {
        Ok(cli) => commands::run(&cli),
        Err(err) => cli::report_parse_error(&err),
    };
    ExitCode::from(exit_codes::to_process_code(code))
}
