//! Top-level run of the `wsprune` binary.
//!
//! Resolves options, wires the loggers, connects to the workspace registry
//! and hands over to [`Cleaner`].

use crate::cleanup::{Cleaner, RunOutcome};
use crate::cli::Cli;
use crate::config::{CleanupOptions, ConfigFile, current_computer};
use crate::error::Result;
use crate::exit_codes;
use crate::interactive::{ConsoleChannel, InteractiveChannel};
use crate::logging::{AggregateLogger, ConsoleLogger, FileLogger, Level, Logger};
use crate::service::RegistryService;
use chrono::Utc;

/// Run the cleanup described by `cli` and return the process exit code.
pub fn run(cli: &Cli) -> i32 {
    let console = ConsoleLogger::new();

    let options = match resolve_options(cli) {
        Ok(options) => options,
        Err(err) => {
            console.log(Level::Error, &format!("Error: {}", err));
            console.log(Level::Information, "Run with --help for usage.");
            return err.exit_code();
        }
    };

    let logger = match build_logger(&options) {
        Ok(logger) => logger,
        Err(err) => {
            console.log(Level::Error, &format!("Error: {}", err));
            return err.exit_code();
        }
    };

    let mut channel = ConsoleChannel::new();
    match execute(&options, &logger, &mut channel) {
        Ok(_) => exit_codes::SUCCESS,
        Err(err) => {
            logger.log(Level::Error, &format!("Error: {}", err));
            err.exit_code()
        }
    }
}

/// Merge the command line over the optional config file.
pub fn resolve_options(cli: &Cli) -> Result<CleanupOptions> {
    let file = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    CleanupOptions::resolve(cli.overrides(), file, Utc::now())
}

/// Console logger, plus a file logger when a log file is configured.
pub fn build_logger(options: &CleanupOptions) -> Result<AggregateLogger> {
    let mut logger = AggregateLogger::new();
    logger.add("console", Box::new(ConsoleLogger::new()));
    if let Some(path) = &options.log_file {
        logger.add("file", Box::new(FileLogger::new(path)?));
    }
    Ok(logger)
}

/// Connect to the registry and run the cleanup.
pub fn execute(
    options: &CleanupOptions,
    logger: &dyn Logger,
    channel: &mut dyn InteractiveChannel,
) -> Result<RunOutcome> {
    logger.log(
        Level::Information,
        &format!("wsprune v{}", env!("CARGO_PKG_VERSION")),
    );
    options.log_option_list(logger);

    let service = RegistryService::connect(&options.collection, current_computer()?)?;
    logger.log(
        Level::Verbose,
        &format!(
            "Using workspace registry \"{}\"",
            service.path().display()
        ),
    );
    logger.log(
        Level::Information,
        "During processing, press Enter to pause or be able to cancel.",
    );

    Cleaner::new(options, &service, channel, logger).execute()
}
