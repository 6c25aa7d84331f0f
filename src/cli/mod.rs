//! CLI argument parsing for wsprune.
//!
//! Uses clap derive macros. Every option is optional here so a config file
//! can supply it; defaults are applied in [`crate::config::CleanupOptions`].

use crate::config::{CleanupMode, Overrides};
use crate::exit_codes;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// wsprune: delete inactive version-control workspaces and their local files.
///
/// Workspaces not accessed for a number of days are removed from the server
/// together with their local working folders. Build agents can have their
/// whole build directory removed instead.
#[derive(Parser, Debug)]
#[command(name = "wsprune")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
#[command(after_help = "During processing, press Enter to pause or be able to cancel.")]
pub struct Cli {
    /// Workspace collection: a file:// URL or absolute path of the registry.
    #[arg(long)]
    pub collection: Option<String>,

    /// Owner of the workspaces to delete; `*` for every owner [default: current user].
    #[arg(long)]
    pub owner: Option<String>,

    /// Computer of the workspaces to delete; `*` for every computer [default: this host].
    #[arg(long)]
    pub computer: Option<String>,

    /// Delete workspaces not accessed for this many days [default: 30].
    #[arg(long, value_name = "DAYS")]
    pub inactive_days: Option<u32>,

    /// `workstation` deletes the mapped folders; `build-server` deletes the build directory.
    #[arg(long, value_enum, ignore_case = true, value_name = "TYPE")]
    pub workspace_type: Option<WorkspaceType>,

    /// Delete local folders as well as the server workspace [default: true].
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub delete_local: Option<bool>,

    /// Report what would be deleted without deleting anything.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub simulate: Option<bool>,

    /// Only delete workspaces whose comment contains this text (case-insensitive).
    #[arg(long)]
    pub comment: Option<String>,

    /// Do not ask for confirmation.
    #[arg(short, long)]
    pub quiet: bool,

    /// Append log messages to this file.
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// YAML file with default option values.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Kind of machine the workspaces live on.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceType {
    Workstation,
    #[value(alias = "buildserver", alias = "build-agent")]
    BuildServer,
}

impl From<WorkspaceType> for CleanupMode {
    fn from(value: WorkspaceType) -> Self {
        match value {
            WorkspaceType::Workstation => CleanupMode::Workstation,
            WorkspaceType::BuildServer => CleanupMode::BuildAgent,
        }
    }
}

impl Cli {
    /// Command-line values that take precedence over the config file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            collection: self.collection.clone(),
            owner: self.owner.clone(),
            computer: self.computer.clone(),
            inactive_days: self.inactive_days,
            workspace_type: self.workspace_type.map(CleanupMode::from),
            delete_local: self.delete_local,
            simulate: self.simulate,
            comment: self.comment.clone(),
            quiet: self.quiet,
            log: self.log.clone(),
        }
    }
}

/// Print a clap error and return the process exit code for it. Help and
/// version requests are successful exits.
pub fn report_parse_error(err: &clap::Error) -> i32 {
    // Nothing useful can be done if stdout/stderr are gone.
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => exit_codes::SUCCESS,
        _ => exit_codes::INVALID_CONFIGURATION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_shows_help_successfully() {
        let err = Cli::try_parse_from(["wsprune"]).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
        assert_eq!(report_parse_error(&err), exit_codes::SUCCESS);
    }

    #[test]
    fn unknown_option_is_configuration_error() {
        let err = Cli::try_parse_from(["wsprune", "--bogus"]).unwrap_err();
        assert_eq!(report_parse_error(&err), exit_codes::INVALID_CONFIGURATION);
    }

    #[test]
    fn parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "wsprune",
            "--collection",
            "file:///srv/registry.json",
            "--owner",
            "*",
            "--computer",
            "BUILD01",
            "--inactive-days",
            "14",
            "--workspace-type",
            "Build-Server",
            "--delete-local",
            "false",
            "--comment",
            "team build",
            "-q",
            "--log",
            "/var/log/wsprune.log",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.collection.as_deref(), Some("file:///srv/registry.json"));
        assert_eq!(overrides.owner.as_deref(), Some("*"));
        assert_eq!(overrides.inactive_days, Some(14));
        assert_eq!(overrides.workspace_type, Some(CleanupMode::BuildAgent));
        assert_eq!(overrides.delete_local, Some(false));
        assert_eq!(overrides.simulate, None);
        assert_eq!(overrides.comment.as_deref(), Some("team build"));
        assert!(overrides.quiet);
        assert_eq!(overrides.log, Some(PathBuf::from("/var/log/wsprune.log")));
    }

    #[test]
    fn bare_boolean_flags_mean_true() {
        let cli = Cli::try_parse_from(["wsprune", "--simulate", "--delete-local"]).unwrap();
        assert_eq!(cli.simulate, Some(true));
        assert_eq!(cli.delete_local, Some(true));
    }

    #[test]
    fn invalid_inactive_days_is_rejected() {
        assert!(Cli::try_parse_from(["wsprune", "--inactive-days", "-3"]).is_err());
        assert!(Cli::try_parse_from(["wsprune", "--inactive-days", "many"]).is_err());
    }

    #[test]
    fn workspace_type_aliases() {
        let cli = Cli::try_parse_from(["wsprune", "--workspace-type", "buildserver"]).unwrap();
        assert_eq!(cli.workspace_type, Some(WorkspaceType::BuildServer));
        let cli = Cli::try_parse_from(["wsprune", "--workspace-type", "workstation"]).unwrap();
        assert_eq!(cli.workspace_type, Some(WorkspaceType::Workstation));
    }
}
