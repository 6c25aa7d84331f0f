//! Tests for config functionality.

use crate::config::types::DEFAULT_INACTIVE_DAYS;
use crate::config::{CleanupMode, CleanupOptions, ConfigFile, Overrides};
use crate::error::SweepError;
use crate::test_support::MemoryLogger;
use chrono::{Duration, TimeZone, Utc};
use serial_test::serial;
use std::path::PathBuf;

fn overrides_with_identity() -> Overrides {
    Overrides {
        collection: Some("file:///srv/registry.json".to_string()),
        owner: Some("alice".to_string()),
        computer: Some("BOX1".to_string()),
        ..Overrides::default()
    }
}

#[test]
fn test_default_config_file() {
    let config = ConfigFile::default();

    assert_eq!(config.collection, None);
    assert_eq!(config.inactive_days, DEFAULT_INACTIVE_DAYS);
    assert_eq!(config.workspace_type, CleanupMode::Workstation);
    assert!(config.delete_local);
    assert!(!config.simulate);
    assert!(!config.quiet);
    assert_eq!(config.comment, None);
}

#[test]
fn test_parse_empty_yaml_uses_defaults() {
    let config = ConfigFile::from_yaml("").unwrap();
    assert_eq!(config, ConfigFile::default());
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
collection: file:///srv/tfs/registry.json
owner: svc-build
computer: BUILD01
inactive_days: 7
workspace_type: build_server
delete_local: false
simulate: true
comment: Workspace created by Team Build
quiet: true
log: /var/log/wsprune.log
"#;
    let config = ConfigFile::from_yaml(yaml).unwrap();

    assert_eq!(config.collection.as_deref(), Some("file:///srv/tfs/registry.json"));
    assert_eq!(config.owner.as_deref(), Some("svc-build"));
    assert_eq!(config.computer.as_deref(), Some("BUILD01"));
    assert_eq!(config.inactive_days, 7);
    assert_eq!(config.workspace_type, CleanupMode::BuildAgent);
    assert!(!config.delete_local);
    assert!(config.simulate);
    assert_eq!(config.comment.as_deref(), Some("Workspace created by Team Build"));
    assert!(config.quiet);
    assert_eq!(config.log, Some(PathBuf::from("/var/log/wsprune.log")));
}

#[test]
fn test_parse_ignores_unknown_fields() {
    let yaml = r#"
inactive_days: 45
future_option: whatever
"#;
    let config = ConfigFile::from_yaml(yaml).unwrap();
    assert_eq!(config.inactive_days, 45);
}

#[test]
fn test_parse_rejects_bad_values() {
    let err = ConfigFile::from_yaml("workspace_type: mainframe").unwrap_err();
    assert!(matches!(err, SweepError::InvalidConfiguration(_)));

    let err = ConfigFile::from_yaml("inactive_days: -3").unwrap_err();
    assert!(matches!(err, SweepError::InvalidConfiguration(_)));

    let err = ConfigFile::from_yaml("owner: '  '").unwrap_err();
    assert!(err.to_string().contains("owner must not be empty"));
}

#[test]
fn test_load_missing_file_is_configuration_error() {
    let err = ConfigFile::load("/definitely/not/here/wsprune.yaml").unwrap_err();
    assert!(matches!(err, SweepError::InvalidConfiguration(_)));
}

#[test]
fn test_cleanup_mode_display() {
    assert_eq!(CleanupMode::Workstation.to_string(), "Workstation");
    assert_eq!(CleanupMode::BuildAgent.to_string(), "BuildAgent");
}

#[test]
fn test_resolve_computes_threshold() {
    let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
    let options =
        CleanupOptions::resolve(overrides_with_identity(), ConfigFile::default(), now).unwrap();

    assert_eq!(options.collection, PathBuf::from("/srv/registry.json"));
    assert_eq!(options.inactive_days, 30);
    assert_eq!(options.max_last_access, now - Duration::days(30));
    assert_eq!(options.cleanup_mode, CleanupMode::Workstation);
    assert!(options.delete_local_files);
    assert!(!options.simulate);
    assert!(!options.quiet);
}

#[test]
fn test_resolve_command_line_wins_over_file() {
    let file = ConfigFile {
        collection: Some("/srv/from-file.json".to_string()),
        owner: Some("from-file".to_string()),
        inactive_days: 90,
        workspace_type: CleanupMode::BuildAgent,
        simulate: true,
        comment: Some("file comment".to_string()),
        ..ConfigFile::default()
    };
    let overrides = Overrides {
        inactive_days: Some(10),
        workspace_type: Some(CleanupMode::Workstation),
        simulate: Some(false),
        comment: Some("cli comment".to_string()),
        ..overrides_with_identity()
    };

    let options = CleanupOptions::resolve(overrides, file, Utc::now()).unwrap();

    assert_eq!(options.collection, PathBuf::from("/srv/registry.json"));
    assert_eq!(options.owner_filter, "alice");
    assert_eq!(options.inactive_days, 10);
    assert_eq!(options.cleanup_mode, CleanupMode::Workstation);
    assert!(!options.simulate);
    assert_eq!(options.comment_filter.as_deref(), Some("cli comment"));
}

#[test]
fn test_resolve_file_fills_missing_options() {
    let file = ConfigFile {
        collection: Some("/srv/from-file.json".to_string()),
        quiet: true,
        delete_local: false,
        ..ConfigFile::default()
    };
    let overrides = Overrides {
        collection: None,
        ..overrides_with_identity()
    };

    let options = CleanupOptions::resolve(overrides, file, Utc::now()).unwrap();

    assert_eq!(options.collection, PathBuf::from("/srv/from-file.json"));
    assert!(options.quiet);
    assert!(!options.delete_local_files);
}

#[test]
fn test_resolve_empty_comment_means_no_filter() {
    let overrides = Overrides {
        comment: Some(String::new()),
        ..overrides_with_identity()
    };
    let options = CleanupOptions::resolve(overrides, ConfigFile::default(), Utc::now()).unwrap();
    assert_eq!(options.comment_filter, None);
}

#[test]
fn test_resolve_requires_collection() {
    let overrides = Overrides {
        collection: None,
        ..overrides_with_identity()
    };
    let err = CleanupOptions::resolve(overrides, ConfigFile::default(), Utc::now()).unwrap_err();
    assert!(matches!(err, SweepError::InvalidConfiguration(_)));
    assert!(err.to_string().contains("must be specified"));
}

#[test]
fn test_resolve_rejects_out_of_range_days() {
    let overrides = Overrides {
        inactive_days: Some(u32::MAX),
        ..overrides_with_identity()
    };
    let err = CleanupOptions::resolve(overrides, ConfigFile::default(), Utc::now()).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
#[serial]
fn test_resolve_defaults_owner_to_current_user() {
    // SAFETY: serialized with every other test that touches the environment.
    unsafe { std::env::set_var("USER", "carol") };

    let overrides = Overrides {
        owner: None,
        ..overrides_with_identity()
    };
    let options = CleanupOptions::resolve(overrides, ConfigFile::default(), Utc::now()).unwrap();

    assert_eq!(options.owner_filter, "carol");
}

#[test]
fn test_log_option_list_is_verbose() {
    let options =
        CleanupOptions::resolve(overrides_with_identity(), ConfigFile::default(), Utc::now())
            .unwrap();
    let logger = MemoryLogger::new();

    options.log_option_list(&logger);

    let entries = logger.entries();
    assert_eq!(entries[0].1, "Options:");
    assert!(entries.iter().all(|(level, _)| *level == crate::logging::Level::Verbose));
    assert!(logger.messages().contains(&"  Owner: alice".to_string()));
    assert!(logger.messages().contains(&"  WorkspaceType: Workstation".to_string()));
}
