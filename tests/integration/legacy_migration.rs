use std::fs;

use confstrap::default_config::DEFAULT_CONFIG_FILE;
use confstrap::migrate::{CleanupStatus, MigrationOutcome};
use tempfile::TempDir;

use crate::integration::support::{bootstrap_in, current_dir, legacy_dir, snapshot, write_file};

#[test]
fn legacy_settings_move_to_current_directory() {
    let home = TempDir::new().unwrap();
    write_file(&legacy_dir(&home).join("settings.txt"), "abc");
    let (bootstrap, reporter) = bootstrap_in(&home);

    let summary = bootstrap.initialize().unwrap();

    assert_eq!(
        fs::read_to_string(current_dir(&home).join("settings.txt")).unwrap(),
        "abc"
    );
    assert!(!legacy_dir(&home).exists());
    assert!(matches!(
        summary.migration,
        MigrationOutcome::Migrated {
            cleanup: CleanupStatus::Removed,
            ..
        }
    ));
    assert!(reporter.messages().is_empty());
}

#[test]
fn migration_preserves_every_file_by_relative_path() {
    let home = TempDir::new().unwrap();
    let legacy = legacy_dir(&home);
    write_file(&legacy.join("config.yml"), "wtf:\n  refreshInterval: 2\n");
    write_file(&legacy.join("mods/github.yml"), "enabled: true\n");
    write_file(&legacy.join("mods/deep/notes.md"), "# notes\n");
    let before = snapshot(&legacy);
    let (bootstrap, _) = bootstrap_in(&home);

    let summary = bootstrap.initialize().unwrap();

    assert_eq!(snapshot(&current_dir(&home)), before);
    assert!(!legacy.exists());
    match summary.migration {
        MigrationOutcome::Migrated { stats, .. } => {
            assert_eq!(stats.files, 3);
            assert_eq!(stats.directories, 3);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn migrated_config_is_not_reseeded() {
    let home = TempDir::new().unwrap();
    write_file(&legacy_dir(&home).join("config.yml"), "foo: bar");
    let (bootstrap, _) = bootstrap_in(&home);

    let summary = bootstrap.initialize().unwrap();

    assert!(!summary.seeded);
    assert_eq!(
        fs::read_to_string(current_dir(&home).join("config.yml")).unwrap(),
        "foo: bar"
    );
}

#[test]
fn existing_current_directory_blocks_migration() {
    let home = TempDir::new().unwrap();
    write_file(&legacy_dir(&home).join("config.yml"), "legacy: newer");
    write_file(&current_dir(&home).join("config.yml"), "current: older");
    let legacy_before = snapshot(&legacy_dir(&home));
    let current_before = snapshot(&current_dir(&home));
    let (bootstrap, _) = bootstrap_in(&home);

    let summary = bootstrap.initialize().unwrap();

    assert_eq!(summary.migration, MigrationOutcome::AlreadyMigrated);
    assert_eq!(snapshot(&legacy_dir(&home)), legacy_before);
    assert_eq!(snapshot(&current_dir(&home)), current_before);
}

#[test]
fn empty_current_directory_still_blocks_migration() {
    let home = TempDir::new().unwrap();
    write_file(&legacy_dir(&home).join("config.yml"), "legacy: true");
    fs::create_dir_all(current_dir(&home)).unwrap();
    let (bootstrap, _) = bootstrap_in(&home);

    let summary = bootstrap.initialize().unwrap();

    assert_eq!(summary.migration, MigrationOutcome::AlreadyMigrated);
    assert!(legacy_dir(&home).join("config.yml").exists());
    // The empty current directory gets the default file instead.
    assert!(summary.seeded);
    assert_eq!(
        fs::read_to_string(&summary.config_file).unwrap(),
        DEFAULT_CONFIG_FILE
    );
}

#[test]
fn second_run_after_migration_short_circuits() {
    let home = TempDir::new().unwrap();
    write_file(&legacy_dir(&home).join("config.yml"), "foo: bar");
    let (bootstrap, _) = bootstrap_in(&home);
    bootstrap.initialize().unwrap();

    // A legacy directory showing up again is ignored.
    write_file(&legacy_dir(&home).join("config.yml"), "stale: true");
    let summary = bootstrap.initialize().unwrap();

    assert_eq!(summary.migration, MigrationOutcome::AlreadyMigrated);
    assert_eq!(
        fs::read_to_string(current_dir(&home).join("config.yml")).unwrap(),
        "foo: bar"
    );
}

#[cfg(unix)]
#[test]
fn symlinked_legacy_root_migrates_once() {
    let home = TempDir::new().unwrap();
    let dotfiles = home.path().join("dotfiles/wtf");
    write_file(&dotfiles.join("config.yml"), "wtf:\n  refreshInterval: 7\n");
    std::os::unix::fs::symlink(&dotfiles, legacy_dir(&home)).unwrap();
    let (bootstrap, reporter) = bootstrap_in(&home);

    let first = bootstrap.initialize().unwrap();
    assert!(matches!(first.migration, MigrationOutcome::Migrated { .. }));
    assert!(!first.seeded);
    assert_eq!(
        fs::read_to_string(current_dir(&home).join("config.yml")).unwrap(),
        "wtf:\n  refreshInterval: 7\n"
    );
    assert!(fs::symlink_metadata(legacy_dir(&home)).is_err());
    assert_eq!(snapshot(&dotfiles), snapshot(&current_dir(&home)));

    let second = bootstrap.initialize().unwrap();
    assert_eq!(second.migration, MigrationOutcome::NoLegacy);
    assert!(reporter.messages().is_empty());
}
