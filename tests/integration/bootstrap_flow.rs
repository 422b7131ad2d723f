use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use confstrap::default_config::DEFAULT_CONFIG_FILE;
use confstrap::migrate::MigrationOutcome;
use confstrap::paths::HomeDirProvider;
use confstrap::provision::DirectoryState;
use confstrap::report::BufferedReporter;
use confstrap::{Bootstrap, ConfigLayout, FatalBootstrapError, PathError, PathResolver};
use tempfile::TempDir;

use crate::integration::support::{bootstrap_in, current_dir, snapshot, write_file};

#[test]
fn fresh_home_gets_directories_and_seeded_config() {
    let home = TempDir::new().unwrap();
    let (bootstrap, reporter) = bootstrap_in(&home);

    let summary = bootstrap.initialize().unwrap();

    assert!(home.path().join(".config").is_dir());
    assert!(current_dir(&home).is_dir());
    assert_eq!(summary.config_file, current_dir(&home).join("config.yml"));
    assert!(summary.seeded);
    assert_eq!(
        fs::read_to_string(&summary.config_file).unwrap(),
        DEFAULT_CONFIG_FILE
    );
    assert!(reporter.messages().is_empty());
}

#[test]
fn existing_config_content_is_never_rewritten() {
    let home = TempDir::new().unwrap();
    write_file(&current_dir(&home).join("config.yml"), "foo: bar");
    let (bootstrap, _) = bootstrap_in(&home);

    let summary = bootstrap.initialize().unwrap();

    assert!(!summary.seeded);
    assert!(matches!(summary.xdg_config_dir, DirectoryState::Existing(_)));
    assert!(matches!(summary.config_dir, DirectoryState::Existing(_)));
    assert_eq!(
        fs::read_to_string(&summary.config_file).unwrap(),
        "foo: bar"
    );
}

#[test]
fn empty_config_file_is_seeded_on_later_run() {
    let home = TempDir::new().unwrap();
    write_file(&current_dir(&home).join("config.yml"), "");
    let (bootstrap, _) = bootstrap_in(&home);

    let summary = bootstrap.initialize().unwrap();

    assert!(summary.seeded);
    assert_eq!(
        fs::read_to_string(&summary.config_file).unwrap(),
        DEFAULT_CONFIG_FILE
    );
}

#[test]
fn partial_state_is_completed_by_next_run() {
    let home = TempDir::new().unwrap();
    fs::create_dir_all(home.path().join(".config")).unwrap();
    let (bootstrap, _) = bootstrap_in(&home);

    let summary = bootstrap.initialize().unwrap();

    assert!(matches!(summary.xdg_config_dir, DirectoryState::Existing(_)));
    assert!(matches!(summary.config_dir, DirectoryState::Created(_)));
    assert!(summary.config_file.is_file());
}

#[test]
fn repeated_runs_leave_the_same_tree() {
    let home = TempDir::new().unwrap();
    let (bootstrap, _) = bootstrap_in(&home);

    bootstrap.initialize().unwrap();
    let first = snapshot(home.path());
    let summary = bootstrap.initialize().unwrap();

    assert_eq!(summary.migration, MigrationOutcome::NoLegacy);
    assert!(!summary.seeded);
    assert_eq!(snapshot(home.path()), first);
}

#[test]
fn blocked_config_path_is_fatal() {
    let home = TempDir::new().unwrap();
    // A file where the XDG base directory should be.
    write_file(&home.path().join(".config"), "");
    let (bootstrap, _) = bootstrap_in(&home);

    let err = bootstrap.initialize().unwrap_err();

    // Anything at ~/.config counts as present, so the failure surfaces when
    // the config file is provisioned underneath it.
    match &err {
        FatalBootstrapError::ProvisionFile { file_name, .. } => {
            assert_eq!(file_name, "config.yml");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), 1);
}

struct NoHome;

impl HomeDirProvider for NoHome {
    fn home_dir(&self) -> Option<PathBuf> {
        None
    }
}

#[test]
fn missing_home_directory_is_fatal() {
    let bootstrap = Bootstrap::new(
        ConfigLayout::default(),
        PathResolver::new(Arc::new(NoHome)),
        Arc::new(BufferedReporter::new()),
    );

    let err = bootstrap.initialize().unwrap_err();
    assert!(matches!(
        err,
        FatalBootstrapError::Resolve {
            source: PathError::HomeDirUnavailable,
            ..
        }
    ));
}

#[test]
fn custom_layout_is_honored() {
    let home = TempDir::new().unwrap();
    let layout = ConfigLayout {
        legacy_dir: "~/.dash/".to_string(),
        config_dir: "~/.config/dash/".to_string(),
        config_file_name: "dash.yml".to_string(),
        ..ConfigLayout::default()
    };
    let bootstrap = Bootstrap::new(
        layout,
        PathResolver::with_home(home.path()),
        Arc::new(BufferedReporter::new()),
    );

    let summary = bootstrap.initialize().unwrap();
    assert_eq!(
        summary.config_file,
        home.path().join(".config").join("dash").join("dash.yml")
    );
}

#[test]
fn directory_creation_is_not_recursive() {
    let home = TempDir::new().unwrap();
    let layout = ConfigLayout {
        xdg_config_dir: "~/missing/base/".to_string(),
        config_dir: "~/missing/base/wtf/".to_string(),
        ..ConfigLayout::default()
    };
    let bootstrap = Bootstrap::new(
        layout,
        PathResolver::with_home(home.path()),
        Arc::new(BufferedReporter::new()),
    );

    let err = bootstrap.initialize().unwrap_err();

    match err {
        FatalBootstrapError::CreateDirectory { display, path, .. } => {
            assert_eq!(display, "~/missing/base/");
            assert_eq!(path, home.path().join("missing").join("base"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!home.path().join("missing").exists());
}
