#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use std::path::Path;
use std::sync::{Arc, mpsc};

fn interface_with_channel(root: &Path, settings: CabalSettings) -> (CabalInterface, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel();
    let interface = CabalInterface::new(root, settings).with_sink(Arc::new(tx));
    (interface, rx)
}

fn notifications(rx: &mpsc::Receiver<Event>) -> Vec<Notification> {
    rx.try_iter()
        .filter_map(|event| match event {
            Event::Notification(n) => Some(n),
            _ => None,
        })
        .collect()
}

#[test]
fn test_command_display() {
    let command = ProcessCommand::new("cabal", "/work")
        .arg("install")
        .args(["--dry-run", "lens"]);
    assert_eq!(command.display(), "cabal install --dry-run lens");
    assert_eq!(command.program(), Path::new("cabal"));
    assert_eq!(command.working_dir(), Path::new("/work"));
}

#[test]
fn test_process_state_predicates() {
    assert!(!ProcessState::NotStarted.is_finished());
    assert!(!ProcessState::Running.is_finished());
    let failed = ProcessState::Failed("boom".to_string());
    assert!(failed.is_finished());
    assert!(!failed.is_success());
}

#[test]
fn test_spawn_missing_executable() {
    let dir = tempfile::tempdir().unwrap();
    let command = ProcessCommand::new(dir.path().join("no-such-cabal"), dir.path()).arg("build");
    let err = command.spawn(Arc::new(TracingSink)).unwrap_err();
    assert!(matches!(err, CabalError::Spawn { .. }));
    assert!(err.to_string().contains("no-such-cabal build"));
}

#[test]
fn test_package_action_needs_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let (interface, _rx) = interface_with_channel(dir.path(), CabalSettings::default());
    for path in ["", "/"] {
        let err = interface.build(Path::new(path)).unwrap_err();
        assert!(matches!(err, CabalError::NoParentDirectory(_)), "{path:?}: {err}");
    }
}

#[test]
fn test_bare_file_name_runs_in_current_directory() {
    let dir = tempfile::tempdir().unwrap();
    let settings = CabalSettings::default().with_cabal_path(dir.path().join("missing"));
    let (interface, _rx) = interface_with_channel(dir.path(), settings);

    // Reaching the spawn means the directory was accepted.
    let err = interface.configure(Path::new("demo.cabal")).unwrap_err();
    assert!(matches!(err, CabalError::Spawn { .. }), "{err}");
}

#[test]
fn test_find_cabal_file_notifies_once_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let (interface, rx) = interface_with_channel(dir.path(), CabalSettings::default());

    assert!(interface.find_cabal_file().is_none());
    let sent = notifications(&rx);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Cabal error");
    assert_eq!(sent[0].message, "Can't find cabal file.");
    assert_eq!(sent[0].severity, Severity::Error);
}

#[test]
fn test_find_cabal_file_present() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("demo.cabal"), "name: demo\n").unwrap();
    let (interface, rx) = interface_with_channel(dir.path(), CabalSettings::default());

    assert_eq!(interface.find_cabal_file(), Some(dir.path().join("demo.cabal")));
    assert!(notifications(&rx).is_empty());
}

#[test]
fn test_check_version_missing_binary() {
    let dir = tempfile::tempdir().unwrap();
    let settings = CabalSettings::default().with_cabal_path(dir.path().join("missing"));
    let (interface, rx) = interface_with_channel(dir.path(), settings);

    assert!(!interface.check_version());
    assert!(notifications(&rx).is_empty());
}

#[test]
fn test_update_with_missing_binary_fails_and_notifies() {
    let dir = tempfile::tempdir().unwrap();
    let settings = CabalSettings::default().with_cabal_path(dir.path().join("missing"));
    let (interface, rx) = interface_with_channel(dir.path(), settings);

    let state = interface.update().join();
    assert!(matches!(state, ProcessState::Failed(_)));
    assert_eq!(notifications(&rx).len(), 1);
}

#[test]
fn test_installed_list_missing_ghc_pkg() {
    let dir = tempfile::tempdir().unwrap();
    let settings = CabalSettings::default().with_ghc_pkg_path(dir.path().join("missing"));
    let (interface, rx) = interface_with_channel(dir.path(), settings);

    assert!(interface.installed_packages_list().is_empty());
    let sent = notifications(&rx);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message, "Can't read installed package list using ghc-pkg.");
}
