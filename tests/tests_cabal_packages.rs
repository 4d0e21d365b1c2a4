#![allow(clippy::unwrap_used, clippy::expect_used)]

#[path = "helpers/fixtures.rs"]
mod fixtures;

use hscabal::cabal::{
    CabalInterface, CabalSettings, Event, Notification, PackageRecord, Severity,
    index_cache_path, parse_index, parse_installed,
};
use smol_str::SmolStr;
use std::io::Cursor;
use std::sync::{Arc, mpsc};
use tempfile::TempDir;

fn versions(list: &[&str]) -> Vec<SmolStr> {
    list.iter().map(|v| SmolStr::new(v)).collect()
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
fn test_index_groups_versions_by_name() {
    let input = "pkg: foo 1.0\npkg: foo 1.1\npkg: bar 2.0\n";
    let records = parse_index(Cursor::new(input)).unwrap();

    assert_eq!(
        records,
        vec![
            PackageRecord::new("bar", versions(&["2.0"]), false),
            PackageRecord::new("foo", versions(&["1.0", "1.1"]), false),
        ]
    );
}

#[test]
fn test_installed_splits_at_last_hyphen() {
    let records = parse_installed("base-4.7.0 bytestring-0.10.4.0");

    assert_eq!(
        records,
        vec![
            PackageRecord::new("base", versions(&["4.7.0"]), true),
            PackageRecord::new("bytestring", versions(&["0.10.4.0"]), true),
        ]
    );
    assert_eq!(parse_installed("haskell-src-exts-1.16.0")[0].name, "haskell-src-exts");
}

#[test]
fn test_packages_list_reads_index_cache() {
    let temp = TempDir::new().unwrap();
    let index = index_cache_path(temp.path());
    std::fs::create_dir_all(index.parent().unwrap()).unwrap();
    std::fs::write(&index, "pre-amble 1\npkg: text 2.0\npkg: aeson 2.1.0.0\npkg: text 2.1\n").unwrap();

    let (tx, rx) = mpsc::channel();
    let interface = CabalInterface::new(temp.path(), CabalSettings::default().with_cabal_data_path(temp.path()))
        .with_sink(Arc::new(tx));

    let names: Vec<SmolStr> = interface.packages_list().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["aeson", "text"]);
    assert!(notifications(&rx).is_empty());
}

#[test]
fn test_missing_index_yields_empty_list_and_one_notification() {
    let temp = TempDir::new().unwrap();
    let (tx, rx) = mpsc::channel();
    let interface = CabalInterface::new(temp.path(), CabalSettings::default().with_cabal_data_path(temp.path()))
        .with_sink(Arc::new(tx));

    assert!(interface.packages_list().is_empty());

    let sent = notifications(&rx);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Cabal error");
    assert_eq!(sent[0].message, "Can't read cabal package list.");
    assert_eq!(sent[0].severity, Severity::Error);
}

#[test]
fn test_index_path_is_a_directory() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(index_cache_path(temp.path())).unwrap();
    let (tx, rx) = mpsc::channel();
    let interface = CabalInterface::new(temp.path(), CabalSettings::default().with_cabal_data_path(temp.path()))
        .with_sink(Arc::new(tx));

    assert!(interface.packages_list().is_empty());
    assert_eq!(notifications(&rx).len(), 1);
}
