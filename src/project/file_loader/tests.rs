#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_content_haskell() {
    let file = parse_content("module Main where\nimport Data.List\n", Path::new("Main.hs")).unwrap();
    assert_eq!(file.kind(), SourceKind::Haskell);
    assert!(!file.has_errors());
    assert_eq!(file.haskell().unwrap().imports().count(), 1);
    assert!(file.cabal().is_none());
}

#[test]
fn test_parse_content_cabal() {
    let file = parse_content("name: demo\n", Path::new("demo.cabal")).unwrap();
    assert_eq!(file.kind(), SourceKind::Cabal);
    assert_eq!(file.cabal().unwrap().package_name().as_deref(), Some("demo"));
    assert!(file.haskell().is_none());
}

#[test]
fn test_parse_content_keeps_syntax_errors() {
    let file = parse_content("import\n", Path::new("Broken.hs")).unwrap();
    assert!(file.has_errors());
    assert_eq!(file.syntax().text().to_string(), "import\n");
}

#[rstest]
#[case("notes.txt")]
#[case("Main.lhs")]
fn test_parse_content_unsupported_extension(#[case] name: &str) {
    let err = parse_content("x", Path::new(name)).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedExtension(_)));
    assert!(err.to_string().contains("unsupported file extension"));
}

#[test]
fn test_parse_content_no_extension() {
    let err = parse_content("x", Path::new("Makefile")).unwrap_err();
    assert!(matches!(err, LoadError::NoExtension(_)));
}

#[test]
fn test_load_and_parse_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = load_and_parse(&temp.path().join("Missing.hs")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn test_collect_file_paths_sorted_and_filtered() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src/Data")).unwrap();
    fs::write(temp.path().join("demo.cabal"), "name: demo\n").unwrap();
    fs::write(temp.path().join("src/Main.hs"), "main = pure ()\n").unwrap();
    fs::write(temp.path().join("src/Data/Tree.hs"), "module Data.Tree where\n").unwrap();
    fs::write(temp.path().join("src/README.md"), "# readme\n").unwrap();

    let paths = collect_file_paths(temp.path()).unwrap();
    let relative: Vec<_> = paths
        .iter()
        .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        relative,
        vec![
            PathBuf::from("demo.cabal"),
            PathBuf::from("src/Data/Tree.hs"),
            PathBuf::from("src/Main.hs"),
        ]
    );
}

#[test]
fn test_collect_file_paths_missing_dir() {
    let temp = TempDir::new().unwrap();
    assert!(collect_file_paths(&temp.path().join("nope")).is_err());
}

#[test]
fn test_load_all_skips_failures() {
    let temp = TempDir::new().unwrap();
    let good = temp.path().join("A.hs");
    fs::write(&good, "module A where\n").unwrap();
    let missing = temp.path().join("B.hs");

    let files = load_all(&[good.clone(), missing]);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path(), good.as_path());
}
