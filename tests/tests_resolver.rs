#![allow(clippy::unwrap_used, clippy::expect_used)]

#[path = "helpers/fixtures.rs"]
mod fixtures;

use fixtures::{PACKAGE_DESCRIPTION, touch, write_file};
use hscabal::parser::{AstNode, HaskellFile, parse_haskell};
use hscabal::project::CabalProject;
use hscabal::resolve::{ModuleResolver, SourceRoots, find_in_roots};
use hscabal::{ModuleName, NamedElement};
use std::path::Path;
use tempfile::TempDir;

fn imported_names(source: &str) -> Vec<ModuleName> {
    let file = HaskellFile::cast(parse_haskell(source).syntax()).unwrap();
    file.imports().filter_map(|i| i.module_name()).collect()
}

#[test]
fn test_resolves_nested_module() {
    let temp = TempDir::new().unwrap();
    let expected = touch(temp.path(), "A/B/C.hs");

    let roots = [temp.path().to_path_buf()];
    assert_eq!(find_in_roots("A.B.C", &roots), Some(expected));
    assert_eq!(find_in_roots("A.B.D", &roots), None);
}

#[test]
fn test_resolution_is_case_sensitive() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "A/B/C.hs");

    assert_eq!(find_in_roots("a.b.c", &[temp.path().to_path_buf()]), None);
}

#[test]
fn test_first_root_wins() {
    let temp = TempDir::new().unwrap();
    let first = touch(&temp.path().join("one"), "Data/Shared.hs");
    touch(&temp.path().join("two"), "Data/Shared.hs");

    let roots = [temp.path().join("one"), temp.path().join("two")];
    assert_eq!(find_in_roots("Data.Shared", &roots), Some(first.clone()));

    let reversed = [temp.path().join("two"), temp.path().join("one")];
    assert_ne!(find_in_roots("Data.Shared", &reversed), Some(first));
}

#[test]
fn test_resolver_follows_imports() {
    let temp = TempDir::new().unwrap();
    let main = write_file(
        temp.path(),
        "Main.hs",
        "module Main where\n\nimport qualified Data.Tree as T\nimport Data.Missing\n",
    );
    write_file(temp.path(), "Data/Tree.hs", "module Data.Tree where\n\ndata Tree = Leaf | Node Tree Tree\n");

    let resolver = ModuleResolver::new(SourceRoots::new([temp.path()]));
    let names = imported_names(&std::fs::read_to_string(&main).unwrap());
    assert_eq!(names.len(), 2);

    let tree = resolver.resolve(&main, &names[0]).expect("Data.Tree should resolve");
    let module = tree.haskell().unwrap().module_name().unwrap();
    assert_eq!(module.name(), "Data.Tree");
    let constructors: Vec<String> = tree.haskell().unwrap().constructors().map(|c| c.name()).collect();
    assert_eq!(constructors, vec!["Leaf", "Node"]);

    assert!(resolver.resolve(&main, &names[1]).is_none());
}

#[test]
fn test_package_roots_depend_on_owning_component() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "demo.cabal", PACKAGE_DESCRIPTION);
    let lib_module = touch(temp.path(), "src/Demo/Core.hs");
    let app_main = touch(temp.path(), "app/Main.hs");
    let spec_main = touch(temp.path(), "test/Spec.hs");
    touch(temp.path(), "test/Demo/Fixtures.hs");

    let project = CabalProject::discover(temp.path()).unwrap();
    let resolver = ModuleResolver::new(&project);

    // The test suite lists `src` as a second root.
    assert_eq!(resolver.find_module(&spec_main, "Demo.Core"), Some(lib_module.clone()));
    assert!(resolver.find_module(&spec_main, "Demo.Fixtures").is_some());

    // The library cannot see test sources, and the executable only sees `app`.
    assert_eq!(resolver.find_module(&lib_module, "Demo.Fixtures"), None);
    assert_eq!(resolver.find_module(&app_main, "Demo.Core"), None);
}

#[test]
fn test_file_outside_components_searches_every_root() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "demo.cabal", PACKAGE_DESCRIPTION);
    let fixture = touch(temp.path(), "test/Demo/Fixtures.hs");
    let setup = touch(temp.path(), "Setup.hs");

    let project = CabalProject::discover(temp.path()).unwrap();
    let resolver = ModuleResolver::new(&project);
    assert_eq!(resolver.find_module(&setup, "Demo.Fixtures"), Some(fixture));
}

#[test]
fn test_unreadable_root_degrades_to_miss() {
    let resolver = ModuleResolver::new(SourceRoots::new([Path::new("/definitely/not/here")]));
    assert_eq!(resolver.find_module(Path::new("Main.hs"), "Main"), None);
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_counts_as_empty() {
    use std::fs::{Permissions, set_permissions};
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let locked = temp.path().join("one/Data");
    touch(&locked, "Other.hs");
    let expected = touch(&temp.path().join("two"), "Data/Tree.hs");
    set_permissions(&locked, Permissions::from_mode(0o000)).unwrap();

    let roots = [temp.path().join("one"), temp.path().join("two")];
    let found = find_in_roots("Data.Tree", &roots);
    set_permissions(&locked, Permissions::from_mode(0o755)).unwrap();

    assert_eq!(found, Some(expected));
}
