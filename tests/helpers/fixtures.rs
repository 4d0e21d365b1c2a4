//! Shared fixtures for integration tests.
#![allow(dead_code, clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};

/// A package with a library, an executable and a test suite.
pub const PACKAGE_DESCRIPTION: &str = "\
-- Initial demo.cabal generated by cabal init.
name:                demo
version:             0.1.0.0
synopsis:            A small demo package
license:             BSD3
build-type:          Simple
cabal-version:       >=1.10

library
  exposed-modules:     Demo.Core
                     , Demo.Util
  build-depends:       base >=4.7 && <5
                     , containers
  hs-source-dirs:      src
  default-language:    Haskell2010

executable demo
  main-is:             Main.hs
  hs-source-dirs:      app
  build-depends:       base, demo

test-suite spec
  type:                exitcode-stdio-1.0
  main-is:             Spec.hs
  hs-source-dirs:      test, src
  build-depends:       base, demo
";

/// Create `relative` below `root` with `content`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Create an empty file.
pub fn touch(root: &Path, relative: &str) -> PathBuf {
    write_file(root, relative, "")
}

/// Write an executable shell script.
#[cfg(unix)]
pub fn write_script(root: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = write_file(root, name, &format!("#!/bin/sh\n{body}\n"));
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).unwrap();
    path
}
