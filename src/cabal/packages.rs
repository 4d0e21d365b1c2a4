//! Package listings: the repository index cache and `ghc-pkg` output.

use super::error::CabalError;
use crate::base::constants::{
    DEFAULT_REPO_DIR, HACKAGE_REPOSITORY, INDEX_CACHE_FILE, INDEX_PACKAGE_TAG, MACOS_REPO_DIR,
};
use smol_str::SmolStr;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// A package name with its known versions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackageRecord {
    pub name: SmolStr,
    /// In the order they were listed; duplicates are kept.
    pub versions: Vec<SmolStr>,
    pub installed: bool,
}

impl PackageRecord {
    pub fn new(name: impl Into<SmolStr>, versions: Vec<SmolStr>, installed: bool) -> Self {
        Self {
            name: name.into(),
            versions,
            installed,
        }
    }
}

/// Location of the Hackage index cache under a cabal data directory.
pub fn index_cache_path(data_dir: &Path) -> PathBuf {
    let repo_dir = if cfg!(target_os = "macos") {
        MACOS_REPO_DIR
    } else {
        DEFAULT_REPO_DIR
    };
    data_dir
        .join(repo_dir)
        .join(HACKAGE_REPOSITORY)
        .join(INDEX_CACHE_FILE)
}

/// Parse `pkg: <name> <version>` lines of an index cache.
///
/// Other lines are ignored, and `pkg:` lines missing a name or version are
/// skipped. Records are ordered by name.
///
/// # Errors
///
/// Returns an error only if reading fails.
pub fn parse_index<R: BufRead>(mut reader: R) -> Result<Vec<PackageRecord>, CabalError> {
    let mut packages: BTreeMap<SmolStr, Vec<SmolStr>> = BTreeMap::new();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some(INDEX_PACKAGE_TAG) {
            continue;
        }
        match (tokens.next(), tokens.next()) {
            (Some(name), Some(version)) => packages
                .entry(SmolStr::new(name))
                .or_default()
                .push(SmolStr::new(version)),
            _ => tracing::debug!("skipping malformed index line {}: {:?}", line_no, line.trim_end()),
        }
    }

    Ok(into_records(packages, false))
}

/// Parse whitespace-separated `name-version` tokens (`ghc-pkg --simple-output list`).
///
/// The version is everything after the last hyphen; tokens without one are
/// skipped. Records are ordered by name.
pub fn parse_installed(output: &str) -> Vec<PackageRecord> {
    let mut packages: BTreeMap<SmolStr, Vec<SmolStr>> = BTreeMap::new();
    for token in output.split_whitespace() {
        match token.rsplit_once('-') {
            Some((name, version)) if !name.is_empty() && !version.is_empty() => packages
                .entry(SmolStr::new(name))
                .or_default()
                .push(SmolStr::new(version)),
            _ => tracing::debug!("skipping installed package token {:?}", token),
        }
    }
    into_records(packages, true)
}

fn into_records(packages: BTreeMap<SmolStr, Vec<SmolStr>>, installed: bool) -> Vec<PackageRecord> {
    packages
        .into_iter()
        .map(|(name, versions)| PackageRecord {
            name,
            versions,
            installed,
        })
        .collect()
}
