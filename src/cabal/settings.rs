//! Locations of the external tools and the cabal data directory.

use crate::base::constants::CABAL_DATA_DIR;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`CabalSettings::cabal_path`].
pub const CABAL_PATH_ENV: &str = "HSCABAL_CABAL_PATH";
/// Environment variable overriding [`CabalSettings::cabal_data_path`].
pub const CABAL_DATA_PATH_ENV: &str = "HSCABAL_CABAL_DATA_PATH";
/// Environment variable overriding [`CabalSettings::ghc_pkg_path`].
pub const GHC_PKG_PATH_ENV: &str = "HSCABAL_GHC_PKG_PATH";

/// Where to find `cabal`, `ghc-pkg` and the cabal data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CabalSettings {
    pub cabal_path: PathBuf,
    /// Directory holding the package repositories (`~/.cabal`).
    pub cabal_data_path: PathBuf,
    pub ghc_pkg_path: PathBuf,
}

impl Default for CabalSettings {
    fn default() -> Self {
        let data = dirs::home_dir()
            .map(|home| home.join(CABAL_DATA_DIR))
            .unwrap_or_else(|| PathBuf::from(CABAL_DATA_DIR));
        Self {
            cabal_path: PathBuf::from("cabal"),
            cabal_data_path: data,
            ghc_pkg_path: PathBuf::from("ghc-pkg"),
        }
    }
}

impl CabalSettings {
    /// Defaults, overridden by `HSCABAL_*` environment variables that are set
    /// and non-empty.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var_os(key))
    }

    #[must_use]
    pub fn with_cabal_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cabal_path = path.into();
        self
    }

    #[must_use]
    pub fn with_cabal_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cabal_data_path = path.into();
        self
    }

    #[must_use]
    pub fn with_ghc_pkg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ghc_pkg_path = path.into();
        self
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<std::ffi::OsString>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);
        if let Some(path) = read(CABAL_PATH_ENV) {
            self.cabal_path = path;
        }
        if let Some(path) = read(CABAL_DATA_PATH_ENV) {
            self.cabal_data_path = path;
        }
        if let Some(path) = read(GHC_PKG_PATH_ENV) {
            self.ghc_pkg_path = path;
        }
        self
    }

    pub fn cabal_path(&self) -> &Path {
        &self.cabal_path
    }

    pub fn ghc_pkg_path(&self) -> &Path {
        &self.ghc_pkg_path
    }

    pub fn cabal_data_path(&self) -> &Path {
        &self.cabal_data_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::ffi::OsString;

    #[test]
    fn test_default_tools_come_from_path() {
        let settings = CabalSettings::default();
        assert_eq!(settings.cabal_path(), Path::new("cabal"));
        assert_eq!(settings.ghc_pkg_path(), Path::new("ghc-pkg"));
        assert!(settings.cabal_data_path().ends_with(CABAL_DATA_DIR));
    }

    #[test]
    fn test_overrides_skip_empty_values() {
        let env: HashMap<&str, OsString> = HashMap::from([
            (CABAL_PATH_ENV, OsString::from("/opt/cabal/bin/cabal")),
            (GHC_PKG_PATH_ENV, OsString::new()),
        ]);
        let settings = CabalSettings::default().with_overrides(|key| env.get(key).cloned());

        assert_eq!(settings.cabal_path(), Path::new("/opt/cabal/bin/cabal"));
        assert_eq!(settings.ghc_pkg_path(), Path::new("ghc-pkg"));
    }

    #[test]
    fn test_builders() {
        let settings = CabalSettings::default()
            .with_cabal_path("/bin/cabal")
            .with_cabal_data_path("/data")
            .with_ghc_pkg_path("/bin/ghc-pkg");
        assert_eq!(settings.cabal_path(), Path::new("/bin/cabal"));
        assert_eq!(settings.cabal_data_path(), Path::new("/data"));
        assert_eq!(settings.ghc_pkg_path(), Path::new("/bin/ghc-pkg"));
    }
}
