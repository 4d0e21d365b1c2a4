//! File extensions and well-known paths.

/// Extension of Haskell source files recognised by the module resolver.
pub const HASKELL_EXTENSION: &str = "hs";

/// Extension of package-description files.
pub const CABAL_EXTENSION: &str = "cabal";

/// All extensions the project loader knows how to parse.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[HASKELL_EXTENSION, CABAL_EXTENSION];

/// Package repository whose index cache is read by the package listing.
pub const HACKAGE_REPOSITORY: &str = "hackage.haskell.org";

/// File name of the package-index cache inside a repository directory.
pub const INDEX_CACHE_FILE: &str = "00-index.cache";

/// Repository cache directory under the cabal data path on macOS.
pub const MACOS_REPO_DIR: &str = "repo-cache";

/// Repository cache directory under the cabal data path elsewhere.
pub const DEFAULT_REPO_DIR: &str = "packages";

/// Name of the cabal data directory under the user's home.
pub const CABAL_DATA_DIR: &str = ".cabal";

/// Line prefix marking a package entry in the index cache.
pub const INDEX_PACKAGE_TAG: &str = "pkg:";
