//! Loading and parsing Haskell sources and package descriptions from disk.

use crate::base::constants::{CABAL_EXTENSION, HASKELL_EXTENSION, SUPPORTED_EXTENSIONS};
use crate::parser::{AstNode, CabalFile, HaskellFile, Parse, SyntaxNode, parse_cabal, parse_haskell};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised while locating, reading or classifying project files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no file extension: {}", .0.display())]
    NoExtension(PathBuf),

    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("no package description found in {}", .0.display())]
    NoCabalFile(PathBuf),
}

/// Language of a project file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Haskell,
    Cabal,
}

impl SourceKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            HASKELL_EXTENSION => Some(Self::Haskell),
            CABAL_EXTENSION => Some(Self::Cabal),
            _ => None,
        }
    }

    pub fn parse(self, text: &str) -> Parse {
        match self {
            Self::Haskell => parse_haskell(text),
            Self::Cabal => parse_cabal(text),
        }
    }
}

/// A parsed project file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    kind: SourceKind,
    parse: Parse,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, kind: SourceKind, text: &str) -> Self {
        Self {
            path: path.into(),
            kind,
            parse: kind.parse(text),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    /// Typed root of a Haskell source, `None` for package descriptions.
    pub fn haskell(&self) -> Option<HaskellFile> {
        HaskellFile::cast(self.parse.syntax())
    }

    /// Typed root of a package description, `None` for Haskell sources.
    pub fn cabal(&self) -> Option<CabalFile> {
        CabalFile::cast(self.parse.syntax())
    }

    pub fn has_errors(&self) -> bool {
        !self.parse.ok()
    }
}

/// Get file extension from path
pub fn get_extension(path: &Path) -> Result<&str, LoadError> {
    path.extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| LoadError::NoExtension(path.to_path_buf()))
}

/// Classify a path by its extension.
pub fn validate_extension(path: &Path) -> Result<SourceKind, LoadError> {
    let ext = get_extension(path)?;
    SourceKind::from_extension(ext).ok_or_else(|| LoadError::UnsupportedExtension(ext.to_string()))
}

pub fn load_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse in-memory content, picking the grammar from the path's extension.
pub fn parse_content(content: &str, path: &Path) -> Result<SourceFile, LoadError> {
    let kind = validate_extension(path)?;
    Ok(SourceFile::new(path, kind, content))
}

/// Read and parse a file.
///
/// # Errors
///
/// Returns an error if the extension is missing or unsupported, or the file
/// cannot be read.
pub fn load_and_parse(path: &Path) -> Result<SourceFile, LoadError> {
    let kind = validate_extension(path)?;
    let content = load_file(path)?;
    Ok(SourceFile::new(path, kind, &content))
}

/// Recursively collect files with a supported extension, sorted by path.
///
/// Unreadable entries below `dir` are skipped.
pub fn collect_file_paths(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found"),
        });
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {}", err);
                continue;
            }
        };
        let supported = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e));
        if entry.file_type().is_file() && supported {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

/// Parse many files in parallel; failures are logged and skipped.
pub fn load_all(paths: &[PathBuf]) -> Vec<SourceFile> {
    paths
        .par_iter()
        .filter_map(|path| match load_and_parse(path) {
            Ok(file) => Some(file),
            Err(err) => {
                tracing::warn!("failed to load {}: {}", path.display(), err);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests;
