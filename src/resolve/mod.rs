//! Module name resolution
//!
//! Maps a dotted module name (`Data.Map.Strict`) to the source file declaring
//! it by walking the source roots of the file that mentions the name. A
//! directory contributes `name.` to the dotted prefix and a `.hs` file
//! contributes its stem; the first file whose dotted name equals the target
//! wins, roots being searched in order.
//!
//! A miss is not an error: the module may live in a library outside the
//! project. Unreadable directories are treated as empty.

use crate::base::constants::HASKELL_EXTENSION;
use crate::parser::{ModuleName, NamedElement};
use crate::project::{SourceFile, load_and_parse};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Supplies the ordered source roots visible from a file.
pub trait ProjectModel {
    fn source_roots(&self, file: &Path) -> Vec<PathBuf>;
}

impl<T: ProjectModel + ?Sized> ProjectModel for &T {
    fn source_roots(&self, file: &Path) -> Vec<PathBuf> {
        (**self).source_roots(file)
    }
}

impl<T: ProjectModel + ?Sized> ProjectModel for std::sync::Arc<T> {
    fn source_roots(&self, file: &Path) -> Vec<PathBuf> {
        (**self).source_roots(file)
    }
}

/// A fixed list of source roots shared by every file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRoots(Vec<PathBuf>);

impl SourceRoots {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self(roots.into_iter().map(Into::into).collect())
    }

    pub fn push(&mut self, root: impl Into<PathBuf>) {
        self.0.push(root.into());
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.0
    }
}

impl ProjectModel for SourceRoots {
    fn source_roots(&self, _file: &Path) -> Vec<PathBuf> {
        self.0.clone()
    }
}

/// Resolves module names against a project model.
#[derive(Debug, Clone)]
pub struct ModuleResolver<P> {
    project: P,
}

impl<P: ProjectModel> ModuleResolver<P> {
    pub fn new(project: P) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &P {
        &self.project
    }

    /// Path of the file declaring `name`, as seen from `file`.
    pub fn find_module_file(&self, file: &Path, name: &ModuleName) -> Option<PathBuf> {
        self.find_module(file, &name.name())
    }

    /// Path of the file declaring the dotted module `target`, as seen from `file`.
    pub fn find_module(&self, file: &Path, target: &str) -> Option<PathBuf> {
        let roots = self.project.source_roots(file);
        let found = find_in_roots(target, &roots);
        match &found {
            Some(path) => tracing::debug!("resolved {} to {}", target, path.display()),
            None => tracing::trace!("{} not found in {} source root(s)", target, roots.len()),
        }
        found
    }

    /// Load and parse the file declaring `name`.
    ///
    /// A file that is found but cannot be read is logged and treated as a miss.
    pub fn resolve(&self, file: &Path, name: &ModuleName) -> Option<SourceFile> {
        let path = self.find_module_file(file, name)?;
        match load_and_parse(&path) {
            Ok(source) => Some(source),
            Err(err) => {
                tracing::warn!("cannot load module {}: {}", name.name(), err);
                None
            }
        }
    }
}

/// Search `roots` in order for the file whose dotted name equals `target`.
pub fn find_in_roots(target: &str, roots: &[PathBuf]) -> Option<PathBuf> {
    roots.iter().find_map(|root| find_in_root(target, root))
}

fn find_in_root(target: &str, root: &Path) -> Option<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !entry.file_type().is_dir() || can_lead_to(entry, root, target));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::trace!("skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_source_extension(entry.path()) {
            continue;
        }
        if dotted_name(entry.path(), root, true).as_deref() == Some(target) {
            return Some(entry.into_path());
        }
    }
    None
}

/// Whether the directory's dotted prefix can still lead to `target`.
fn can_lead_to(entry: &DirEntry, root: &Path, target: &str) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    match dotted_name(entry.path(), root, false) {
        Some(prefix) => target
            .strip_prefix(prefix.as_str())
            .is_some_and(|rest| rest.starts_with('.')),
        None => false,
    }
}

fn has_source_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(HASKELL_EXTENSION)
}

/// Dotted name of a path below `root`: components joined by `.`, with the
/// extension of the last one dropped for files. `None` for the root itself or
/// non-UTF-8 names.
fn dotted_name(path: &Path, root: &Path, is_file: bool) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut segments = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    if is_file {
        let last = segments.pop()?;
        segments.push(Path::new(last).file_stem()?.to_str()?);
    }
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("."))
}
