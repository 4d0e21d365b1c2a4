//! Project model backed by a package description.

use super::file_loader::{LoadError, SourceFile, SourceKind, load_file};
use crate::base::constants::CABAL_EXTENSION;
use crate::parser::Component;
use crate::resolve::ProjectModel;
use std::path::{Path, PathBuf};

/// First `*.cabal` file directly inside `dir`, by file name.
pub fn find_cabal_file(dir: &Path) -> Option<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!("cannot list {}: {}", dir.display(), err);
            return None;
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(CABAL_EXTENSION)
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// A package and the source roots of its components.
///
/// Relative `hs-source-dirs` entries are resolved against the directory holding
/// the package description; a component without any uses that directory.
#[derive(Debug, Clone)]
pub struct CabalProject {
    root: PathBuf,
    file: SourceFile,
    components: Vec<Component>,
}

impl CabalProject {
    /// Load the package description at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = load_file(path)?;
        let file = SourceFile::new(path, SourceKind::Cabal, &text);
        if file.has_errors() {
            tracing::warn!(
                "{} has {} syntax error(s)",
                path.display(),
                file.parse().errors.len()
            );
        }

        let components = file.cabal().map(|c| c.components()).unwrap_or_default();
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            root,
            file,
            components,
        })
    }

    /// Load the package description found directly inside `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let path = find_cabal_file(dir).ok_or_else(|| LoadError::NoCabalFile(dir.to_path_buf()))?;
        Self::load(path)
    }

    /// Directory holding the package description.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cabal_file(&self) -> &Path {
        self.file.path()
    }

    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    pub fn package_name(&self) -> Option<String> {
        self.file.cabal()?.package_name()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Source roots of one component, resolved against [`root`](Self::root).
    pub fn component_roots(&self, component: &Component) -> Vec<PathBuf> {
        if component.source_dirs.is_empty() {
            return vec![self.root.clone()];
        }
        component
            .source_dirs
            .iter()
            .map(|dir| self.resolve_dir(dir))
            .collect()
    }

    /// Every component's roots in declaration order, deduplicated.
    pub fn all_source_roots(&self) -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = Vec::new();
        for component in &self.components {
            for root in self.component_roots(component) {
                if !roots.contains(&root) {
                    roots.push(root);
                }
            }
        }
        if roots.is_empty() {
            roots.push(self.root.clone());
        }
        roots
    }

    /// The first component with a source root containing `file`.
    pub fn owning_component(&self, file: &Path) -> Option<&Component> {
        self.components.iter().find(|component| {
            self.component_roots(component)
                .iter()
                .any(|root| file.starts_with(root))
        })
    }

    fn resolve_dir(&self, dir: &str) -> PathBuf {
        if dir == "." || dir == "./" {
            self.root.clone()
        } else {
            self.root.join(dir)
        }
    }
}

impl ProjectModel for CabalProject {
    fn source_roots(&self, file: &Path) -> Vec<PathBuf> {
        match self.owning_component(file) {
            Some(component) => self.component_roots(component),
            None => self.all_source_roots(),
        }
    }
}
