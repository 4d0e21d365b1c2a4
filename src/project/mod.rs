//! Project files on disk: loading and parsing sources, and the package
//! description that declares a project's source roots.

mod cabal_project;
pub mod file_loader;

pub use cabal_project::{CabalProject, find_cabal_file};
pub use file_loader::{
    LoadError, SourceFile, SourceKind, collect_file_paths, load_all, load_and_parse,
    parse_content,
};
