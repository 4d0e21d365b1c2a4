//! Foundation constants shared by the parser, the project loader and the
//! cabal facade.
//!
//! This module has NO dependencies on other hscabal modules.

pub mod constants;
mod module_path;

pub use module_path::ModulePath;
