//! # hscabal-base
//!
//! Core library for Haskell IDE support: lossless parsing of Haskell sources
//! and Cabal package descriptions, module-name resolution across source roots,
//! and a facade over the `cabal` package manager.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! cabal     → Package-manager facade (configure, build, update, install)
//!   ↓
//! resolve   → Module name → source file lookup
//!   ↓
//! project   → File loading, package descriptions, source roots
//!   ↓
//! parser    → Logos lexers, grammars, rowan CST, typed elements
//!   ↓
//! base      → Primitives (ModulePath, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → project → resolve → cabal)
// ============================================================================

/// Foundation types: module paths, file extensions, well-known locations
pub mod base;

/// Parser: token catalog, lexers, grammars, composite kinds, typed AST
pub mod parser;

/// Project files: loading, parsing, package descriptions
pub mod project;

/// Module resolution against a project's source roots
pub mod resolve;

/// Package-manager facade and event reporting
pub mod cabal;

// Re-export foundation types
pub use base::ModulePath;
pub use parser::{ConstructorName, Element, ModuleName, NamedElement, SyntaxKind, SyntaxNode};
pub use resolve::{ModuleResolver, ProjectModel, SourceRoots};
