//! Grammar modules for Cabal package descriptions and Haskell sources
//!
//! - `cabal` - indentation-structured fields and sections
//! - `haskell` - module header, imports and data declarations; everything
//!   else is kept as opaque top-level declarations
//!
//! Both drive the shared [`Parser`](super::parser::Parser) state.

pub(crate) mod cabal;
pub(crate) mod haskell;
