//! Rowan-based lossless parsers for Haskell sources and Cabal package
//! descriptions
//!
//! This module provides lossless parsing using:
//! - **logos** lexers, one per language
//! - a **rowan** green tree shared by both grammars
//!
//! Whitespace and comments are preserved in the tree, so the text of a root
//! node is always the exact input.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Token { kind, text, offset }
//!     ↓
//! Grammar (cabal / haskell) → GreenNode tree
//!     ↓
//! SyntaxNode (rowan) → red tree with parent pointers
//!     ↓
//! Kind registry → typed Element wrappers
//! ```

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod grammar;
pub mod kinds;
mod lexer;
mod syntax_kind;

pub use ast::*;
pub use kinds::{CompositeKind, ElementConstructor, KindRegistry, RegistryError, registry};
pub use lexer::{
    CabalLexer, CabalToken, HaskellLexer, HaskellToken, Lexer, Token, tokenize_cabal,
    tokenize_haskell,
};
pub use parser::{Parse, SyntaxError, parse_cabal, parse_haskell};
pub use syntax_kind::{
    HaskellLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
    TokenSet,
};

/// Rowan types that appear in this module's API
pub use rowan::{GreenNode, TextRange, TextSize};
