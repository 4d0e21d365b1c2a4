//! Typed AST wrappers over the untyped rowan CST.
//!
//! A wrapper owns one node of its kind and exposes children by role.
//! [`Element`] is the closed set of wrappers the composite-kind registry can
//! produce; it replaces runtime type tests on raw nodes.

use super::syntax_kind::SyntaxKind;
use super::SyntaxNode;

/// Whether `node` owns a token of `kind` directly.
fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .any(|e| e.as_token().is_some_and(|t| t.kind() == kind))
}

/// Text of a node with comment tokens removed.
fn text_without_comments(node: &SyntaxNode) -> String {
    node.descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !super::TokenSet::COMMENTS.contains(t.kind()))
        .map(|t| t.text().to_string())
        .collect()
}

/// Accessor methods over the wrapped node.
///
/// ```text
/// node_accessors!(first key: PropertyKey);          // first typed child
/// node_accessors!(children imports: Import);         // typed children
/// node_accessors!(descendants names: ModuleName);    // typed descendants
/// node_accessors!(after AS_KW alias: ModuleName);    // first typed child after a token
/// node_accessors!(flag is_hiding: HIDING_KW);        // direct token present
/// ```
macro_rules! node_accessors {
    (first $name:ident: $ty:ident) => {
        pub fn $name(&self) -> Option<$ty> {
            self.0.children().find_map($ty::cast)
        }
    };
    (children $name:ident: $ty:ident) => {
        pub fn $name(&self) -> impl Iterator<Item = $ty> + '_ {
            self.0.children().filter_map($ty::cast)
        }
    };
    (descendants $name:ident: $ty:ident) => {
        pub fn $name(&self) -> impl Iterator<Item = $ty> + '_ {
            self.0.descendants().filter_map($ty::cast)
        }
    };
    (after $token:ident $name:ident: $ty:ident) => {
        pub fn $name(&self) -> Option<$ty> {
            self.0
                .children_with_tokens()
                .skip_while(|e| e.kind() != SyntaxKind::$token)
                .filter_map(|e| e.into_node())
                .find_map($ty::cast)
        }
    };
    (flag $name:ident: $token:ident) => {
        pub fn $name(&self) -> bool {
            has_token(&self.0, SyntaxKind::$token)
        }
    };
}

/// A typed view over a node of one or more kinds.
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    /// Typed descendants of this node.
    fn descendants<T: AstNode>(&self) -> impl Iterator<Item = T> {
        self.syntax().descendants().filter_map(T::cast)
    }

    /// Extract the Haddock comment preceding this node.
    fn doc_comment(&self) -> Option<String> {
        extract_doc_comment(self.syntax())
    }
}

/// Extract a Haddock comment (`-- |` lines or a `{-| -}` block) preceding a node.
///
/// Only whitespace may separate the comment from the node.
pub fn extract_doc_comment(node: &SyntaxNode) -> Option<String> {
    let mut lines = Vec::new();
    let mut current = node.prev_sibling_or_token();

    while let Some(element) = current {
        let token = element.into_token()?;
        match token.kind() {
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE => {
                current = token.prev_sibling_or_token();
            }
            SyntaxKind::COMMENT => {
                let body = token.text().strip_prefix("{-|")?.strip_suffix("-}")?;
                lines.extend(body.lines().rev().map(|l| l.trim().to_string()));
                return join_doc_lines(lines);
            }
            SyntaxKind::END_OF_LINE_COMMENT => {
                let body = token.text().trim_start_matches('-');
                if let Some(first) = body.trim_start().strip_prefix('|') {
                    lines.push(first.trim().to_string());
                    return join_doc_lines(lines);
                }
                lines.push(body.trim().to_string());
                current = token.prev_sibling_or_token();
            }
            _ => return None,
        }
    }
    None
}

/// Join doc lines collected bottom-up.
fn join_doc_lines(mut lines: Vec<String>) -> Option<String> {
    lines.reverse();
    let text = lines
        .into_iter()
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    (!text.is_empty()).then_some(text)
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// After the macros: `macro_rules!` scoping is textual.
mod cabal;
mod element;
mod haskell;

// Flat namespace for callers
pub use self::cabal::*;
pub use self::element::*;
pub use self::haskell::*;
