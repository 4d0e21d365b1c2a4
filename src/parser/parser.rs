//! Parser state shared by the Cabal and Haskell grammars
//!
//! Builds a rowan GreenNode tree from tokens. Parsing never fails: unexpected
//! input is wrapped in `ERROR` nodes and reported as [`SyntaxError`]s, so the
//! resulting CST stays lossless.

use super::grammar::{cabal, haskell};
use super::lexer::{Token, tokenize_cabal, tokenize_haskell};
use super::syntax_kind::{SyntaxKind, SyntaxNode, TokenSet};
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Lossless tree plus the syntax errors found while building it.
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Red root over the green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Whether no syntax errors were reported.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A recoverable parse error at a text range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}",
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}

/// Parse a Cabal package description into a CST rooted at `CABAL_FILE`
pub fn parse_cabal(input: &str) -> Parse {
    let tokens = tokenize_cabal(input);
    let mut parser = Parser::new(&tokens);
    cabal::parse_file(&mut parser);
    parser.finish()
}

/// Parse a Haskell source into a CST rooted at `HASKELL_FILE`
pub fn parse_haskell(input: &str) -> Parse {
    let tokens = tokenize_haskell(input);
    let mut parser = Parser::new(&tokens);
    haskell::parse_file(&mut parser);
    parser.finish()
}

/// The parser state
pub(crate) struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn current_kind(&self) -> SyntaxKind {
        self.kind_at(self.pos)
    }

    pub(crate) fn current_text(&self) -> &str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    pub(crate) fn kind_at(&self, idx: usize) -> SyntaxKind {
        self.tokens.get(idx).map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    pub(crate) fn text_at(&self, idx: usize) -> &str {
        self.tokens.get(idx).map(|t| t.text).unwrap_or("")
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    pub(crate) fn at_set(&self, set: TokenSet) -> bool {
        !self.at_eof() && set.contains(self.current_kind())
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Kind of the `n`th non-trivia token ahead, not crossing a line break
    pub(crate) fn nth_on_line(&self, n: usize) -> SyntaxKind {
        let mut count = 0;
        for token in &self.tokens[self.pos.min(self.tokens.len())..] {
            if token.kind == SyntaxKind::NEWLINE {
                break;
            }
            if !token.kind.is_trivia() {
                if count == n {
                    return token.kind;
                }
                count += 1;
            }
        }
        SyntaxKind::NEWLINE
    }

    /// Check whether the current token starts a line (column 0)
    pub(crate) fn at_line_start(&self) -> bool {
        self.pos == 0 || self.kind_at(self.pos - 1) == SyntaxKind::NEWLINE
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(crate) fn bump(&mut self) {
        let kind = self.current_kind();
        self.bump_remap(kind);
    }

    /// Consume the current token but record it under another kind
    ///
    /// Input the lexer could not classify is reported whatever kind it is
    /// recorded under.
    pub(crate) fn bump_remap(&mut self, kind: SyntaxKind) {
        let Some(&Token {
            kind: lexed,
            text,
            offset,
        }) = self.current()
        else {
            return;
        };
        if lexed == SyntaxKind::ERROR {
            self.errors.push(SyntaxError::new(
                format!("unexpected input {text:?}"),
                TextRange::at(offset, TextSize::of(text)),
            ));
        }
        self.builder.token(kind.into(), text);
        self.pos += 1;
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected '{}'", kind.debug_name()));
            false
        }
    }

    /// Skip whitespace and comments, stopping at line breaks
    pub(crate) fn skip_ws(&mut self) {
        while self.at_set(TokenSet::COMMENTS.with(SyntaxKind::WHITESPACE)) {
            self.bump();
        }
    }

    /// Skip all trivia, line breaks included
    pub(crate) fn skip_trivia(&mut self) {
        while self.at_set(TokenSet::TRIVIA) {
            self.bump();
        }
    }

    /// Consume tokens up to (not including) the next line break
    pub(crate) fn bump_rest_of_line(&mut self) {
        while !self.at_eof() && !self.at(SyntaxKind::NEWLINE) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .or_else(|| {
                self.tokens
                    .last()
                    .map(|t| TextRange::empty(t.offset + TextSize::of(t.text)))
            })
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Report an error and wrap the rest of the line in an `ERROR` node
    pub(crate) fn error_line(&mut self, message: impl Into<String>) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        self.bump_rest_of_line();
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }
}
