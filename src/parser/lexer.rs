//! Logos-based lexers for Haskell sources and Cabal package descriptions
//!
//! Both lexers map into the shared [`SyntaxKind`] catalog and never drop input:
//! concatenating the token texts reproduces the source exactly.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A lexed token: its kind, its exact text and its start offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping a logos-generated tokenizer
pub struct Lexer<'a, T: Logos<'a>> {
    inner: logos::Lexer<'a, T>,
    offset: u32,
}

/// Lexer for `.hs` sources
pub type HaskellLexer<'a> = Lexer<'a, HaskellToken>;

/// Lexer for `.cabal` package descriptions
pub type CabalLexer<'a> = Lexer<'a, CabalToken>;

impl<'a, T> Lexer<'a, T>
where
    T: Logos<'a, Source = str>,
    T::Extras: Default,
{
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: T::lexer(input),
            offset: 0,
        }
    }
}

impl<'a, T> Iterator for Lexer<'a, T>
where
    T: Logos<'a, Source = str> + Into<SyntaxKind>,
{
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(_) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize a Haskell source into a Vec
pub fn tokenize_haskell(input: &str) -> Vec<Token<'_>> {
    HaskellLexer::new(input).collect()
}

/// Tokenize a Cabal package description into a Vec
pub fn tokenize_cabal(input: &str) -> Vec<Token<'_>> {
    CabalLexer::new(input).collect()
}

/// Haskell token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum HaskellToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\f]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"--[^\n]*")]
    LineComment,

    // Pragmas (`{-# ... #-}`) and Haddock blocks (`{-| ... -}`) included.
    #[token("{-", block_comment)]
    BlockComment,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("module")]
    Module,
    #[token("where")]
    Where,
    #[token("import")]
    Import,
    #[token("qualified")]
    Qualified,
    #[token("as")]
    As,
    #[token("hiding")]
    Hiding,
    #[token("data")]
    Data,
    #[token("newtype")]
    Newtype,
    #[token("deriving")]
    Deriving,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-z_][a-zA-Z0-9_']*")]
    VarId,

    #[regex(r"[A-Z][a-zA-Z0-9_']*")]
    ConId,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r"'([^'\\\n]|\\[^'\n]*)'")]
    Char,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(".", priority = 3)]
    Dot,
    #[token("=", priority = 3)]
    Eq,
    #[token("|", priority = 3)]
    Pipe,

    #[regex(r"[!#$%&*+./<=>?@\\^|~:\-]+")]
    Operator,

    #[regex(r"[\[\]{};`]")]
    Special,

    // Unicode identifiers and symbols
    #[regex(r"[^\x00-\x7F]+")]
    NonAscii,
}

/// Consume a block comment after its opening `{-`, nested comments included.
///
/// An unterminated comment swallows the rest of the input and lexes as an error.
fn block_comment(lex: &mut logos::Lexer<'_, HaskellToken>) -> bool {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'{', b'-') => {
                depth += 1;
                i += 2;
            }
            (b'-', b'}') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    lex.bump(i);
                    return true;
                }
            }
            _ => i += 1,
        }
    }
    lex.bump(rest.len());
    false
}

impl From<HaskellToken> for SyntaxKind {
    fn from(token: HaskellToken) -> Self {
        match token {
            HaskellToken::Whitespace => SyntaxKind::WHITESPACE,
            HaskellToken::Newline => SyntaxKind::NEWLINE,
            HaskellToken::LineComment => SyntaxKind::END_OF_LINE_COMMENT,
            HaskellToken::BlockComment => SyntaxKind::COMMENT,
            HaskellToken::Module => SyntaxKind::MODULE_KW,
            HaskellToken::Where => SyntaxKind::WHERE_KW,
            HaskellToken::Import => SyntaxKind::IMPORT_KW,
            HaskellToken::Qualified => SyntaxKind::QUALIFIED_KW,
            HaskellToken::As => SyntaxKind::AS_KW,
            HaskellToken::Hiding => SyntaxKind::HIDING_KW,
            HaskellToken::Data => SyntaxKind::DATA_KW,
            HaskellToken::Newtype => SyntaxKind::NEWTYPE_KW,
            HaskellToken::Deriving => SyntaxKind::DERIVING_KW,
            HaskellToken::VarId => SyntaxKind::ID,
            HaskellToken::ConId => SyntaxKind::CON_ID,
            HaskellToken::Number => SyntaxKind::NUMBER,
            HaskellToken::String | HaskellToken::Char => SyntaxKind::STRING,
            HaskellToken::LParen => SyntaxKind::L_PAREN,
            HaskellToken::RParen => SyntaxKind::R_PAREN,
            HaskellToken::Comma => SyntaxKind::COMMA,
            HaskellToken::Dot => SyntaxKind::DOT,
            HaskellToken::Eq => SyntaxKind::EQ,
            HaskellToken::Pipe => SyntaxKind::PIPE,
            HaskellToken::Operator | HaskellToken::Special => SyntaxKind::OPERATOR,
            HaskellToken::NonAscii => SyntaxKind::ID,
        }
    }
}

/// Cabal token enum - maps to SyntaxKind
///
/// Cabal identifiers may contain hyphens (`build-depends`, `test-suite`), and
/// version numbers lex as `NUMBER DOT NUMBER ...`.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum CabalToken {
    #[regex(r"[ \t\f]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"--[^\n]*")]
    LineComment,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_'\-]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    #[regex(r"[!#$%&*+/<=>?@\\^|~{}\[\];`'\-]+")]
    Operator,

    // Author names, descriptions
    #[regex(r"[^\x00-\x7F]+")]
    NonAscii,
}

impl From<CabalToken> for SyntaxKind {
    fn from(token: CabalToken) -> Self {
        match token {
            CabalToken::Whitespace => SyntaxKind::WHITESPACE,
            CabalToken::Newline => SyntaxKind::NEWLINE,
            CabalToken::LineComment => SyntaxKind::END_OF_LINE_COMMENT,
            CabalToken::Ident => SyntaxKind::ID,
            CabalToken::Number => SyntaxKind::NUMBER,
            CabalToken::String => SyntaxKind::STRING,
            CabalToken::Colon => SyntaxKind::COLON,
            CabalToken::Comma => SyntaxKind::COMMA,
            CabalToken::Dot => SyntaxKind::DOT,
            CabalToken::LParen => SyntaxKind::L_PAREN,
            CabalToken::RParen => SyntaxKind::R_PAREN,
            CabalToken::Operator => SyntaxKind::OPERATOR,
            CabalToken::NonAscii => SyntaxKind::ID,
        }
    }
}
