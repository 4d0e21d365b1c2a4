//! Token and node kinds shared by the Haskell and Cabal grammars
//!
//! This enum is the token catalog shared by the Haskell source grammar and the
//! Cabal package-description grammar. Tokens are leaves produced by the lexers;
//! composite kinds are the non-terminals registered in [`super::kinds`].

/// All syntax kinds (tokens and nodes) for Haskell and Cabal files
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    NEWLINE,
    END_OF_LINE_COMMENT, // -- ...
    COMMENT,             // {- ... -} and pragmas

    // =========================================================================
    // LITERALS
    // =========================================================================
    STRING, // "hello" or 'c'
    NUMBER, // 42
    ID,     // lowercase identifier (Cabal: any identifier, hyphens allowed)
    CON_ID, // Uppercase identifier

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    COLON,    // :
    COMMA,    // ,
    DOT,      // .
    L_PAREN,  // (
    R_PAREN,  // )
    EQ,       // =
    PIPE,     // |
    OPERATOR, // any other symbol run

    // =========================================================================
    // KEYWORDS (Haskell)
    // =========================================================================
    MODULE_KW,
    WHERE_KW,
    IMPORT_KW,
    QUALIFIED_KW,
    AS_KW,
    HIDING_KW,
    DATA_KW,
    NEWTYPE_KW,
    DERIVING_KW,

    // =========================================================================
    // COMPOSITE NODES - Cabal
    // =========================================================================
    CABAL_FILE,
    PROPERTY,
    NAME,
    PROPERTY_KEY,
    PROPERTY_VALUE,
    EXECUTABLE,
    TEST_SUITE,
    SECTION,
    SECTION_TYPE,

    // =========================================================================
    // COMPOSITE NODES - Haskell
    // =========================================================================
    HASKELL_FILE,
    MODULE_HEADER,
    IMPORT_DECL,
    DATA_DECL,
    CONSTRUCTOR_NAME,
    MODULE_NAME,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

const _: () = assert!((SyntaxKind::__LAST as u16) < 64, "TokenSet holds at most 64 kinds");

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, newline or comment)
    pub fn is_trivia(self) -> bool {
        TokenSet::TRIVIA.contains(self)
    }

    /// Check if this is a Haskell keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::MODULE_KW as u16) && (self as u16) <= (Self::DERIVING_KW as u16)
    }

    /// Punctuation and operator tokens.
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::COLON as u16) && (self as u16) <= (Self::OPERATOR as u16)
    }

    /// Identifiers, strings and numbers.
    pub fn is_literal(self) -> bool {
        matches!(self, Self::STRING | Self::NUMBER | Self::ID | Self::CON_ID)
    }

    /// Check if this is a composite (non-terminal) kind
    pub fn is_composite(self) -> bool {
        (self as u16) >= (Self::CABAL_FILE as u16) && (self as u16) <= (Self::MODULE_NAME as u16)
    }

    /// Human-readable name used in diagnostics. Never empty.
    ///
    /// Composite kinds report the name they are registered under in
    /// [`super::kinds::registry`].
    pub fn debug_name(self) -> &'static str {
        match self {
            Self::WHITESPACE => "WHITE_SPACE",
            Self::NEWLINE => "NEWLINE",
            Self::END_OF_LINE_COMMENT => "--",
            Self::COMMENT => "COMMENT",
            Self::STRING => "string",
            Self::NUMBER => "number",
            Self::ID => "id",
            Self::CON_ID => "conid",
            Self::COLON => ":",
            Self::COMMA => ",",
            Self::DOT => ".",
            Self::L_PAREN => "(",
            Self::R_PAREN => ")",
            Self::EQ => "=",
            Self::PIPE => "|",
            Self::OPERATOR => "operator",
            Self::MODULE_KW => "module",
            Self::WHERE_KW => "where",
            Self::IMPORT_KW => "import",
            Self::QUALIFIED_KW => "qualified",
            Self::AS_KW => "as",
            Self::HIDING_KW => "hiding",
            Self::DATA_KW => "data",
            Self::NEWTYPE_KW => "newtype",
            Self::DERIVING_KW => "deriving",
            Self::ERROR => "ERROR",
            Self::__LAST => "__LAST",
            composite => super::kinds::registry()
                .get(composite)
                .map(|k| k.debug_name())
                .unwrap_or("COMPOSITE"),
        }
    }
}

/// A set of syntax kinds, const-constructible for static token classes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Comment tokens.
    pub const COMMENTS: TokenSet =
        TokenSet::new().with(SyntaxKind::END_OF_LINE_COMMENT).with(SyntaxKind::COMMENT);

    /// Whitespace tokens, line breaks included.
    pub const WHITESPACES: TokenSet =
        TokenSet::new().with(SyntaxKind::WHITESPACE).with(SyntaxKind::NEWLINE);

    /// Everything the grammars may skip between significant tokens.
    pub const TRIVIA: TokenSet = Self::COMMENTS.union(Self::WHITESPACES);

    /// Create an empty token set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: SyntaxKind) -> Self {
        Self(self.0 | (1u64 << kind as u16))
    }

    /// Union of two token sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check if this set contains a kind.
    #[inline]
    pub const fn contains(self, kind: SyntaxKind) -> bool {
        self.0 & (1u64 << kind as u16) != 0
    }

    /// Build a set from a slice of kinds.
    pub fn from_kinds(kinds: &[SyntaxKind]) -> Self {
        kinds.iter().fold(Self::new(), |set, &kind| set.with(kind))
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut set = f.debug_set();
        for raw in 0..SyntaxKind::__LAST as u16 {
            let kind = SyntaxKind::from(rowan::SyntaxKind(raw));
            if self.contains(kind) {
                set.entry(&kind);
            }
        }
        set.finish()
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Rowan language tag for both grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HaskellLanguage {}

impl rowan::Language for HaskellLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Tree types specialised to [`HaskellLanguage`].
pub type SyntaxNode = rowan::SyntaxNode<HaskellLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<HaskellLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<HaskellLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<HaskellLanguage>;
