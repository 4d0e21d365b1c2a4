//! Haskell source grammar
//!
//! Only the parts of a module that name other modules or introduce data
//! constructors get structure:
//!
//! ```text
//! HaskellFile   = ModuleHeader? TopDecl*
//! ModuleHeader  = 'module' ModuleName ExportList? 'where'
//! ImportDecl    = 'import' 'safe'? 'qualified'? STRING? ModuleName 'qualified'?
//!                 ('as' ModuleName)? 'hiding'? ImportList?
//! DataDecl      = ('data' | 'newtype') ... ('=' Constructors | 'where' GadtBody)? Deriving*
//! ModuleName    = CON_ID ('.' CON_ID)*
//! ```
//!
//! Any other top-level declaration is consumed token by token up to the next
//! token in column 0 and left unstructured.

use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// Parse a whole Haskell module
pub(crate) fn parse_file(p: &mut Parser) {
    p.start_node(SyntaxKind::HASKELL_FILE);

    p.skip_trivia();
    if p.at(SyntaxKind::MODULE_KW) {
        parse_module_header(p);
    }

    loop {
        p.skip_trivia();
        if p.at_eof() {
            break;
        }
        let before = p.pos();
        match p.current_kind() {
            SyntaxKind::IMPORT_KW => parse_import(p),
            SyntaxKind::DATA_KW | SyntaxKind::NEWTYPE_KW => parse_data(p),
            _ => bump_declaration(p),
        }
        if p.pos() == before {
            p.bump();
        }
    }

    p.finish_node();
}

// =============================================================================
// Layout helpers
// =============================================================================

fn next_significant(p: &Parser, mut idx: usize) -> usize {
    while idx < p.token_count() && p.kind_at(idx).is_trivia() {
        idx += 1;
    }
    idx
}

fn starts_line(p: &Parser, idx: usize) -> bool {
    idx == 0 || p.kind_at(idx - 1) == SyntaxKind::NEWLINE
}

/// Move to the next significant token if it still belongs to the current
/// declaration, i.e. it is not in column 0.
fn continue_decl(p: &mut Parser) -> bool {
    let idx = next_significant(p, p.pos());
    if idx >= p.token_count() || starts_line(p, idx) {
        return false;
    }
    while p.pos() < idx {
        p.bump();
    }
    true
}

/// Whether only whitespace and comments separate the current token from the
/// start of its line.
fn first_on_line(p: &Parser) -> bool {
    let mut idx = p.pos();
    while idx > 0 {
        match p.kind_at(idx - 1) {
            SyntaxKind::NEWLINE => return true,
            kind if kind.is_trivia() => idx -= 1,
            _ => return false,
        }
    }
    true
}

fn nesting_delta(text: &str) -> i32 {
    match text {
        "(" | "[" | "{" => 1,
        ")" | "]" | "}" => -1,
        _ => 0,
    }
}

/// Consume a parenthesized group, nested brackets included.
fn bump_balanced(p: &mut Parser) {
    let mut depth = 0;
    while !p.at_eof() {
        depth += nesting_delta(p.current_text());
        p.bump();
        if depth <= 0 {
            break;
        }
    }
}

fn bump_declaration(p: &mut Parser) {
    p.bump();
    while continue_decl(p) {
        p.bump();
    }
}

fn bump_rest_of_decl(p: &mut Parser) {
    if continue_decl(p) {
        p.start_node(SyntaxKind::ERROR);
        p.error("unexpected tokens in declaration");
        p.bump();
        while continue_decl(p) {
            p.bump();
        }
        p.finish_node();
    }
}

// =============================================================================
// Module header and imports
// =============================================================================

/// `module Data.Tree (Tree(..), flatten) where`
fn parse_module_header(p: &mut Parser) {
    p.start_node(SyntaxKind::MODULE_HEADER);
    p.bump();

    // The header always ends at `where`, so export lists may start in column 0.
    p.skip_trivia();
    if p.at(SyntaxKind::CON_ID) {
        parse_module_name(p);
    } else {
        p.error("expected module name");
    }

    p.skip_trivia();
    if p.at(SyntaxKind::L_PAREN) {
        bump_balanced(p);
        p.skip_trivia();
    }
    p.expect(SyntaxKind::WHERE_KW);

    p.finish_node();
}

/// `Data.Map.Strict`
fn parse_module_name(p: &mut Parser) {
    p.start_node(SyntaxKind::MODULE_NAME);
    p.bump();
    while p.at(SyntaxKind::DOT) && p.kind_at(p.pos() + 1) == SyntaxKind::CON_ID {
        p.bump();
        p.bump();
    }
    p.finish_node();
}

/// `import qualified "containers" Data.Map as M hiding (lookup)`
fn parse_import(p: &mut Parser) {
    p.start_node(SyntaxKind::IMPORT_DECL);
    p.bump();

    if continue_decl(p) && p.at(SyntaxKind::ID) && p.current_text() == "safe" {
        p.bump();
    }
    if continue_decl(p) && p.at(SyntaxKind::QUALIFIED_KW) {
        p.bump();
    }
    if continue_decl(p) && p.at(SyntaxKind::STRING) {
        p.bump();
    }

    if continue_decl(p) && p.at(SyntaxKind::CON_ID) {
        parse_module_name(p);
    } else {
        p.error("expected module name");
    }

    if continue_decl(p) && p.at(SyntaxKind::QUALIFIED_KW) {
        p.bump();
    }
    if continue_decl(p) && p.at(SyntaxKind::AS_KW) {
        p.bump();
        if continue_decl(p) && p.at(SyntaxKind::CON_ID) {
            parse_module_name(p);
        } else {
            p.error("expected module alias");
        }
    }
    if continue_decl(p) && p.at(SyntaxKind::HIDING_KW) {
        p.bump();
    }
    if continue_decl(p) && p.at(SyntaxKind::L_PAREN) {
        bump_balanced(p);
    }

    bump_rest_of_decl(p);
    p.finish_node();
}

// =============================================================================
// Data declarations
// =============================================================================

/// `data Shape = Circle Double | Rect { w, h :: Double } deriving Show`
fn parse_data(p: &mut Parser) {
    p.start_node(SyntaxKind::DATA_DECL);
    p.bump();

    while continue_decl(p) {
        match p.current_kind() {
            SyntaxKind::EQ => {
                p.bump();
                parse_constructors(p);
                break;
            }
            SyntaxKind::WHERE_KW => {
                p.bump();
                parse_gadt_constructors(p);
                break;
            }
            SyntaxKind::DERIVING_KW => break,
            _ => p.bump(),
        }
    }

    // deriving clauses
    while continue_decl(p) {
        p.bump();
    }

    p.finish_node();
}

fn constructor_name(p: &mut Parser) {
    p.start_node(SyntaxKind::CONSTRUCTOR_NAME);
    p.bump();
    p.finish_node();
}

/// Alternatives after `=`, separated by top-level `|`.
fn parse_constructors(p: &mut Parser) {
    let mut depth = 0;
    let mut expect_constructor = true;

    while continue_decl(p) {
        let kind = p.current_kind();
        if depth == 0 {
            match kind {
                SyntaxKind::DERIVING_KW => return,
                SyntaxKind::PIPE => {
                    p.bump();
                    expect_constructor = true;
                    continue;
                }
                _ if expect_constructor => {
                    if kind == SyntaxKind::ID && p.current_text() == "forall" {
                        skip_forall(p);
                        continue;
                    }
                    if has_context_ahead(p) {
                        skip_context(p);
                        continue;
                    }
                    expect_constructor = false;
                    if kind == SyntaxKind::CON_ID {
                        constructor_name(p);
                        continue;
                    }
                }
                _ => {}
            }
        }
        depth += nesting_delta(p.current_text());
        p.bump();
    }
}

/// `forall a b.`
fn skip_forall(p: &mut Parser) {
    p.bump();
    while continue_decl(p) {
        let done = matches!(p.current_kind(), SyntaxKind::DOT)
            || (p.at(SyntaxKind::OPERATOR) && p.current_text() == ".");
        p.bump();
        if done {
            break;
        }
    }
}

/// Whether a `=>` follows in the current alternative.
fn has_context_ahead(p: &Parser) -> bool {
    let mut depth = 0;
    let mut idx = p.pos();
    while idx < p.token_count() {
        let kind = p.kind_at(idx);
        if !kind.is_trivia() && idx > p.pos() && starts_line(p, idx) {
            return false;
        }
        let text = p.text_at(idx);
        if depth == 0 {
            if matches!(kind, SyntaxKind::PIPE | SyntaxKind::DERIVING_KW) {
                return false;
            }
            if kind == SyntaxKind::OPERATOR && text == "=>" {
                return true;
            }
        }
        depth += nesting_delta(text);
        idx += 1;
    }
    false
}

/// Consume a constructor context up to and including `=>`.
fn skip_context(p: &mut Parser) {
    loop {
        let arrow = p.at(SyntaxKind::OPERATOR) && p.current_text() == "=>";
        p.bump();
        if arrow || !continue_decl(p) {
            break;
        }
    }
}

/// GADT body: every line starts with `Con1, Con2 :: Type`.
fn parse_gadt_constructors(p: &mut Parser) {
    let mut in_names = false;

    while continue_decl(p) {
        if first_on_line(p) {
            if p.at(SyntaxKind::DERIVING_KW) {
                return;
            }
            in_names = gadt_signature_ahead(p);
        }
        match p.current_kind() {
            SyntaxKind::CON_ID if in_names => constructor_name(p),
            SyntaxKind::COMMA if in_names => p.bump(),
            _ => {
                in_names = false;
                p.bump();
            }
        }
    }
}

/// Whether the tokens ahead read `Con (, Con)* ::`.
fn gadt_signature_ahead(p: &Parser) -> bool {
    let mut idx = p.pos();
    let mut expect_name = true;
    loop {
        idx = next_significant(p, idx);
        if idx >= p.token_count() {
            return false;
        }
        match (p.kind_at(idx), expect_name) {
            (SyntaxKind::CON_ID, true) => expect_name = false,
            (SyntaxKind::COMMA, false) => expect_name = true,
            (SyntaxKind::OPERATOR, false) => return p.text_at(idx) == "::",
            _ => return false,
        }
        idx += 1;
    }
}
