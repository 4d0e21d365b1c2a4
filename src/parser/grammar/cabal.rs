//! Cabal package-description grammar
//!
//! A package description is a sequence of fields (`key: value`) and sections
//! (`executable foo`, `if flag(dev)`, ...). Structure comes from indentation:
//! a field value continues on every following line indented deeper than its
//! key, and a section owns every following line indented deeper than its
//! header. Blank and comment-only lines never end a field or a section.
//!
//! ```text
//! CabalFile     = Item*
//! Item          = Property | Section
//! Property      = PropertyKey ':' PropertyValue
//! Section       = SectionType Name? NEWLINE Item*
//! ```

use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// Parse a whole package description
pub(crate) fn parse_file(p: &mut Parser) {
    p.start_node(SyntaxKind::CABAL_FILE);
    parse_block(p, None);
    p.finish_node();
}

/// Parse items until a content line indented at or left of `parent_indent`.
///
/// The top-level block (`None`) runs to the end of input and also absorbs
/// trailing blank lines.
fn parse_block(p: &mut Parser, parent_indent: Option<usize>) {
    loop {
        let Some((start, indent)) = next_content_line(p, p.pos()) else {
            if parent_indent.is_none() {
                while !p.at_eof() {
                    p.bump();
                }
            }
            return;
        };
        if parent_indent.is_some_and(|parent| indent <= parent) {
            return;
        }

        let before = p.pos();
        while p.pos() < start {
            p.bump();
        }
        parse_item(p, indent);
        p.eat(SyntaxKind::NEWLINE);

        if p.pos() == before {
            p.bump();
        }
    }
}

fn parse_item(p: &mut Parser, indent: usize) {
    if !p.at(SyntaxKind::ID) {
        p.error_line("expected field or section");
        return;
    }
    if p.nth_on_line(1) == SyntaxKind::COLON {
        parse_property(p, indent);
    } else {
        parse_section(p, indent);
    }
}

/// `build-depends: base >=4 && <5, containers`
fn parse_property(p: &mut Parser, indent: usize) {
    p.start_node(SyntaxKind::PROPERTY);

    p.start_node(SyntaxKind::PROPERTY_KEY);
    p.bump();
    p.finish_node();

    p.skip_ws();
    p.expect(SyntaxKind::COLON);
    p.skip_ws();

    p.start_node(SyntaxKind::PROPERTY_VALUE);
    p.bump_rest_of_line();
    while let Some(start) = continuation_start(p, indent) {
        while p.pos() < start {
            p.bump();
        }
        p.bump_rest_of_line();
    }
    p.finish_node();

    p.finish_node();
}

/// `executable hscabal`, `library`, `if os(windows)`
fn parse_section(p: &mut Parser, indent: usize) {
    let kind = match p.current_text().to_ascii_lowercase().as_str() {
        "executable" => SyntaxKind::EXECUTABLE,
        "test-suite" => SyntaxKind::TEST_SUITE,
        _ => SyntaxKind::SECTION,
    };
    p.start_node(kind);

    p.start_node(SyntaxKind::SECTION_TYPE);
    p.bump();
    p.finish_node();

    p.skip_ws();
    if !p.at_eof() && !p.at(SyntaxKind::NEWLINE) {
        p.start_node(SyntaxKind::NAME);
        p.bump_rest_of_line();
        p.finish_node();
    }
    p.eat(SyntaxKind::NEWLINE);

    parse_block(p, Some(indent));
    p.finish_node();
}

/// Index of the first token on the next line continuing a field whose key
/// sits at `indent`, if the parser is at the end of a line that has one.
fn continuation_start(p: &Parser, indent: usize) -> Option<usize> {
    if !p.at(SyntaxKind::NEWLINE) {
        return None;
    }
    let (start, line_indent) = next_content_line(p, p.pos() + 1)?;
    (line_indent > indent).then_some(start)
}

/// Find the next line with content, starting at line-start index `idx`.
///
/// Returns the index of its first non-whitespace token and its indentation
/// width. Blank and comment-only lines are skipped.
fn next_content_line(p: &Parser, mut idx: usize) -> Option<(usize, usize)> {
    let count = p.token_count();
    loop {
        let mut indent = 0;
        if idx < count && p.kind_at(idx) == SyntaxKind::WHITESPACE {
            indent = p.text_at(idx).len();
            idx += 1;
        }
        if idx >= count {
            return None;
        }
        match p.kind_at(idx) {
            SyntaxKind::NEWLINE => idx += 1,
            SyntaxKind::END_OF_LINE_COMMENT | SyntaxKind::COMMENT => {
                while idx < count && p.kind_at(idx) != SyntaxKind::NEWLINE {
                    idx += 1;
                }
                idx += 1;
            }
            _ => return Some((idx, indent)),
        }
    }
}
