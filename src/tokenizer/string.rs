//! # String Rules
//!
//! The shared text/escape rule group and the two quoted-string modes.
//!
//! ## Shared Rule Group
//!
//! Every text-carrying mode (root, quoted strings, quoted sub-messages)
//! includes [`string_step`]: unicode escapes, backslash-escaped literals, and
//! runs of unremarkable characters. The run stops at `'`, `"`, `\` and `%` so
//! the including mode gets a chance to interpret those characters itself.
//! Escapes are tried before the run, so an escape is never swallowed into
//! plain text.
//!
//! ## Quoted Strings
//!
//! [`Mode::SingleQuotedString`] and [`Mode::DoubleQuotedString`] are entered
//! from a configuration entry that opens a plain quoted value.
//!
//! [`Mode::SingleQuotedString`]: super::mode::Mode::SingleQuotedString
//! [`Mode::DoubleQuotedString`]: super::mode::Mode::DoubleQuotedString Only the
//! matching quote character closes the frame; the other quote character and a
//! stray `%` are literal text. Placeholders do not nest inside these modes —
//! that is what distinguishes them from the sub-message modes in
//! [`message`](super::message).

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1, take_while_m_n},
    character::complete::{char, one_of},
    combinator::{map, recognize},
    error::context,
    sequence::pair,
};

use super::mode::{StackEffect, Step};
use super::token::{ParserResult, TokenKind};

/// `\uXXXX` with exactly four hex digits.
fn unicode_escape(input: &str) -> ParserResult<&str> {
    context(
        "unicode escape",
        recognize(pair(
            tag("\\u"),
            take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit()),
        )),
    )(input)
}

/// `\` followed by one of `"`, `'`, `%`, `{` or `\`.
fn literal_escape(input: &str) -> ParserResult<&str> {
    context(
        "escaped literal",
        recognize(pair(char('\\'), one_of("\"'%{\\"))),
    )(input)
}

/// Longest run of characters no string-carrying mode treats specially.
fn text_run(input: &str) -> ParserResult<&str> {
    take_while1(|c: char| !matches!(c, '\'' | '"' | '\\' | '%'))(input)
}

/// Shared text rule group; composed into every text-carrying mode.
pub(crate) fn string_step(input: &str) -> ParserResult<Step<'_>> {
    alt((
        map(unicode_escape, |s| {
            Step::new(StackEffect::Stay).piece(TokenKind::EscapedChar, s)
        }),
        map(literal_escape, |s| {
            Step::new(StackEffect::Stay).piece(TokenKind::EscapedChar, s)
        }),
        map(text_run, |s| {
            Step::new(StackEffect::Stay).piece(TokenKind::PlainText, s)
        }),
        // a backslash that escapes nothing is literal text
        map(tag("\\"), |s| {
            Step::new(StackEffect::Stay).piece(TokenKind::PlainText, s)
        }),
    ))(input)
}

/// `'...'` configuration value.
#[tracing::instrument(level = "debug", skip(input))]
pub(crate) fn single_quoted_string_step(input: &str) -> ParserResult<Step<'_>> {
    alt((
        string_step,
        map(tag("'"), |s| {
            Step::new(StackEffect::Pop).piece(TokenKind::SingleQuote, s)
        }),
        map(recognize(one_of("\"%")), |s| {
            Step::new(StackEffect::Stay).piece(TokenKind::PlainText, s)
        }),
    ))(input)
}

/// `"..."` configuration value.
#[tracing::instrument(level = "debug", skip(input))]
pub(crate) fn double_quoted_string_step(input: &str) -> ParserResult<Step<'_>> {
    alt((
        string_step,
        map(tag("\""), |s| {
            Step::new(StackEffect::Pop).piece(TokenKind::DoubleQuote, s)
        }),
        map(recognize(one_of("'%")), |s| {
            Step::new(StackEffect::Stay).piece(TokenKind::PlainText, s)
        }),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_escape_covers_six_chars() {
        let (rest, step) = string_step("\\u0041 rest").unwrap();
        assert_eq!(step.pieces, vec![(TokenKind::EscapedChar, "\\u0041")]);
        assert_eq!(rest, " rest");
    }

    #[test]
    fn test_unicode_escape_needs_four_hex_digits() {
        // three hex digits: falls through to the escaped-literal / lone
        // backslash rules, never a unicode escape
        let (_, step) = string_step("\\u00g").unwrap();
        assert_eq!(step.pieces[0].0, TokenKind::PlainText);
        assert_eq!(step.pieces[0].1, "\\");
    }

    #[test]
    fn test_literal_escapes() {
        for input in ["\\'", "\\\"", "\\%", "\\{", "\\\\"] {
            let (rest, step) = string_step(input).unwrap();
            assert_eq!(step.pieces, vec![(TokenKind::EscapedChar, input)]);
            assert_eq!(rest, "");
        }
    }

    #[test]
    fn test_text_run_stops_at_specials() {
        let (rest, step) = string_step("hello world%{n}").unwrap();
        assert_eq!(step.pieces, vec![(TokenKind::PlainText, "hello world")]);
        assert_eq!(rest, "%{n}");
    }

    #[test]
    fn test_matching_quote_pops() {
        let (rest, step) = single_quoted_string_step("' rest").unwrap();
        assert_eq!(step.effect, StackEffect::Pop);
        assert_eq!(step.pieces, vec![(TokenKind::SingleQuote, "'")]);
        assert_eq!(rest, " rest");
    }

    #[test]
    fn test_other_quote_is_literal() {
        let (_, step) = single_quoted_string_step("\"abc").unwrap();
        assert_eq!(step.effect, StackEffect::Stay);
        assert_eq!(step.pieces, vec![(TokenKind::PlainText, "\"")]);

        let (_, step) = double_quoted_string_step("'abc").unwrap();
        assert_eq!(step.effect, StackEffect::Stay);
        assert_eq!(step.pieces, vec![(TokenKind::PlainText, "'")]);
    }
}
