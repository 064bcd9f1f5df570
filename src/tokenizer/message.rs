//! Message-level modes: the root mode and the quoted sub-message modes.
//!
//! These are the modes in which placeholders may open. The root mode is the
//! permanent bottom frame; the sub-message modes are pushed when a
//! configuration value opens a quoted message, and behave like the plain
//! quoted-string modes except that `%{` starts a nested placeholder.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::one_of,
    combinator::{map, recognize},
};

use super::mode::{StackEffect, Step};
use super::parameter::placeholder_start_step;
use super::string::string_step;
use super::token::{ParserResult, TokenKind};

/// Top-level message text. Quote characters outside explicit quoting are
/// literal, as is a `%` that does not open a placeholder.
#[tracing::instrument(level = "debug", skip(input))]
pub(crate) fn root_step(input: &str) -> ParserResult<Step<'_>> {
    alt((
        string_step,
        placeholder_start_step,
        map(recognize(one_of("'\"%")), |s| {
            Step::new(StackEffect::Stay).piece(TokenKind::PlainText, s)
        }),
    ))(input)
}

/// `'...'` sub-message value; placeholders nest, the other quote is literal.
#[tracing::instrument(level = "debug", skip(input))]
pub(crate) fn single_quoted_message_step(input: &str) -> ParserResult<Step<'_>> {
    alt((
        string_step,
        placeholder_start_step,
        map(tag("'"), |s| {
            Step::new(StackEffect::Pop).piece(TokenKind::SingleQuote, s)
        }),
        map(recognize(one_of("\"%")), |s| {
            Step::new(StackEffect::Stay).piece(TokenKind::PlainText, s)
        }),
    ))(input)
}

/// `"..."` sub-message value.
#[tracing::instrument(level = "debug", skip(input))]
pub(crate) fn double_quoted_message_step(input: &str) -> ParserResult<Step<'_>> {
    alt((
        string_step,
        placeholder_start_step,
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
    use crate::tokenizer::mode::Mode;

    #[test]
    fn test_root_plain_text() {
        let (rest, step) = root_step("hello %{n}").unwrap();
        assert_eq!(step.pieces, vec![(TokenKind::PlainText, "hello ")]);
        assert_eq!(rest, "%{n}");
    }

    #[test]
    fn test_root_placeholder_start() {
        let (_, step) = root_step("%{n}").unwrap();
        assert_eq!(step.effect, StackEffect::Push(Mode::Parameter));
    }

    #[test]
    fn test_root_stray_delimiters_are_literal() {
        for input in ["'", "\"", "% "] {
            let (_, step) = root_step(input).unwrap();
            assert_eq!(step.effect, StackEffect::Stay);
            assert_eq!(step.pieces[0].0, TokenKind::PlainText);
            assert_eq!(step.pieces[0].1.len(), 1);
        }
    }

    #[test]
    fn test_submessage_allows_nested_placeholder() {
        let (_, step) = single_quoted_message_step("%{n} items'").unwrap();
        assert_eq!(step.effect, StackEffect::Push(Mode::Parameter));
    }

    #[test]
    fn test_submessage_close_pops() {
        let (_, step) = single_quoted_message_step("' rest").unwrap();
        assert_eq!(step.effect, StackEffect::Pop);
        assert_eq!(step.pieces, vec![(TokenKind::SingleQuote, "'")]);
    }
}
