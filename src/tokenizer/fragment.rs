//! Shared lexical fragments used across several modes.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1, multispace1, satisfy},
    combinator::{map, opt, recognize},
    error::context,
    multi::many0_count,
    sequence::pair,
};

use super::mode::{StackEffect, Step};
use super::token::{ParserResult, TokenKind};

/// One identifier segment: a letter followed by letters, digits or underscores.
fn name_segment(input: &str) -> ParserResult<&str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

/// Dashed identifier: segments joined by single hyphens, e.g. `choice-format`.
pub(crate) fn dashed_name(input: &str) -> ParserResult<&str> {
    context(
        "dashed identifier",
        recognize(pair(name_segment, many0_count(pair(char('-'), name_segment)))),
    )(input)
}

/// Signed integer literal.
pub(crate) fn number(input: &str) -> ParserResult<&str> {
    context("number", recognize(pair(opt(char('-')), digit1)))(input)
}

/// Comparison operator. Two-character forms are tried before their
/// one-character prefixes so `<=` is never split into `<` and `=`.
pub(crate) fn operator(input: &str) -> ParserResult<&str> {
    context(
        "operator",
        alt((
            tag("<>"),
            tag("<="),
            tag("<"),
            tag(">="),
            tag(">"),
            tag("!"),
            tag("="),
        )),
    )(input)
}

/// Constant keyword accepted in configuration key position.
pub(crate) fn constant_keyword(input: &str) -> ParserResult<&str> {
    context(
        "constant keyword",
        alt((tag("true"), tag("false"), tag("null"), tag("empty"))),
    )(input)
}

/// Whitespace rule shared by the placeholder modes: one token, mode unchanged.
pub(crate) fn whitespace_step(input: &str) -> ParserResult<Step<'_>> {
    map(multispace1, |ws| {
        Step::new(StackEffect::Stay).piece(TokenKind::WhitespaceText, ws)
    })(input)
}
