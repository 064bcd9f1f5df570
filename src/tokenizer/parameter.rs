//! # Placeholder Rules
//!
//! Modes covering the inside of a `%{...}` placeholder.
//!
//! ## Placeholder Shape
//!
//! ```text
//! %{ name }
//! %{ name, format }
//! %{ name, format, key: value, key: value }
//! ```
//!
//! After the opening `%{` the parameter mode expects a dashed identifier and
//! hands over to the format mode, which optionally consumes `, format` and
//! then behaves like the config-key mode. Configuration entries are comma-led;
//! five entry shapes are recognized, in declared precedence:
//!
//! 1. constant shorthand — `, !empty:` (optional operator, constant keyword)
//! 2. label — `, one:`
//! 3. number — `, <= -3:` (optional operator, signed integer)
//! 4. quoted value — `, = 'text'` (opens a plain quoted string)
//! 5. sub-message value — `, :'text'` (opens a quoted sub-message in which
//!    placeholders nest)
//!
//! Constant and number literals are structurally distinguishable from labels,
//! so this precedence is never ambiguous for well-formed input.
//!
//! ## Stack Discipline
//!
//! `%{` pushes a single frame; the modes inside the placeholder replace that
//! frame rather than pushing, so the closing `}` pops exactly once and returns
//! to whatever mode the placeholder started in.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::multispace0,
    combinator::{map, opt},
    sequence::tuple,
};

use super::fragment::{constant_keyword, dashed_name, number, operator, whitespace_step};
use super::mode::{Mode, StackEffect, Step};
use super::token::{ParserResult, TokenKind};

/// `%{` opens a placeholder. Shared by the root and sub-message modes.
pub(crate) fn placeholder_start_step(input: &str) -> ParserResult<Step<'_>> {
    map(tag("%{"), |s| {
        Step::new(StackEffect::Push(Mode::Parameter)).piece(TokenKind::PlaceholderDelimiter, s)
    })(input)
}

/// `}` closes the placeholder and returns to the enclosing mode.
fn parameter_end_step(input: &str) -> ParserResult<Step<'_>> {
    map(tag("}"), |s| {
        Step::new(StackEffect::Pop).piece(TokenKind::PlaceholderDelimiter, s)
    })(input)
}

/// Directly after `%{`: whitespace, then the parameter name.
#[tracing::instrument(level = "debug", skip(input))]
pub(crate) fn parameter_step(input: &str) -> ParserResult<Step<'_>> {
    alt((
        whitespace_step,
        map(dashed_name, |name| {
            Step::new(StackEffect::Replace(Mode::ParameterFormat))
                .piece(TokenKind::ParameterName, name)
        }),
    ))(input)
}

/// `, format` after the parameter name.
fn format_name_entry(input: &str) -> ParserResult<Step<'_>> {
    map(
        tuple((tag(","), multispace0, dashed_name)),
        |(comma, ws, name)| {
            Step::new(StackEffect::Replace(Mode::ParameterConfigKey))
                .piece(TokenKind::ConfigSeparator, comma)
                .piece(TokenKind::WhitespaceText, ws)
                .piece(TokenKind::NamespaceName, name)
        },
    )(input)
}

/// `, [op]const :` — constant shorthand key, e.g. `, !empty:`. No whitespace
/// is allowed between the operator and the keyword.
fn entry_constant(input: &str) -> ParserResult<Step<'_>> {
    map(
        tuple((
            tag(","),
            multispace0,
            opt(operator),
            constant_keyword,
            multispace0,
            tag(":"),
        )),
        |(comma, ws1, op, keyword, ws2, colon)| {
            Step::new(StackEffect::Replace(Mode::ParameterConfigValue))
                .piece(TokenKind::ConfigSeparator, comma)
                .piece(TokenKind::WhitespaceText, ws1)
                .piece_opt(TokenKind::Operator, op)
                .piece(TokenKind::ConstantKeyword, keyword)
                .piece(TokenKind::WhitespaceText, ws2)
                .piece(TokenKind::ConfigSeparator, colon)
        },
    )(input)
}

/// `, label :`
fn entry_label(input: &str) -> ParserResult<Step<'_>> {
    map(
        tuple((tag(","), multispace0, dashed_name, multispace0, tag(":"))),
        |(comma, ws1, label, ws2, colon)| {
            Step::new(StackEffect::Replace(Mode::ParameterConfigValue))
                .piece(TokenKind::ConfigSeparator, comma)
                .piece(TokenKind::WhitespaceText, ws1)
                .piece(TokenKind::ConfigKeyName, label)
                .piece(TokenKind::WhitespaceText, ws2)
                .piece(TokenKind::ConfigSeparator, colon)
        },
    )(input)
}

/// `, [op] number :`
fn entry_number(input: &str) -> ParserResult<Step<'_>> {
    map(
        tuple((
            tag(","),
            multispace0,
            opt(operator),
            multispace0,
            number,
            multispace0,
            tag(":"),
        )),
        |(comma, ws1, op, ws2, num, ws3, colon)| {
            Step::new(StackEffect::Replace(Mode::ParameterConfigValue))
                .piece(TokenKind::ConfigSeparator, comma)
                .piece(TokenKind::WhitespaceText, ws1)
                .piece_opt(TokenKind::Operator, op)
                .piece(TokenKind::WhitespaceText, ws2)
                .piece(TokenKind::NumberLiteral, num)
                .piece(TokenKind::WhitespaceText, ws3)
                .piece(TokenKind::ConfigSeparator, colon)
        },
    )(input)
}

/// `, [op] '` — a key that is itself a quoted string. The quote opens the
/// plain quoted-string mode; the frame underneath becomes the value mode so
/// the closing quote resumes value parsing.
fn entry_quoted_single(input: &str) -> ParserResult<Step<'_>> {
    map(
        tuple((tag(","), multispace0, opt(operator), multispace0, tag("'"))),
        |(comma, ws1, op, ws2, quote)| {
            Step::new(StackEffect::ReplacePush(
                Mode::ParameterConfigValue,
                Mode::SingleQuotedString,
            ))
            .piece(TokenKind::ConfigSeparator, comma)
            .piece(TokenKind::WhitespaceText, ws1)
            .piece_opt(TokenKind::Operator, op)
            .piece(TokenKind::WhitespaceText, ws2)
            .piece(TokenKind::SingleQuote, quote)
        },
    )(input)
}

/// Double-quoted twin of [`entry_quoted_single`].
fn entry_quoted_double(input: &str) -> ParserResult<Step<'_>> {
    map(
        tuple((tag(","), multispace0, opt(operator), multispace0, tag("\""))),
        |(comma, ws1, op, ws2, quote)| {
            Step::new(StackEffect::ReplacePush(
                Mode::ParameterConfigValue,
                Mode::DoubleQuotedString,
            ))
            .piece(TokenKind::ConfigSeparator, comma)
            .piece(TokenKind::WhitespaceText, ws1)
            .piece_opt(TokenKind::Operator, op)
            .piece(TokenKind::WhitespaceText, ws2)
            .piece(TokenKind::DoubleQuote, quote)
        },
    )(input)
}

/// `, : '` — a bare colon followed by a quote opens a sub-message value, in
/// which placeholders nest. Closing it resumes config-key parsing.
fn entry_submessage_single(input: &str) -> ParserResult<Step<'_>> {
    map(
        tuple((tag(","), multispace0, tag(":"), multispace0, tag("'"))),
        |(comma, ws1, colon, ws2, quote)| {
            Step::new(StackEffect::ReplacePush(
                Mode::ParameterConfigKey,
                Mode::SingleQuotedMessage,
            ))
            .piece(TokenKind::ConfigSeparator, comma)
            .piece(TokenKind::WhitespaceText, ws1)
            .piece(TokenKind::ConfigSeparator, colon)
            .piece(TokenKind::WhitespaceText, ws2)
            .piece(TokenKind::SingleQuote, quote)
        },
    )(input)
}

/// Double-quoted twin of [`entry_submessage_single`].
fn entry_submessage_double(input: &str) -> ParserResult<Step<'_>> {
    map(
        tuple((tag(","), multispace0, tag(":"), multispace0, tag("\""))),
        |(comma, ws1, colon, ws2, quote)| {
            Step::new(StackEffect::ReplacePush(
                Mode::ParameterConfigKey,
                Mode::DoubleQuotedMessage,
            ))
            .piece(TokenKind::ConfigSeparator, comma)
            .piece(TokenKind::WhitespaceText, ws1)
            .piece(TokenKind::ConfigSeparator, colon)
            .piece(TokenKind::WhitespaceText, ws2)
            .piece(TokenKind::DoubleQuote, quote)
        },
    )(input)
}

/// The five configuration entry shapes, in declared precedence.
fn config_entry_step(input: &str) -> ParserResult<Step<'_>> {
    alt((
        entry_constant,
        entry_label,
        entry_number,
        entry_quoted_single,
        entry_quoted_double,
        entry_submessage_single,
        entry_submessage_double,
    ))(input)
}

/// After the parameter name: an optional `, format`, otherwise any rule of
/// the config-key mode. A parameter may carry a format with zero entries.
#[tracing::instrument(level = "debug", skip(input))]
pub(crate) fn parameter_format_step(input: &str) -> ParserResult<Step<'_>> {
    alt((
        whitespace_step,
        format_name_entry,
        parameter_end_step,
        config_entry_step,
    ))(input)
}

/// Between configuration entries: the closing `}` or the next comma-led entry.
#[tracing::instrument(level = "debug", skip(input))]
pub(crate) fn parameter_config_key_step(input: &str) -> ParserResult<Step<'_>> {
    alt((whitespace_step, parameter_end_step, config_entry_step))(input)
}

/// Directly after `key:`: exactly one value, then back to config-key parsing.
#[tracing::instrument(level = "debug", skip(input))]
pub(crate) fn parameter_config_value_step(input: &str) -> ParserResult<Step<'_>> {
    alt((
        whitespace_step,
        parameter_end_step,
        map(alt((tag("true"), tag("false"))), |keyword| {
            Step::new(StackEffect::Replace(Mode::ParameterConfigKey))
                .piece(TokenKind::ConstantKeyword, keyword)
        }),
        map(number, |num| {
            Step::new(StackEffect::Replace(Mode::ParameterConfigKey))
                .piece(TokenKind::NumberLiteral, num)
        }),
        map(dashed_name, |word| {
            Step::new(StackEffect::Replace(Mode::ParameterConfigKey))
                .piece(TokenKind::StringLiteralValue, word)
        }),
        map(tag("'"), |q| {
            Step::new(StackEffect::ReplacePush(
                Mode::ParameterConfigKey,
                Mode::SingleQuotedMessage,
            ))
            .piece(TokenKind::SingleQuote, q)
        }),
        map(tag("\""), |q| {
            Step::new(StackEffect::ReplacePush(
                Mode::ParameterConfigKey,
                Mode::DoubleQuotedMessage,
            ))
            .piece(TokenKind::DoubleQuote, q)
        }),
    ))(input)
}
