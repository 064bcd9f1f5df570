use nom::{error::VerboseError, IResult};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};
use thiserror::Error;

use super::mode::Mode;

/// Lexical categories emitted by the tokenizer.
///
/// The `Display` names are kebab-case (`plain-text`, `escaped-char`, ...) so a
/// host renderer can use them directly as style classes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum TokenKind {
    /// Literal message text, including the single-character fallback.
    PlainText,
    /// A run of whitespace inside a placeholder.
    WhitespaceText,
    /// `\uXXXX` or a backslash-escaped literal.
    EscapedChar,
    /// The `%{` and `}` placeholder markers.
    PlaceholderDelimiter,
    /// The parameter name directly after `%{`.
    ParameterName,
    /// `,` and `:` punctuation between configuration parts.
    ConfigSeparator,
    /// The format name of a placeholder.
    NamespaceName,
    /// A configuration entry key.
    ConfigKeyName,
    /// A comparison operator (`<>`, `<=`, `<`, `>=`, `>`, `!`, `=`).
    Operator,
    /// A signed integer literal.
    NumberLiteral,
    /// `true`, `false`, `null` or `empty`.
    ConstantKeyword,
    /// A bare word in configuration value position.
    StringLiteralValue,
    /// A `'` delimiter.
    SingleQuote,
    /// A `"` delimiter.
    DoubleQuote,
}

/// One token of a scan: category, exact source text and byte offsets.
///
/// Tokens of a single scan partition the input: `[start, end)` ranges are
/// contiguous and concatenating `text` in order reproduces the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    #[error(
        "unterminated construct: input ended in mode {mode} with {residual_depth} open frame(s)"
    )]
    UnterminatedConstruct { mode: Mode, residual_depth: usize },
}
