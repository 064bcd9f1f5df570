//! The scan loop and the public tokenizer API.

use std::collections::VecDeque;

use serde::Serialize;

use super::message::{double_quoted_message_step, root_step, single_quoted_message_step};
use super::mode::{apply_effect, Mode, Step};
use super::parameter::{
    parameter_config_key_step, parameter_config_value_step, parameter_format_step, parameter_step,
};
use super::string::{double_quoted_string_step, single_quoted_string_step};
use super::token::{ParserResult, Token, TokenKind, TokenizerError};

/// Dispatches to the rule list of the active mode.
fn mode_step<'a>(mode: Mode, input: &'a str) -> ParserResult<'a, Step<'a>> {
    match mode {
        Mode::Root => root_step(input),
        Mode::SingleQuotedString => single_quoted_string_step(input),
        Mode::DoubleQuotedString => double_quoted_string_step(input),
        Mode::Parameter => parameter_step(input),
        Mode::ParameterFormat => parameter_format_step(input),
        Mode::ParameterConfigKey => parameter_config_key_step(input),
        Mode::ParameterConfigValue => parameter_config_value_step(input),
        Mode::SingleQuotedMessage => single_quoted_message_step(input),
        Mode::DoubleQuotedMessage => double_quoted_message_step(input),
    }
}

/// Message-template tokenizer.
///
/// `scan` is a pure function of its input: every call owns a private mode
/// stack and cursor, so a `Tokenizer` can be shared freely across threads and
/// repeated scans of the same input produce identical token sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Lazily scans `input`, yielding tokens on demand.
    ///
    /// Dropping the iterator cancels the scan; re-scanning requires a fresh
    /// call. After the iterator is exhausted, [`Scan::residual_depth`] tells
    /// whether every quote and placeholder was closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use msgfmt_lexer::{TokenKind, Tokenizer};
    ///
    /// let tokens: Vec<_> = Tokenizer::new().scan("%{count}").collect();
    /// assert_eq!(tokens[0].kind, TokenKind::PlaceholderDelimiter);
    /// assert_eq!(tokens[1].text, "count");
    /// assert_eq!(tokens[2].text, "}");
    /// ```
    pub fn scan<'a>(&self, input: &'a str) -> Scan<'a> {
        Scan {
            input,
            cursor: 0,
            stack: vec![Mode::Root],
            pending: VecDeque::new(),
        }
    }

    /// Eagerly tokenizes `input`.
    #[tracing::instrument(level = "debug", skip(self, input))]
    pub fn tokenize(&self, input: &str) -> Tokenization {
        let mut scan = self.scan(input);
        let tokens = scan.by_ref().collect();
        Tokenization {
            tokens,
            residual_depth: scan.residual_depth(),
        }
    }

    /// Like [`Self::tokenize`], but surfaces an unterminated quote or
    /// placeholder as an error for callers that need strict validation.
    pub fn tokenize_strict(&self, input: &str) -> Result<Vec<Token>, TokenizerError> {
        let mut scan = self.scan(input);
        let tokens: Vec<Token> = scan.by_ref().collect();
        let residual_depth = scan.residual_depth();
        if residual_depth > 1 {
            return Err(TokenizerError::UnterminatedConstruct {
                mode: scan.mode(),
                residual_depth,
            });
        }
        Ok(tokens)
    }
}

/// Result of an eager tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tokenization {
    pub tokens: Vec<Token>,
    /// Final mode-stack depth. Anything above 1 means the input ended inside
    /// an unclosed quote or placeholder.
    pub residual_depth: usize,
}

impl Tokenization {
    pub fn is_complete(&self) -> bool {
        self.residual_depth == 1
    }
}

/// Lazy token iterator over one input buffer.
pub struct Scan<'a> {
    input: &'a str,
    cursor: usize,
    stack: Vec<Mode>,
    pending: VecDeque<Token>,
}

impl Scan<'_> {
    /// Number of frames on the mode stack; 1 means every construct closed.
    pub fn residual_depth(&self) -> usize {
        self.stack.len()
    }

    /// The active mode (top of the stack).
    pub fn mode(&self) -> Mode {
        self.stack.last().copied().unwrap_or(Mode::Root)
    }

    /// True once the whole input is consumed with the stack back at its
    /// single-frame condition.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.input.len() && self.pending.is_empty() && self.stack.len() == 1
    }
}

impl Iterator for Scan<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }

            let rest = &self.input[self.cursor..];
            if rest.is_empty() {
                return None;
            }

            match mode_step(self.mode(), rest) {
                Ok((remaining, step)) => {
                    let consumed = rest.len() - remaining.len();
                    debug_assert!(consumed > 0, "mode rules must consume input");

                    let mut offset = self.cursor;
                    for (kind, text) in &step.pieces {
                        let end = offset + text.len();
                        self.pending.push_back(Token {
                            kind: *kind,
                            text: (*text).to_string(),
                            start: offset,
                            end,
                        });
                        offset = end;
                    }
                    debug_assert_eq!(
                        offset,
                        self.cursor + consumed,
                        "rule pieces must cover the whole match"
                    );

                    apply_effect(&mut self.stack, step.effect);
                    self.cursor += consumed;
                }
                Err(_) => {
                    // Error-tolerant fallback: no rule of the active mode
                    // matched, consume exactly one character as plain text.
                    tracing::trace!(
                        mode = %self.mode(),
                        offset = self.cursor,
                        "no rule matched, consuming one character as text"
                    );
                    let width = match rest.chars().next() {
                        Some(c) => c.len_utf8(),
                        None => return None,
                    };
                    let token = Token {
                        kind: TokenKind::PlainText,
                        text: rest[..width].to_string(),
                        start: self.cursor,
                        end: self.cursor + width,
                    };
                    self.cursor += width;
                    return Some(token);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<(TokenKind, String)> {
        Tokenizer::new()
            .scan(input)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_plain_text_only() {
        let tokens = kinds("this is a test");
        assert_eq!(
            tokens,
            vec![(TokenKind::PlainText, "this is a test".to_string())]
        );
    }

    #[test]
    fn test_simple_placeholder() {
        let tokens = kinds("%{count}");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::PlaceholderDelimiter, "%{".to_string()),
                (TokenKind::ParameterName, "count".to_string()),
                (TokenKind::PlaceholderDelimiter, "}".to_string()),
            ]
        );

        let mut scan = Tokenizer::new().scan("%{count}");
        scan.by_ref().for_each(drop);
        assert_eq!(scan.residual_depth(), 1);
        assert!(scan.is_complete());
    }

    #[test]
    fn test_placeholder_with_surrounding_text() {
        let tokens = kinds("you have %{count} items");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::PlainText, "you have ".to_string()),
                (TokenKind::PlaceholderDelimiter, "%{".to_string()),
                (TokenKind::ParameterName, "count".to_string()),
                (TokenKind::PlaceholderDelimiter, "}".to_string()),
                (TokenKind::PlainText, " items".to_string()),
            ]
        );
    }

    #[test]
    fn test_formatted_placeholder_with_config() {
        let tokens = kinds("%{count, plural, one: 'item', other: 'items'}");
        let expected = vec![
            (TokenKind::PlaceholderDelimiter, "%{"),
            (TokenKind::ParameterName, "count"),
            (TokenKind::ConfigSeparator, ","),
            (TokenKind::WhitespaceText, " "),
            (TokenKind::NamespaceName, "plural"),
            (TokenKind::ConfigSeparator, ","),
            (TokenKind::WhitespaceText, " "),
            (TokenKind::ConfigKeyName, "one"),
            (TokenKind::ConfigSeparator, ":"),
            (TokenKind::WhitespaceText, " "),
            (TokenKind::SingleQuote, "'"),
            (TokenKind::PlainText, "item"),
            (TokenKind::SingleQuote, "'"),
            (TokenKind::ConfigSeparator, ","),
            (TokenKind::WhitespaceText, " "),
            (TokenKind::ConfigKeyName, "other"),
            (TokenKind::ConfigSeparator, ":"),
            (TokenKind::WhitespaceText, " "),
            (TokenKind::SingleQuote, "'"),
            (TokenKind::PlainText, "items"),
            (TokenKind::SingleQuote, "'"),
            (TokenKind::PlaceholderDelimiter, "}"),
        ];
        let expected: Vec<(TokenKind, String)> = expected
            .into_iter()
            .map(|(k, t)| (k, t.to_string()))
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_nested_submessage_placeholder() {
        let tokens = kinds("%{n, plural, one:'%{n} item'}");
        let nested: Vec<_> = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::ParameterName)
            .collect();
        assert_eq!(nested.len(), 2);

        // the inner placeholder is delimited inside the quoted value
        let delimiters: Vec<_> = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::PlaceholderDelimiter)
            .collect();
        assert_eq!(delimiters.len(), 4);

        let mut scan = Tokenizer::new().scan("%{n, plural, one:'%{n} item'}");
        scan.by_ref().for_each(drop);
        assert!(scan.is_complete());
    }

    #[test]
    fn test_value_shorthand_entries() {
        let tokens = kinds("%{b, bool, true: 'yes', false: 'no'}");
        assert!(tokens
            .iter()
            .any(|(k, t)| *k == TokenKind::ConstantKeyword && t == "true"));
        assert!(tokens
            .iter()
            .any(|(k, t)| *k == TokenKind::ConstantKeyword && t == "false"));
        assert!(tokens
            .iter()
            .any(|(k, t)| *k == TokenKind::NamespaceName && t == "bool"));
    }

    #[test]
    fn test_operator_number_entry() {
        let tokens = kinds("%{n, choice, <0: 'negative', 0: 'zero', >0: 'positive'}");
        let operators: Vec<_> = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::Operator)
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(operators, vec!["<", ">"]);

        let numbers = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::NumberLiteral)
            .count();
        assert_eq!(numbers, 3);
    }

    #[test]
    fn test_unterminated_placeholder_is_reported_not_raised() {
        let mut scan = Tokenizer::new().scan("%{name, fmt, key:");
        scan.by_ref().for_each(drop);
        assert!(scan.residual_depth() > 1);
        assert!(!scan.is_complete());
    }

    #[test]
    fn test_tokenize_strict_rejects_unterminated() {
        let result = Tokenizer::new().tokenize_strict("%{name, fmt, key: 'oops");
        assert!(matches!(
            result,
            Err(TokenizerError::UnterminatedConstruct { .. })
        ));

        let tokens = Tokenizer::new().tokenize_strict("%{name}").unwrap();
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_escape_is_one_token() {
        let tokens = kinds("a\\u0041b");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::PlainText, "a".to_string()),
                (TokenKind::EscapedChar, "\\u0041".to_string()),
                (TokenKind::PlainText, "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_fallback_consumes_one_char() {
        // '{' without '%' matches no root rule piece-wise; the text run stops
        // at nothing here, so it is swallowed by the run. Use a parameter
        // position instead, where digits match no rule.
        let tokens = kinds("%{1}");
        assert_eq!(tokens[0], (TokenKind::PlaceholderDelimiter, "%{".to_string()));
        assert_eq!(tokens[1], (TokenKind::PlainText, "1".to_string()));
        // '}' is also unmatched inside the parameter mode
        assert_eq!(tokens[2], (TokenKind::PlainText, "}".to_string()));
    }

    #[test]
    fn test_round_trip_offsets() {
        let input = "a \\u0041 %{n, choice, <0: 'neg %{m}', >=0: \"pos\"} tail";
        let tokens: Vec<Token> = Tokenizer::new().scan(input).collect();

        let mut reconstructed = String::new();
        let mut cursor = 0;
        for token in &tokens {
            assert_eq!(token.start, cursor);
            assert_eq!(token.end - token.start, token.text.len());
            reconstructed.push_str(&token.text);
            cursor = token.end;
        }
        assert_eq!(reconstructed, input);
        assert_eq!(cursor, input.len());
    }

    #[test]
    fn test_idempotent_scans() {
        let input = "%{d, date, format: 'yyyy-MM-dd'} and %{t}";
        let tokenizer = Tokenizer::new();
        let first = tokenizer.tokenize(input);
        let second = tokenizer.tokenize(input);
        assert_eq!(first, second);
    }

    #[test]
    fn test_quoted_string_value_does_not_nest_placeholders() {
        // entered via `, = '...'`: a plain quoted string, so `%{` inside is
        // literal text rather than a placeholder
        let tokens = kinds("%{f, ext, = 'a%{b}'}");
        let names = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::ParameterName)
            .count();
        assert_eq!(names, 1);
    }
}
