//! # Message-Template Tokenizer
//!
//! The tokenizer component performs lexical analysis of localization message
//! templates: plain text interspersed with `%{...}` placeholders, where each
//! placeholder names a parameter and optionally carries a format name plus a
//! list of configuration entries. Configuration values may be quoted
//! sub-messages that themselves contain placeholders, to arbitrary depth.
//!
//! ## Design Principles
//!
//! The tokenizer follows these key design principles:
//!
//! * **Lossless Tokenization**: Every byte of the input is covered by exactly
//!   one token; concatenating the token texts reproduces the input.
//! * **Total Coverage**: No input is rejected. Characters that match no rule
//!   of the active mode are consumed one at a time as plain text.
//! * **Explicit Mode Stack**: Nesting of quoted sub-messages and placeholders
//!   is tracked by an explicit stack of [`Mode`] frames rather than recursive
//!   calls, so nesting depth is bounded only by available memory.
//! * **Reportable Incompleteness**: An unterminated quote or placeholder is
//!   not an error during scanning; it is visible afterwards as a residual
//!   stack depth greater than one.
//!
//! ## Component Structure
//!
//! * [`token`]: Token categories, the token value type, and the error type
//! * [`mode`]: Lexer modes, stack effects, and the per-rule match descriptor
//! * [`fragment`]: Shared lexical fragments (identifiers, numbers, operators)
//! * [`string`]: Escape handling and the quoted-string modes
//! * [`message`]: The root mode and the quoted sub-message modes
//! * [`parameter`]: Placeholder internals (name, format, configuration)
//! * [`tokenizer`]: The scan loop and the public API
//!
//! ## Usage Example
//!
//! ```rust
//! use msgfmt_lexer::{TokenKind, Tokenizer};
//!
//! let tokenizer = Tokenizer::new();
//! let result = tokenizer.tokenize("%{count, plural, one: 'item'}");
//! assert!(result.is_complete());
//! assert_eq!(result.tokens[0].kind, TokenKind::PlaceholderDelimiter);
//! ```

pub mod fragment;
pub mod message;
pub mod mode;
pub mod parameter;
pub mod string;
pub mod token;
pub mod tokenizer;

pub use mode::Mode;
pub use token::{Token, TokenKind, TokenizerError};
pub use tokenizer::{Scan, Tokenization, Tokenizer};
