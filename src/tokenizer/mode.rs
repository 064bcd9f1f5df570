//! Lexer modes and the stack machinery that drives them.
//!
//! Each mode carries its own ordered rule list (see [`message`], [`string`]
//! and [`parameter`]); the scan loop tries the rules of the active mode top to
//! bottom and applies the winning rule's [`StackEffect`] atomically after its
//! tokens are emitted. Shared rule groups such as escape handling or
//! whitespace skipping are composed into the mode rule lists directly; they
//! are not pushable frames.
//!
//! [`message`]: super::message
//! [`string`]: super::string
//! [`parameter`]: super::parameter

use serde::{Deserialize, Serialize};

use super::token::TokenKind;

/// A pushable lexer mode.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
pub enum Mode {
    /// Top-level message text; the permanent bottom frame of every scan.
    Root,
    /// A `'...'` configuration value; placeholders do not nest here.
    SingleQuotedString,
    /// A `"..."` configuration value; placeholders do not nest here.
    DoubleQuotedString,
    /// Directly after `%{`, expecting the parameter name.
    Parameter,
    /// After the parameter name, expecting an optional `, format`.
    ParameterFormat,
    /// Between configuration entries, expecting `, key:` or `}`.
    ParameterConfigKey,
    /// Directly after `key:`, expecting one configuration value.
    ParameterConfigValue,
    /// A `'...'` sub-message value; placeholders nest here.
    SingleQuotedMessage,
    /// A `"..."` sub-message value; placeholders nest here.
    DoubleQuotedMessage,
}

/// Stack effect of a rule, applied after its tokens are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StackEffect {
    /// Keep the active mode.
    Stay,
    /// Replace the top frame.
    Replace(Mode),
    /// Push a new frame.
    Push(Mode),
    /// Return to the enclosing frame.
    Pop,
    /// Replace the top frame, then push another on top of it. Used when a
    /// quoted value opens inside a configuration context, so that the closing
    /// quote returns to the replaced frame rather than the current one.
    ReplacePush(Mode, Mode),
}

/// A single rule match: the tokens it emits, in order, plus its stack effect.
///
/// Pieces are sub-slices of the consumed input; empty sub-matches (an optional
/// group that matched nothing, a zero-width whitespace run) emit no token, so
/// the remaining pieces concatenated still equal the consumed slice.
#[derive(Debug)]
pub(crate) struct Step<'a> {
    pub pieces: Vec<(TokenKind, &'a str)>,
    pub effect: StackEffect,
}

impl<'a> Step<'a> {
    pub fn new(effect: StackEffect) -> Self {
        Self {
            pieces: Vec::new(),
            effect,
        }
    }

    pub fn piece(mut self, kind: TokenKind, text: &'a str) -> Self {
        if !text.is_empty() {
            self.pieces.push((kind, text));
        }
        self
    }

    pub fn piece_opt(self, kind: TokenKind, text: Option<&'a str>) -> Self {
        match text {
            Some(text) => self.piece(kind, text),
            None => self,
        }
    }
}

/// Applies a stack effect. The bottom frame is permanent: `Pop` on a
/// single-frame stack leaves it unchanged.
pub(crate) fn apply_effect(stack: &mut Vec<Mode>, effect: StackEffect) {
    match effect {
        StackEffect::Stay => {}
        StackEffect::Replace(mode) => {
            if let Some(top) = stack.last_mut() {
                *top = mode;
            }
        }
        StackEffect::Push(mode) => stack.push(mode),
        StackEffect::Pop => {
            if stack.len() > 1 {
                stack.pop();
            }
        }
        StackEffect::ReplacePush(top, pushed) => {
            if let Some(current) = stack.last_mut() {
                *current = top;
            }
            stack.push(pushed);
        }
    }
}
