// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The lexical level: reading quoted and bare literals (with escape
//! sequences and balanced brackets) into atoms, and the error type
//! shared with the grammar level. `tokens` offers a lazy token stream
//! for looking at input without building a tree; see
//! [read](../read/index.html) for trees.

use crate::number::classify;
use crate::pos::Pos;
use crate::scanner::{EndOfInput, Scanner};
use crate::settings::{Format, Settings, LIST_OPEN, LIST_CLOSE, ASSIGNMENT};
use crate::value::Atom;
use kstring::KString;
use thiserror::Error;
use genawaiter::rc::Gen;
use std::fmt::Write;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("illegal number format '{0}'")]
    IllegalNumberFormat(String),
    #[error("illegal escape sequence '{0}'")]
    IllegalEscapeSequence(String),
    #[error("unterminated list")]
    UnterminatedList,
    #[error("unterminated quoted string")]
    UnterminatedQuotedString,
    #[error("missing value after '='")]
    MissingAssignmentValue,
    #[error("not a hex digit: '{0}'")]
    IllegalHexCharacter(char),
    #[error("nesting too deep")]
    NestingTooDeep,
    #[error("unexpected closing character ')'")]
    UnexpectedClosingParen,
    #[error("'=' without preceding identifier")]
    MissingAssignmentIdentifier,
    #[error("empty literal")]
    EmptyLiteral,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{err} {pos}")]
pub struct ParseErrorWithPos {
    pub err: ParseError,
    pub pos: Pos
}

impl ParseError {
    pub fn at(self, p: Pos) -> ParseErrorWithPos {
        ParseErrorWithPos {
            err: self,
            pos: p
        }
    }
}

pub(crate) trait At<T> {
    fn at(self, p: Pos) -> Result<T, ParseErrorWithPos>;
}

impl<T> At<T> for Result<T, ParseError> {
    fn at(self, p: Pos) -> Result<T, ParseErrorWithPos> {
        self.map_err(|e| e.at(p))
    }
}

/// Why reading stopped early. Running off the end of the input is
/// only an error once the enclosing grammar rule says which one.
#[derive(Debug)]
pub(crate) enum Interrupt {
    EndOfInput,
    Failed(ParseErrorWithPos),
}

impl From<EndOfInput> for Interrupt {
    fn from(_: EndOfInput) -> Interrupt {
        Interrupt::EndOfInput
    }
}

impl From<ParseErrorWithPos> for Interrupt {
    fn from(e: ParseErrorWithPos) -> Interrupt {
        Interrupt::Failed(e)
    }
}

impl Interrupt {
    /// Resolve end of input to `err` at `p`.
    pub(crate) fn or_at(self, err: ParseError, p: Pos) -> ParseErrorWithPos {
        match self {
            Interrupt::EndOfInput => err.at(p),
            Interrupt::Failed(e) => e
        }
    }
}

pub(crate) trait OnEndOfInput<T> {
    fn on_end_of_input(self, err: ParseError, p: Pos) -> Result<T, Interrupt>;
}

impl<T> OnEndOfInput<T> for Result<T, Interrupt> {
    fn on_end_of_input(self, err: ParseError, p: Pos) -> Result<T, Interrupt> {
        self.map_err(|i| Interrupt::Failed(i.or_at(err, p)))
    }
}

// `kind` is 'u' or 'U', for the error message
fn read_hex_char(
    cs: &mut Scanner,
    startpos: Pos,
    kind: char,
    numdigits: usize,
) -> Result<char, Interrupt> {
    let digits = cs.read_chars(numdigits)?;
    let mut code: u32 = 0;
    for c in digits.chars() {
        let d = c.to_digit(16)
            .ok_or(ParseError::IllegalHexCharacter(c))
            .at(startpos)?;
        code = code * 16 + d;
    }
    let c = char::from_u32(code)
        .ok_or_else(|| ParseError::IllegalEscapeSequence(
            format!("\\{}{}", kind, digits)))
        .at(startpos)?;
    Ok(c)
}

/// Decode the escape sequence after a backslash at `startpos`. Returns
/// None for an escaped line break, which vanishes.
fn read_escape(
    cs: &mut Scanner,
    startpos: Pos,
) -> Result<Option<char>, Interrupt> {
    let c = cs.read_char()?;
    let replacement = match c {
        't' => '\t',
        'n' => '\n',
        'r' => '\r',
        '\'' => '\'',
        '"' => '"',
        '\\' => '\\',
        'b' => '\x08', // backspace
        'v' => '\x0B', // vertical tab
        'f' => '\x0C', // form feed
        '\r' | '\n' => {
            // Line continuation; swallow the other half of a CR/LF
            // pair, in either order
            let other = if c == '\r' { '\n' } else { '\r' };
            if cs.peek() == Some(other) {
                cs.advance()?;
            }
            return Ok(None)
        }
        'u' => read_hex_char(cs, startpos, c, 4)?,
        'U' => read_hex_char(cs, startpos, c, 8)?,
        _ => {
            return Err(ParseError::IllegalEscapeSequence(format!("\\{}", c))
                       .at(startpos).into())
        }
    };
    Ok(Some(replacement))
}

/// Where `read_until` stopped.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Stop {
    /// Before a terminator character, which is not consumed.
    Terminator,
    /// At the end of the input; `balanced` is false if a bracket
    /// opened in the literal is still waiting for its closer.
    EndOfInput { balanced: bool },
}

/// Read literal text into `out`, expanding escape sequences, until a
/// character for which `is_terminator` holds appears outside of any
/// balanced pair.
pub(crate) fn read_until(
    cs: &mut Scanner,
    format: &Format,
    is_terminator: impl Fn(char) -> bool,
    out: &mut String,
) -> Result<Stop, Interrupt> {
    out.clear();
    let mut pending_closers: Vec<char> = Vec::new();
    loop {
        let pos = cs.pos();
        let c = match cs.peek() {
            None => return Ok(Stop::EndOfInput {
                balanced: pending_closers.is_empty()
            }),
            Some(c) => c
        };
        if pending_closers.is_empty() && is_terminator(c) {
            return Ok(Stop::Terminator)
        }
        cs.advance()?;
        if c == '\\' {
            if let Some(c) = read_escape(cs, pos)? {
                out.push(c);
            }
        } else {
            if pending_closers.last() == Some(&c) {
                pending_closers.pop();
            } else if let Some(close) = format.balanced_closer(c) {
                pending_closers.push(close);
            }
            out.push(c);
        }
    }
}

/// Read a quoted literal; the cursor is on the opening mark `open`.
/// Quoted literals are always strings.
pub(crate) fn read_quoted(
    cs: &mut Scanner,
    open: char,
    close: char,
    maintained: bool,
    format: &Format,
) -> Result<Atom, Interrupt> {
    let startpos = cs.pos();
    cs.advance()?;
    let mut text = String::new();
    // also covers running out inside an escape sequence
    let stop = read_until(cs, format, |c| c == close, &mut text)
        .on_end_of_input(ParseError::UnterminatedQuotedString, startpos)?;
    match stop {
        Stop::Terminator => cs.advance()?,
        Stop::EndOfInput { .. } => {
            return Err(ParseError::UnterminatedQuotedString.at(startpos).into())
        }
    }
    if maintained {
        let mut kept = String::with_capacity(text.len() + 2);
        kept.push(open);
        kept.push_str(&text);
        kept.push(close);
        text = kept;
    }
    Ok(Atom::String(KString::from_string(text)))
}

/// Read a bare literal and classify it as a number or string.
pub(crate) fn read_bare(
    cs: &mut Scanner,
    format: &Format,
) -> Result<Atom, Interrupt> {
    let startpos = cs.pos();
    let mut text = String::new();
    match read_until(cs, format, |c| format.is_protected(c), &mut text)? {
        Stop::Terminator | Stop::EndOfInput { balanced: true } => {}
        Stop::EndOfInput { balanced: false } => {
            return Err(Interrupt::EndOfInput)
        }
    }
    if text.is_empty() {
        // nothing but escaped line breaks
        return Err(ParseError::EmptyLiteral.at(startpos).into())
    }
    Ok(classify(&text).at(startpos)?)
}

/// Read the atom starting at the cursor, which must not be on
/// whitespace, ')' or '='.
pub(crate) fn read_atom(
    cs: &mut Scanner,
    format: &Format,
) -> Result<Atom, Interrupt> {
    let c = cs.peek().ok_or(EndOfInput)?;
    if let Some((close, maintained)) = format.closing_quote(c) {
        read_quoted(cs, c, close, maintained, format)
    } else {
        read_bare(cs, format)
    }
}

pub(crate) fn skip_whitespace(cs: &mut Scanner, format: &Format) {
    while let Some(c) = cs.peek() {
        if !format.is_whitespace(c) {
            break;
        }
        // can't fail, peek saw a character
        let _ = cs.advance();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Atom(Atom),
    Open,
    Close,
    Assign,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Token::Atom(a) => a.fmt(f),
            Token::Open => f.write_char(LIST_OPEN),
            Token::Close => f.write_char(LIST_CLOSE),
            Token::Assign => f.write_char(ASSIGNMENT),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos(pub Token, pub Pos);

fn read_token(
    cs: &mut Scanner,
    format: &Format,
    c: char,
) -> Result<Token, Interrupt> {
    match c {
        LIST_OPEN => { cs.advance()?; Ok(Token::Open) }
        LIST_CLOSE => { cs.advance()?; Ok(Token::Close) }
        ASSIGNMENT => { cs.advance()?; Ok(Token::Assign) }
        _ => read_atom(cs, format).map(Token::Atom)
    }
}

/// Lazily split `text` into tokens. Whitespace is dropped. Stops
/// after the first error. Nesting is not checked here.
pub fn tokens<'s>(
    text: &'s str,
    settings: &'s Settings<'s>,
)
    -> impl Iterator<Item = Result<TokenWithPos, ParseErrorWithPos>> + 's
{
    Gen::new(move |co| async move {
        let mut cs = Scanner::new(text);
        loop {
            skip_whitespace(&mut cs, settings.format);
            let pos = cs.pos();
            let c = match cs.peek() {
                Some(c) => c,
                None => return
            };
            match read_token(&mut cs, settings.format, c) {
                Ok(t) => co.yield_(Ok(TokenWithPos(t, pos))).await,
                Err(i) => {
                    co.yield_(Err(
                        i.or_at(ParseError::UnexpectedEndOfInput, pos))).await;
                    return;
                }
            }
        }
    }).into_iter()
}
