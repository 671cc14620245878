// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building expression trees from text (recursive descent), and
//! reading/writing them from/to files and other byte streams.

use crate::pos::Pos;
use crate::context::{self, Context};
use crate::parse::{ParseError, ParseErrorWithPos, Interrupt, OnEndOfInput,
                   read_atom, skip_whitespace};
use crate::scanner::Scanner;
use crate::settings::{Settings, DEFAULT_SETTINGS, LIST_OPEN, LIST_CLOSE,
                      ASSIGNMENT};
use crate::source::read_text;
use crate::value::Expression;
use std::fmt::{Formatter, Display};
use std::io::{Read, Write};
use std::path::Path;
use std::fs::File;
use thiserror::Error;
use tracing::{debug, trace};

pub struct Parser<'s> {
    scanner: Scanner<'s>,
    settings: &'s Settings<'s>,
    failed: bool,
}

impl<'s> Parser<'s> {
    pub fn new(text: &'s str) -> Parser<'s> {
        Parser::with_settings(text, &DEFAULT_SETTINGS)
    }

    pub fn with_settings(text: &'s str, settings: &'s Settings<'s>) -> Parser<'s> {
        Parser {
            scanner: Scanner::new(text),
            settings,
            failed: false,
        }
    }

    /// Position of the next unread character.
    pub fn pos(&self) -> Pos {
        self.scanner.pos()
    }

    /// Parse the next expression. Input after it is left unread.
    pub fn parse(&mut self) -> Result<Expression, ParseErrorWithPos> {
        skip_whitespace(&mut self.scanner, self.settings.format);
        let startpos = self.scanner.pos();
        match self.parse_expression(self.settings.max_depth) {
            Ok(Some(e)) => Ok(e),
            Ok(None) => Err(ParseError::UnexpectedClosingParen.at(startpos)),
            Err(i) => Err(i.or_at(ParseError::UnexpectedEndOfInput, startpos)),
        }
    }

    // Returns None if a ')' closed the surrounding list. `depth_fuel`
    // is how many more levels of lists or attribute values may be
    // entered.
    fn parse_expression(
        &mut self,
        depth_fuel: u32,
    ) -> Result<Option<Expression>, Interrupt> {
        let format = self.settings.format;
        skip_whitespace(&mut self.scanner, format);
        let pos = self.scanner.pos();
        let c = self.scanner.peek().ok_or(Interrupt::EndOfInput)?;
        match c {
            LIST_OPEN => {
                if depth_fuel == 0 {
                    return Err(ParseError::NestingTooDeep.at(pos).into())
                }
                self.scanner.advance()?;
                self.parse_list(pos, depth_fuel - 1).map(Some)
            }
            LIST_CLOSE => {
                self.scanner.advance()?;
                Ok(None)
            }
            ASSIGNMENT => {
                Err(ParseError::MissingAssignmentIdentifier.at(pos).into())
            }
            _ => {
                let identifier = read_atom(&mut self.scanner, format)?;
                let assignpos = self.scanner.pos();
                if self.scanner.peek() != Some(ASSIGNMENT) {
                    return Ok(Some(Expression::Atom(identifier)))
                }
                if depth_fuel == 0 {
                    return Err(ParseError::NestingTooDeep.at(assignpos).into())
                }
                self.scanner.advance()?;
                match self.parse_expression(depth_fuel - 1) {
                    Ok(Some(value)) => Ok(Some(Expression::Attribute {
                        identifier,
                        value: Box::new(value),
                    })),
                    Ok(None) | Err(Interrupt::EndOfInput) => {
                        Err(ParseError::MissingAssignmentValue.at(assignpos).into())
                    }
                    Err(e) => Err(e)
                }
            }
        }
    }

    // The opening paren at `startpos` has been consumed.
    fn parse_list(
        &mut self,
        startpos: Pos,
        depth_fuel: u32,
    ) -> Result<Expression, Interrupt> {
        let mut v = Vec::new();
        loop {
            let item = self.parse_expression(depth_fuel)
                .on_end_of_input(ParseError::UnterminatedList, startpos)?;
            match item {
                Some(e) => v.push(e),
                None => return Ok(Expression::List(v))
            }
        }
    }
}

/// Successive top-level expressions, until the end of the input or
/// the first error.
impl<'s> Iterator for Parser<'s> {
    type Item = Result<Expression, ParseErrorWithPos>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None
        }
        skip_whitespace(&mut self.scanner, self.settings.format);
        if self.scanner.at_end() {
            return None
        }
        let r = self.parse();
        self.failed = r.is_err();
        Some(r)
    }
}

pub fn parse_with_settings(
    text: &str,
    settings: &Settings,
) -> Result<Expression, ParseErrorWithPos> {
    trace!(len = text.len(), "parsing expression");
    let r = Parser::with_settings(text, settings).parse();
    if let Err(e) = &r {
        debug!(error = %e, "parse failed");
    }
    r
}

/// Parse the expression at the start of `text`, keeping the
/// position of an error.
pub fn parse_located(text: &str) -> Result<Expression, ParseErrorWithPos> {
    parse_with_settings(text, &DEFAULT_SETTINGS)
}

/// Parse the expression at the start of `text`.
pub fn parse(text: &str) -> Result<Expression, ParseError> {
    parse_located(text).map_err(|e| e.err)
}

/// Parse all top-level expressions in `text`.
pub fn parse_all(text: &str) -> Result<Vec<Expression>, ParseErrorWithPos> {
    Parser::new(text).collect()
}


#[derive(Error, Debug)]
pub enum ReadError {
    #[error("{0}")]
    IO(#[from] std::io::Error),
    #[error("invalid UTF-8 {0}")]
    InvalidUtf8(Pos),
    #[error("{0}")]
    Parse(#[from] ParseErrorWithPos),
}

/// A `ReadError` together with where the input came from.
#[derive(Error, Debug)]
pub struct ReadErrorWithLocation {
    pub err: ReadError,
    pub container: Box<dyn Context>
}

impl Display for ReadErrorWithLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match &self.err {
            ReadError::IO(e) => {
                self.container.format_without_pos(f)?;
                f.write_fmt(format_args!(": {}", e))
            }
            ReadError::InvalidUtf8(pos) => {
                f.write_str("invalid UTF-8 ")?;
                self.container.format_with_pos(*pos, f)
            }
            ReadError::Parse(e) => {
                f.write_fmt(format_args!("{} ", e.err))?;
                self.container.format_with_pos(e.pos, f)
            }
        }
    }
}

impl ReadError {
    fn within(self, container: Box<dyn Context>) -> ReadErrorWithLocation {
        ReadErrorWithLocation {
            err: self,
            container
        }
    }
}

fn file_context(path: &Path) -> Box<dyn Context> {
    Box::new(context::FileContext { path: path.to_path_buf() })
}

/// Read one expression from `fh`, which must be valid UTF-8.
pub fn read_expression(fh: impl Read) -> Result<Expression, ReadError> {
    let text = read_text(fh)?;
    Ok(parse_located(&text)?)
}

/// Read all top-level expressions from `fh`.
pub fn read_all(fh: impl Read) -> Result<Vec<Expression>, ReadError> {
    let text = read_text(fh)?;
    Ok(parse_all(&text)?)
}

/// Like `read_all`, naming the source `name` in errors.
pub fn read_named(
    fh: impl Read,
    name: &str,
) -> Result<Vec<Expression>, ReadErrorWithLocation> {
    read_all(fh).map_err(|e| e.within(Box::new(context::NamedContext {
        name: name.to_string()
    })))
}

pub fn read_file(path: &Path) -> Result<Expression, ReadErrorWithLocation> {
    debug!(path = ?path, "reading file");
    let fh = File::open(path).map_err(
        |e| ReadError::IO(e).within(file_context(path)))?;
    read_expression(fh).map_err(|e| e.within(file_context(path)))
}

pub fn read_file_all(path: &Path) -> Result<Vec<Expression>, ReadErrorWithLocation> {
    debug!(path = ?path, "reading file");
    let fh = File::open(path).map_err(
        |e| ReadError::IO(e).within(file_context(path)))?;
    read_all(fh).map_err(|e| e.within(file_context(path)))
}

/// Print each expression on its own line, with an empty line in
/// between.
pub fn write_all<'t>(
    out: impl Write,
    vals: impl IntoIterator<Item = &'t Expression>
) -> Result<(), std::io::Error> {
    let mut out = out; // for `File`
    let mut seen_item = false;
    for v in vals.into_iter() {
        write!(out, "{}{}\n", if seen_item {"\n"} else {""}, v)?;
        seen_item = true;
    }
    out.flush()
}

pub fn write_file<'t>(path: &Path, vals: impl IntoIterator<Item = &'t Expression>)
                      -> Result<(), std::io::Error> {
    write_all(File::create(path)?, vals)
}
