// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A cursor over an in-memory string, one character (unicode scalar)
//! at a time. Its only failure is running off the end.

use crate::pos::Pos;
use std::str::Chars;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("end of input")]
pub struct EndOfInput;

#[derive(Debug, Clone)]
pub struct Scanner<'s> {
    rest: Chars<'s>,
    pos: Pos,
}

impl<'s> Scanner<'s> {
    pub fn new(text: &'s str) -> Scanner<'s> {
        Scanner {
            rest: text.chars(),
            pos: Pos::default(),
        }
    }

    /// Position of the character `peek` would return.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.rest.as_str().is_empty()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest.clone().next()
    }

    pub fn advance(&mut self) -> Result<(), EndOfInput> {
        self.read_char().map(|_| ())
    }

    pub fn read_char(&mut self) -> Result<char, EndOfInput> {
        let c = self.rest.next().ok_or(EndOfInput)?;
        self.pos = self.pos.after(c);
        Ok(c)
    }

    /// Read exactly `n` characters. Nothing is consumed if fewer
    /// remain.
    pub fn read_chars(&mut self, n: usize) -> Result<String, EndOfInput> {
        let s: String = self.rest.clone().take(n).collect();
        if s.chars().count() < n {
            return Err(EndOfInput)
        }
        for _ in 0..n {
            self.read_char()?;
        }
        Ok(s)
    }
}
