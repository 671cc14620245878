// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for both reading (parsing) and writing (serializing)
//! data.

/// Starts a list. Fixed by the grammar, not configurable.
pub const LIST_OPEN: char = '(';
/// Ends a list.
pub const LIST_CLOSE: char = ')';
/// Separates an attribute's identifier from its value.
pub const ASSIGNMENT: char = '=';

#[derive(Debug)]
pub struct Format {
    pub whitespace: &'static [char],
    /// Quote marks that close with themselves and are stripped from
    /// the literal.
    pub plain_quotes: &'static [char],
    /// (opening, closing) quote marks that are kept in the literal,
    /// e.g. `[a b]` reads as the string `[a b]`.
    pub maintained_quotes: &'static [(char, char)],
    /// (opening, closing) pairs that may appear nested inside a
    /// literal without ending it, e.g. `foo(bar baz)`.
    pub balanced_pairs: &'static [(char, char)],
}

pub const DEFAULT_FORMAT : Format = Format {
    whitespace: &[' ', '\t', '\r', '\n'],
    plain_quotes: &['\'', '"'],
    maintained_quotes: &[('[', ']')],
    balanced_pairs: &[('(', ')')],
};

fn lookup(pairs: &[(char, char)], c: char) -> Option<char> {
    pairs.iter().find(|(open, _)| *open == c).map(|(_, close)| *close)
}

impl Format {
    pub fn is_whitespace(&self, c: char) -> bool {
        self.whitespace.contains(&c)
    }

    /// Returns the closing mark for `c` and whether the marks are to be
    /// kept, or None if `c` does not start a quoted literal.
    pub fn closing_quote(&self, c: char) -> Option<(char, bool)> {
        if self.plain_quotes.contains(&c) {
            Some((c, false))
        } else {
            lookup(self.maintained_quotes, c).map(|close| (close, true))
        }
    }

    pub fn is_quote_opener(&self, c: char) -> bool {
        self.closing_quote(c).is_some()
    }

    pub fn balanced_closer(&self, c: char) -> Option<char> {
        lookup(self.balanced_pairs, c)
    }

    /// Characters that end a bare literal (outside of balanced pairs)
    /// and that force quoting when printing a string.
    pub fn is_protected(&self, c: char) -> bool {
        self.is_whitespace(c)
            || self.is_quote_opener(c)
            || c == LIST_CLOSE
            || c == ASSIGNMENT
    }
}

#[derive(Debug)]
pub struct Settings<'t> {
    pub format: &'t Format,
    /// How deeply lists and attribute values may nest; protects the
    /// call stack of the recursive descent.
    pub max_depth: u32,
}

pub const DEFAULT_SETTINGS : Settings<'static> = Settings {
    format: &DEFAULT_FORMAT,
    max_depth: 500,
    // ^ the limit with default settings on Linux is well above this
};
