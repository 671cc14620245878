// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Runtime data types representing a parsed expression.

//! An [Atom](Atom) is a leaf; an [Expression](Expression) is an atom,
//! a list of expressions, or an attribute binding an atom to an
//! expression. Trees are owned strictly top-down, there is no
//! sharing and there are no cycles.

use crate::number::is_number_char;
use crate::settings::{DEFAULT_FORMAT, LIST_OPEN, LIST_CLOSE, ASSIGNMENT};
use std::fmt::Write;
use kstring::KString;

/// Added per nesting level by `Expression::pretty_description`.
pub const PRETTY_INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    String(KString),
    Integer(i64),
    Decimal(f64),
}

// Strings print bare unless that would read back as something else.
fn needs_quote(s: &str) -> bool {
    s.is_empty()
        || s.chars().any(|c| DEFAULT_FORMAT.is_protected(c))
        || s.chars().all(is_number_char)
}

// Byte offsets of the openers in `s` that the reader's bracket
// balancing would leave waiting for a closer. Read back raw, such an
// opener swallows the rest of the input, quoted or not.
fn unbalanced_openers(s: &str) -> Vec<usize> {
    let mut pending: Vec<(usize, char)> = Vec::new();
    for (i, c) in s.char_indices() {
        if pending.last().map(|&(_, close)| close) == Some(c) {
            pending.pop();
        } else if let Some(close) = DEFAULT_FORMAT.balanced_closer(c) {
            pending.push((i, close));
        }
    }
    pending.into_iter().map(|(i, _)| i).collect()
}

fn fmt_string(f: &mut std::fmt::Formatter<'_>, s: &str)
              -> Result<(), std::fmt::Error> {
    let unbalanced = unbalanced_openers(s);
    if unbalanced.is_empty() && !needs_quote(s) {
        return f.write_str(s)
    }
    // Only the quote itself and unbalanced openers are escaped;
    // control characters are written as they are.
    f.write_char('"')?;
    for (i, c) in s.char_indices() {
        if c == '"' {
            f.write_str("\\\"")?;
        } else if unbalanced.contains(&i) {
            if (c as u32) <= 0xFFFF {
                write!(f, "\\u{:04X}", c as u32)?;
            } else {
                write!(f, "\\U{:08X}", c as u32)?;
            }
        } else {
            f.write_char(c)?;
        }
    }
    f.write_char('"')
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Atom::String(s) => fmt_string(f, s),
            Atom::Integer(n) => write!(f, "{}", n),
            // Debug keeps the ".0" of integral values
            Atom::Decimal(x) => write!(f, "{:?}", x),
        }
    }
}

impl Atom {
    pub fn pretty_description(&self, indentation: &str) -> String {
        format!("{}{}", indentation, self)
    }
}

impl From<&str> for Atom {
    fn from(s: &str) -> Atom {
        Atom::String(KString::from_ref(s))
    }
}

impl From<String> for Atom {
    fn from(s: String) -> Atom {
        Atom::String(KString::from_string(s))
    }
}

impl From<KString> for Atom {
    fn from(s: KString) -> Atom {
        Atom::String(s)
    }
}

impl From<i64> for Atom {
    fn from(n: i64) -> Atom {
        Atom::Integer(n)
    }
}

impl From<f64> for Atom {
    fn from(x: f64) -> Atom {
        Atom::Decimal(x)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Atom(Atom),
    List(Vec<Expression>),
    Attribute {
        identifier: Atom,
        value: Box<Expression>,
    },
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Expression::Atom(a) => a.fmt(f),
            Expression::List(v) => {
                f.write_char(LIST_OPEN)?;
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    item.fmt(f)?;
                }
                f.write_char(LIST_CLOSE)
            }
            Expression::Attribute { identifier, value } => {
                identifier.fmt(f)?;
                f.write_char(ASSIGNMENT)?;
                value.fmt(f)
            }
        }
    }
}

impl Expression {
    /// Like `to_string()`, but nested lists go on their own lines,
    /// indented by `PRETTY_INDENT` per level on top of `indentation`.
    /// Runs of other items stay on one line.
    pub fn pretty_description(&self, indentation: &str) -> String {
        match self {
            Expression::List(v) => {
                let inner = format!("{}{}", indentation, PRETTY_INDENT);
                let mut out = String::new();
                for item in v {
                    if item.is_list() {
                        out.push('\n');
                        out.push_str(&item.pretty_description(&inner));
                    } else {
                        if !out.is_empty() {
                            out.push(' ');
                        }
                        // infallible for String
                        let _ = write!(out, "{}", item);
                    }
                }
                format!("{}{}{}{}", indentation, LIST_OPEN, out, LIST_CLOSE)
            }
            _ => format!("{}{}", indentation, self)
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Expression::List(_))
    }
}

impl From<Atom> for Expression {
    fn from(a: Atom) -> Expression {
        Expression::Atom(a)
    }
}

impl From<&str> for Expression {
    fn from(s: &str) -> Expression {
        Expression::Atom(s.into())
    }
}

impl From<String> for Expression {
    fn from(s: String) -> Expression {
        Expression::Atom(s.into())
    }
}

impl From<i64> for Expression {
    fn from(n: i64) -> Expression {
        Expression::Atom(n.into())
    }
}

impl From<f64> for Expression {
    fn from(x: f64) -> Expression {
        Expression::Atom(x.into())
    }
}

impl From<Vec<Expression>> for Expression {
    fn from(v: Vec<Expression>) -> Expression {
        Expression::List(v)
    }
}

/// Easily create a string atom
pub fn string(s: &str) -> Expression {
    Expression::Atom(Atom::from(s))
}

pub fn integer(n: i64) -> Expression {
    Expression::Atom(Atom::Integer(n))
}

pub fn decimal(x: f64) -> Expression {
    Expression::Atom(Atom::Decimal(x))
}

pub fn list(items: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::List(items.into_iter().collect())
}

pub fn attribute(identifier: impl Into<Atom>, value: Expression) -> Expression {
    Expression::Attribute {
        identifier: identifier.into(),
        value: Box::new(value),
    }
}
