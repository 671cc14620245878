// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Deciding whether the text of a bare literal is a number, and which
//! kind.

use crate::parse::ParseError;
use crate::value::Atom;
use kstring::KString;
use num::{BigInt, ToPrimitive, Zero, rational::Ratio};

pub const DECIMAL_SEPARATOR: char = '.';
pub const DIVISION_OPERATOR: char = '/';

/// True for characters that may appear in a numeric literal.
pub fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == DECIMAL_SEPARATOR || c == DIVISION_OPERATOR
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn illegal(s: &str) -> ParseError {
    ParseError::IllegalNumberFormat(s.to_string())
}

// Split once at `sep`, both sides must be non-empty digit runs.
fn split_digits(s: &str, sep: char) -> Result<(&str, &str), ParseError> {
    match s.split_once(sep) {
        Some((a, b)) if is_digits(a) && is_digits(b) => Ok((a, b)),
        _ => Err(illegal(s))
    }
}

fn read_integer(s: &str) -> Result<Atom, ParseError> {
    s.parse::<i64>().map(Atom::Integer).map_err(|_| illegal(s))
}

fn read_rational(s: &str) -> Result<Atom, ParseError> {
    let (numer, denom) = split_digits(s, DIVISION_OPERATOR)?;
    let parse_big = |d: &str| d.parse::<BigInt>().map_err(|_| illegal(s));
    let numer = parse_big(numer)?;
    let denom = parse_big(denom)?;
    let q = if denom.is_zero() {
        // Ratio can't represent it; IEEE gives inf or NaN
        numer.to_f64().unwrap_or(f64::INFINITY) / 0.0
    } else {
        Ratio::new(numer, denom).to_f64().ok_or_else(|| illegal(s))?
    };
    Ok(Atom::Decimal(q))
}

fn read_decimal(s: &str) -> Result<Atom, ParseError> {
    split_digits(s, DECIMAL_SEPARATOR)?;
    // integer part + fraction / 10^(fraction digits), correctly rounded
    s.parse::<f64>().map(Atom::Decimal).map_err(|_| illegal(s))
}

/// Classify the (escape-expanded) text of a bare literal: digits only
/// is an integer, digits around one '/' a rational, digits around one
/// '.' a decimal; any other mix of those characters is an error, and
/// everything else is a string.
pub fn classify(s: &str) -> Result<Atom, ParseError> {
    let mut has_dot = false;
    let mut has_slash = false;
    for c in s.chars() {
        if c == DECIMAL_SEPARATOR {
            has_dot = true;
        } else if c == DIVISION_OPERATOR {
            has_slash = true;
        } else if !c.is_ascii_digit() {
            return Ok(Atom::String(KString::from_ref(s)))
        }
    }
    match (has_slash, has_dot) {
        (false, false) => read_integer(s),
        (true, false) => read_rational(s),
        (false, true) => read_decimal(s),
        (true, true) => Err(illegal(s)),
    }
}
