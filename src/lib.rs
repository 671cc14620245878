// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A parser and printer for the parenthesized dumps that tools like
//! compilers write out (AST dumps and similar):
//!
//! ```text
//! (call_expr type='Int' location=main.swift:3:1
//!   (declref_expr decl=[print(_:)]))
//! ```
//!
//! * Lists of atoms; atoms are strings, integers or decimals.
//!   `identifier=value` is an attribute, the value being any
//!   expression.
//!
//! * Strings can be bare, `'`- or `"`-quoted (with C-like escapes,
//!   `\uXXXX` and `\UXXXXXXXX`), or wrapped in `[...]`, in which case
//!   the brackets stay part of the string. Bare strings may contain
//!   balanced parentheses, as in `foo(bar)`.
//!
//! * `read::parse` builds a tree from a string, the `Display` impls
//!   print it back compactly, and `Expression::pretty_description`
//!   prints it indented. `parse::tokens` streams tokens instead.
//!
//! * Errors come from a closed set (`parse::ParseError`), stop
//!   parsing at once, and carry the position where the failing rule
//!   started.

pub mod context;
pub mod number;
pub mod parse;
pub mod pos;
pub mod read;
pub mod scanner;
pub mod settings;
pub mod source;
pub mod value;

pub use parse::{ParseError, ParseErrorWithPos};
pub use read::{parse, parse_all, parse_located};
pub use value::{Atom, Expression};
