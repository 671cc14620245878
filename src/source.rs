// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Get the text out of anything implementing `Read`, insisting on
//! valid UTF-8.

use crate::pos::Pos;
use crate::read::ReadError;
use std::io::{self, Read};
use utf8::{BufReadDecoder, BufReadDecoderError};

/// Decode all of `fh`. An invalid byte sequence is reported at the
/// position of the character it would have been.
pub fn read_text(fh: impl Read) -> Result<String, ReadError> {
    let mut inp = BufReadDecoder::new(io::BufReader::new(fh));
    let mut text = String::new();
    let mut pos = Pos::default();
    while let Some(r) = inp.next_strict() {
        match r {
            Ok(s) => {
                for c in s.chars() {
                    pos = pos.after(c);
                }
                text.push_str(s);
            }
            Err(BufReadDecoderError::InvalidByteSequence(_)) => {
                return Err(ReadError::InvalidUtf8(pos))
            }
            Err(BufReadDecoderError::Io(e)) => {
                return Err(ReadError::IO(e))
            }
        }
    }
    Ok(text)
}
