// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use attrexp::parse::{Token, TokenWithPos, tokens};
use attrexp::read::{read_file_all, read_named, write_all};
use attrexp::settings::DEFAULT_SETTINGS;
use attrexp::source::read_text;
use attrexp::value::Expression;
use clap::Parser as ClapParser;
use std::io::{stdin, stdout, BufWriter};
use std::path::PathBuf;
use anyhow::{Result, bail};
use tracing::Level;


fn indentstr(i: usize) -> Option<&'static str> {
    "                                                                  ".get(0..i)
}

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Stream tokens instead of building trees
    #[clap(short, long, value_parser)]
    tokens: bool,
    /// Print the parsed data
    #[clap(long, value_parser)]
    print: bool,
    /// Print trees indented (only with --print and no --tokens)
    #[clap(long, value_parser)]
    pretty: bool,
    /// Show the token position (only with --print and --tokens)
    #[clap(long, value_parser)]
    pos: bool,
    /// Log what the parser does
    #[clap(short, long, value_parser)]
    verbose: bool,
    /// Path to the input file, `-` for standard input
    #[clap(value_parser, required(true))]
    input_path: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::TRACE } else { Level::WARN })
        .init();

    let from_stdin = args.input_path.as_os_str() == "-";

    if !args.tokens {

        // Build up all trees, then optionally print those.

        let v: Vec<Expression> =
            if from_stdin {
                read_named(stdin(), "stdin")?
            } else {
                read_file_all(&args.input_path)?
            };
        if args.print {
            if args.pretty {
                for e in &v {
                    println!("{}", e.pretty_description(""));
                }
            } else {
                write_all(BufWriter::new(stdout()), &v)?;
            }
        }

    } else {

        // Go through the token stream, just doing some bookkeeping
        // and optionally printing the tokens.

        let text =
            if from_stdin {
                read_text(stdin())?
            } else {
                read_text(std::fs::File::open(&args.input_path)?)?
            };
        let mut count_toplevel = 0;
        let mut count_enter = 0;
        let mut count_attributes = 0;
        let mut depth: usize = 0;
        for te in tokens(&text, &DEFAULT_SETTINGS) {
            let TokenWithPos(token, pos) = te?;
            let indentlevel;
            match token {
                Token::Open => {
                    count_enter += 1;
                    if depth == 0 {
                        count_toplevel += 1;
                    }
                    indentlevel = depth;
                    depth += 1;
                }
                Token::Close => {
                    if depth == 0 {
                        bail!("unexpected closing character ')' at {:?}{}",
                              args.input_path, pos)
                    }
                    depth -= 1;
                    indentlevel = depth;
                }
                Token::Assign => {
                    count_attributes += 1;
                    indentlevel = depth;
                }
                Token::Atom(_) => {
                    indentlevel = depth;
                }
            }
            if args.print {
                if let Some(indent) = indentstr(indentlevel) {
                    if args.pos {
                        println!("{indent}{pos} {token}");
                    } else {
                        println!("{indent}{token}");
                    }
                } else {
                    bail!("lists nested too deeply at {:?}{}", args.input_path, pos)
                }
            }
        }
        if depth > 0 {
            bail!("{} list(s) not closed at end of {:?}", depth, args.input_path)
        }
        println!(";; count_toplevel = {count_toplevel}, count_enter = {count_enter}, \
                  count_attributes = {count_attributes}");

    }
    Ok(())
}
