// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Syntax parser for the shell language
//!
//! The parser is a library of combinators over the lazy
//! [stream](crate::stream) of source characters. Every parser is a function
//! from a [`State`] to a future of a [`ParseResult`]; composing parsers
//! composes those futures, so a whole parse suspends exactly when, and only
//! as long as, the underlying [input](crate::input) has no more source text
//! ready.
//!
//! Grammar-level entry points ([`parse_simple_command`], [`parse_pipeline`],
//! [`parse_sequence`] and friends) are built from the same combinators as
//! everything else and share their signature, so a driver can call any of
//! them directly on a state of its own making.
//!
//! ```
//! # use futures_util::FutureExt as _;
//! # use lash_syntax::input::{input_stream, Memory};
//! # use lash_syntax::parser::{parse_simple_command, State};
//! let state = State::new(input_stream(Memory::new("echo hello world\n")));
//! let result = parse_simple_command(state).now_or_never().unwrap().unwrap();
//! let command = result.product.unwrap().value;
//! assert_eq!(command.to_string(), "echo hello world");
//! ```
//!
//! Failure of a parser is an ordinary value, not a fault: a failed
//! [`ParseResult`] simply has no product. [`Report`]s accumulate on both
//! successful and failed results and survive backtracking; convert a report
//! to a [`Message`](crate::source::pretty::Message) to display it.

mod char;
mod combinator;
mod command;
mod core;
mod list;
mod pipeline;
mod report;
mod simple_command;
mod trivia;
mod word;

pub use self::char::{accept_char, parse_char, parse_eof, test_char};
pub use self::combinator::{
    choice, choose, join, join3, map_product, map_value, one_or_more, option, repeat,
};
pub use self::command::parse_command;
pub use self::core::{
    Context, DynParser, Eof, ParseFuture, ParseResult, Parser, Product, State,
};
pub use self::list::{parse_and_or_list, parse_sequence};
pub use self::pipeline::parse_pipeline;
pub use self::report::{Category, Report, ReportKind};
pub use self::simple_command::parse_simple_command;
pub use self::trivia::{
    accept_char_after_line_continuations, is_blank, parse_char_after_line_continuations,
    skip_blanks, skip_comment, skip_line_continuation, skip_line_continuations,
    skip_whitespaces, test_char_after_line_continuations,
};
pub use self::word::{is_word_char, parse_word, parse_word_component};
