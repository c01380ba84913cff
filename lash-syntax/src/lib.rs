// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! This crate provides a parser for the shell language that reads source
//! code lazily and incrementally.
//!
//! The parser never asks for more input than the syntax it is recognizing
//! requires. Source code enters as [fragments](source::Fragment) through an
//! [input](input::Input), is memoized in a [stream](stream::Stream), and is
//! consumed by [parser](parser) combinators whose results are futures from
//! the [`lash_defer`] crate: a parse applied to source that has not fully
//! arrived yet simply stays pending until the input supplies the missing
//! line, then resumes in place.
//!
//! The [`syntax`] module defines the abstract syntax trees the grammar-level
//! parsers produce, and the [`source::pretty`] module formats the
//! [reports](parser::Report) a parse accumulates.
//!
//! # Example
//!
//! Parsing a complete command that is already in memory:
//!
//! ```
//! # use futures_util::FutureExt as _;
//! # use lash_syntax::input::{input_stream, Memory};
//! # use lash_syntax::parser::{parse_sequence, State};
//! let state = State::new(input_stream(Memory::new("cargo build --release\n")));
//! let result = parse_sequence(state).now_or_never().unwrap().unwrap();
//! let sequence = result.product.unwrap().value;
//! assert_eq!(sequence.to_string(), "cargo build --release");
//! ```

pub mod input;
pub mod parser;
pub mod source;
pub mod stream;
pub mod syntax;
