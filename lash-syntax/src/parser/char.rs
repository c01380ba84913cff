// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Parsers that recognize a single character
//!
//! These are the primitive parsers everything else is composed from. Each of
//! them forces at most one node of the input stream, so applying one to a
//! state backed by a live [input](crate::input::Input) reads at most one
//! line.

use crate::parser::core::{Eof, ParseFuture, ParseResult, Parser, State};

/// Returns a parser that accepts a character satisfying the predicate.
///
/// The parser consumes and yields the character if the predicate returns
/// true for it. Otherwise, including at the end of input, the parser fails
/// without a report.
pub fn test_char<P>(predicate: P) -> impl Parser<char>
where
    P: Fn(char) -> bool + Clone + 'static,
{
    move |state: State| {
        let predicate = predicate.clone();
        let context = state.context;
        state.rest.next().map(move |value| {
            match value.position.current() {
                Some(c) if predicate(c) => ParseResult::success(
                    c,
                    State {
                        rest: value.next,
                        context,
                    },
                ),
                _ => ParseResult::failure(),
            }
        })
    }
}

/// Returns a parser that accepts exactly the given character.
pub fn parse_char(expected: char) -> impl Parser<char> {
    test_char(move |c| c == expected)
}

/// Returns a parser that accepts any character.
///
/// It fails only at the end of input.
pub fn accept_char() -> impl Parser<char> {
    test_char(|_| true)
}

/// Returns a parser that succeeds only at the end of input.
///
/// On success the state is returned unchanged, so the parser can be applied
/// any number of times.
pub fn parse_eof() -> impl Parser<Eof> {
    |state: State| {
        state.rest.next().map(move |value| {
            if value.position.is_null() {
                ParseResult::success(Eof, state)
            } else {
                ParseResult::failure()
            }
        })
    }
}
