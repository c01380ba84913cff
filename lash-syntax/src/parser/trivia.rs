// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Parsers for the parts of the input that carry no meaning
//!
//! Line continuations (a backslash followed by a newline), blanks and
//! comments separate tokens without contributing to the syntax tree. Line
//! continuations may appear anywhere between characters of a token, so the
//! token parsers go through [`test_char_after_line_continuations`] and its
//! relatives rather than using the raw character parsers directly.
//!
//! None of these parsers consume a newline that is not part of a line
//! continuation; the newline is a token in its own right.

use crate::parser::char::{parse_char, test_char};
use crate::parser::combinator::{join, join3, map_value, option, repeat};
use crate::parser::core::Parser;

/// Whether the character is a blank: horizontal whitespace.
///
/// A newline is not a blank; it terminates commands instead of separating
/// tokens.
#[must_use]
pub fn is_blank(c: char) -> bool {
    c != '\n' && c.is_whitespace()
}

/// Returns a parser that consumes one line continuation.
pub fn skip_line_continuation() -> impl Parser<()> {
    map_value(join(parse_char('\\'), parse_char('\n')), |_| ())
}

/// Returns a parser that consumes any number of line continuations.
///
/// This parser never fails.
pub fn skip_line_continuations() -> impl Parser<()> {
    map_value(repeat(skip_line_continuation(), Vec::new()), |_: Vec<()>| ())
}

/// Returns a parser like [`test_char`] that first skips line continuations.
pub fn test_char_after_line_continuations<P>(predicate: P) -> impl Parser<char>
where
    P: Fn(char) -> bool + Clone + 'static,
{
    map_value(
        join(skip_line_continuations(), test_char(predicate)),
        |((), c)| c,
    )
}

/// Returns a parser like [`parse_char`] that first skips line continuations.
pub fn parse_char_after_line_continuations(expected: char) -> impl Parser<char> {
    test_char_after_line_continuations(move |c| c == expected)
}

/// Returns a parser like [`accept_char`](crate::parser::accept_char) that
/// first skips line continuations.
pub fn accept_char_after_line_continuations() -> impl Parser<char> {
    test_char_after_line_continuations(|_| true)
}

/// Returns a parser that consumes a comment.
///
/// A comment runs from a `#` up to, but not including, the next newline or
/// the end of input.
pub fn skip_comment() -> impl Parser<()> {
    map_value(
        join(parse_char('#'), repeat(test_char(|c| c != '\n'), String::new())),
        |_| (),
    )
}

/// Returns a parser that consumes any number of blanks, allowing line
/// continuations before each.
///
/// This parser never fails.
pub fn skip_blanks() -> impl Parser<()> {
    map_value(
        repeat(test_char_after_line_continuations(is_blank), String::new()),
        |_| (),
    )
}

/// Returns a parser that consumes blanks, trailing line continuations and an
/// optional comment.
///
/// This is the token separator: it consumes everything meaningless up to
/// the next token, newline or end of input, and never fails.
pub fn skip_whitespaces() -> impl Parser<()> {
    map_value(
        join3(skip_blanks(), skip_line_continuations(), option(skip_comment())),
        |_| (),
    )
}
