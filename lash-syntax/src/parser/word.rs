// This file is part of lash, a lazy incremental shell.
// Copyright (C) 2026 lash developers

//! Parsing words

use crate::parser::combinator::{map_value, one_or_more, repeat};
use crate::parser::core::{ParseFuture, State};
use crate::parser::trivia::{is_blank, test_char_after_line_continuations};
use crate::syntax::{Word, WordComponent};

/// Whether the character can appear in a raw word.
///
/// Operators, blanks, newlines, the comment sign and the backslash all end
/// a raw word.
#[must_use]
pub fn is_word_char(c: char) -> bool {
    !is_blank(c)
        && c != '\n'
        && !matches!(c, ';' | '&' | '|' | '(' | ')' | '<' | '>' | '#' | '\\')
}

/// Parses one word component.
///
/// Currently the only component form is a non-empty run of raw word
/// characters, possibly interrupted by line continuations. Fails without a
/// report if no word character follows.
pub fn parse_word_component(state: State) -> ParseFuture<WordComponent> {
    map_value(
        one_or_more(test_char_after_line_continuations(is_word_char)),
        |chars: Vec<char>| WordComponent::Raw(chars.into_iter().collect()),
    )(state)
}

/// Parses a word: any number of components.
///
/// This parser never fails; absence of components yields an empty word. The
/// caller decides whether an empty word is acceptable where it occurs.
pub fn parse_word(state: State) -> ParseFuture<Word> {
    map_value(repeat(parse_word_component, Vec::new()), |components| Word {
        components,
    })(state)
}
